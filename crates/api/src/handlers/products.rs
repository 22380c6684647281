//! Handlers for the product catalog endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use rnr_core::error::CoreError;
use rnr_core::types::DbId;
use rnr_db::models::product::{CreateProduct, UpdateProduct};
use rnr_db::repositories::ProductRepo;

use crate::error::AppResult;
use crate::middleware::admin::AdminToken;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/products
pub async fn list_products(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let products = ProductRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: products }))
}

/// GET /api/v1/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Product",
            id,
        })?;
    Ok(Json(DataResponse { data: product }))
}

/// POST /api/v1/products
pub async fn create_product(
    _admin: AdminToken,
    State(state): State<AppState>,
    Json(input): Json<CreateProduct>,
) -> AppResult<impl IntoResponse> {
    if input.price < 0.0 {
        return Err(CoreError::Validation("Price must be non-negative".into()).into());
    }
    let product = ProductRepo::create(&state.pool, &input).await?;
    tracing::info!(product_id = product.id, name = %product.name, "Product created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: product })))
}

/// PUT /api/v1/products/{id}
///
/// Partial update. Writing `sold`/`reserved` here bypasses lifecycle
/// bookkeeping; the caller owns consistency when using that escape hatch.
pub async fn update_product(
    _admin: AdminToken,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<impl IntoResponse> {
    if matches!(input.price, Some(p) if p < 0.0) {
        return Err(CoreError::Validation("Price must be non-negative".into()).into());
    }
    let product = ProductRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Product",
            id,
        })?;
    Ok(Json(DataResponse { data: product }))
}

/// DELETE /api/v1/products/{id}
///
/// Hard delete. Order history is unaffected: line items carry their own
/// snapshot of the product.
pub async fn delete_product(
    _admin: AdminToken,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !ProductRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound {
            entity: "Product",
            id,
        }
        .into());
    }
    tracing::info!(product_id = id, "Product deleted");
    Ok(Json(json!({ "success": true })))
}
