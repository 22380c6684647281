//! Handlers for the reservation (order) endpoints.
//!
//! Reads run the expiry sweep first so the state a caller observes is
//! always current relative to wall-clock time. Every mutation goes
//! through the lifecycle engine; handlers never touch product flags.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use rnr_core::error::CoreError;
use rnr_core::types::DbId;
use rnr_db::models::order::{CreateOrder, UpdateOrder};
use rnr_db::repositories::OrderRepo;

use crate::error::AppResult;
use crate::lifecycle::engine;
use crate::lifecycle::sweep::sweep_expired;
use crate::middleware::admin::AdminToken;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/orders
///
/// Create a reservation. Public: this is the storefront checkout.
pub async fn create_order(
    State(state): State<AppState>,
    Json(input): Json<CreateOrder>,
) -> AppResult<impl IntoResponse> {
    let order = engine::create_reservation(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: order })))
}

/// GET /api/v1/orders
///
/// List all orders with line items, newest first. Sweeps first.
pub async fn list_orders(
    _admin: AdminToken,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    sweep_expired(&state.pool).await;
    let orders = OrderRepo::list_with_items(&state.pool).await?;
    Ok(Json(DataResponse { data: orders }))
}

/// GET /api/v1/orders/{id}
///
/// Fetch a single order with line items. Sweeps first.
pub async fn get_order(
    _admin: AdminToken,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    sweep_expired(&state.pool).await;
    let order = OrderRepo::find_with_items(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Order",
            id,
        })?;
    Ok(Json(DataResponse { data: order }))
}

/// PUT /api/v1/orders/{id}
///
/// Update status and/or deadline. Product side effects follow the
/// transition table, computed from the stored status.
pub async fn update_order(
    _admin: AdminToken,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateOrder>,
) -> AppResult<impl IntoResponse> {
    let order = engine::update_order(&state.pool, id, &input).await?;
    Ok(Json(DataResponse { data: order }))
}

/// Body for `POST /orders/{id}/extend`.
#[derive(Debug, Deserialize)]
pub struct ExtendRequest {
    pub days: i64,
}

/// POST /api/v1/orders/{id}/extend
///
/// Push the deadline out by `days`, reactivating the order if it had
/// already expired.
pub async fn extend_order(
    _admin: AdminToken,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ExtendRequest>,
) -> AppResult<impl IntoResponse> {
    let order = engine::extend_reservation(&state.pool, id, input.days).await?;
    Ok(Json(DataResponse { data: order }))
}
