//! Route definitions for the product catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// Product routes, nested under `/products`.
///
/// ```text
/// GET    /                  list_products (public)
/// POST   /                  create_product (admin)
/// GET    /{id}              get_product (public)
/// PUT    /{id}              update_product (admin)
/// DELETE /{id}              delete_product (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
}
