//! Route definitions for the reservation endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::orders;
use crate::state::AppState;

/// Order routes, nested under `/orders`.
///
/// ```text
/// GET    /                  list_orders (admin)
/// POST   /                  create_order (public)
/// GET    /{id}              get_order (admin)
/// PUT    /{id}              update_order (admin)
/// POST   /{id}/extend       extend_order (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list_orders).post(orders::create_order))
        .route("/{id}", get(orders::get_order).put(orders::update_order))
        .route("/{id}/extend", post(orders::extend_order))
}
