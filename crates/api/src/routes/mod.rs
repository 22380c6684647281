//! Route definitions.

pub mod health;
pub mod orders;
pub mod products;
pub mod settings;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /products                 list (public), create (admin)
/// /products/{id}            get (public), update, delete (admin)
///
/// /orders                   list (admin), create (public)
/// /orders/{id}              get, update (admin)
/// /orders/{id}/extend       extend deadline / reactivate (admin)
///
/// /settings                 get (public), update (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", products::router())
        .nest("/orders", orders::router())
        .nest("/settings", settings::router())
}
