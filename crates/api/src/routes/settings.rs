//! Route definitions for the shop settings singleton.

use axum::routing::get;
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Settings routes, nested under `/settings`.
///
/// ```text
/// GET    /                  get_settings (public)
/// PUT    /                  update_settings (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(settings::get_settings).put(settings::update_settings),
    )
}
