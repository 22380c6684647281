//! Handlers for the shop settings singleton.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use rnr_core::reservation::clamp_reservation_days;
use rnr_db::models::settings::UpdateShopSettings;
use rnr_db::repositories::SettingsRepo;

use crate::error::AppResult;
use crate::middleware::admin::AdminToken;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/settings
///
/// Always succeeds; the default row is created on first read.
pub async fn get_settings(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let settings = SettingsRepo::get_or_init(&state.pool).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/v1/settings
///
/// Update the reservation duration. Values below 1 are clamped to 1.
pub async fn update_settings(
    _admin: AdminToken,
    State(state): State<AppState>,
    Json(input): Json<UpdateShopSettings>,
) -> AppResult<impl IntoResponse> {
    let days = clamp_reservation_days(input.reservation_days);
    let settings = SettingsRepo::set_reservation_days(&state.pool, days).await?;
    tracing::info!(reservation_days = settings.reservation_days, "Settings updated");
    Ok(Json(DataResponse { data: settings }))
}
