//! Admin gate extractor.
//!
//! Back-office endpoints require the `x-admin-token` header to match the
//! configured token. This is a plain boolean gate; session mechanics are
//! handled outside this service.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use rnr_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Proof that the request carried a valid admin token.
///
/// Use this as an extractor parameter in any handler restricted to the
/// back office:
///
/// ```ignore
/// async fn my_handler(_admin: AdminToken) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AdminToken;

impl FromRequestParts<AppState> for AdminToken {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("x-admin-token")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing x-admin-token header".into(),
                ))
            })?;

        if token != state.config.admin_token {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid admin token".into(),
            )));
        }

        Ok(AdminToken)
    }
}
