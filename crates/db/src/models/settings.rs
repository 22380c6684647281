//! Shop settings singleton model and DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The singleton row from `shop_settings` (id is always 1).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ShopSettings {
    pub id: i16,
    pub reservation_days: i32,
}

/// DTO for updating shop settings.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateShopSettings {
    pub reservation_days: i32,
}
