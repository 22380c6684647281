//! Repository for the `shop_settings` singleton.

use sqlx::PgPool;

use rnr_core::reservation::DEFAULT_RESERVATION_DAYS;

use crate::models::settings::ShopSettings;

/// Provides read/write access to the shop settings singleton row.
pub struct SettingsRepo;

impl SettingsRepo {
    /// Read the settings, creating the default row on first access.
    pub async fn get_or_init(pool: &PgPool) -> Result<ShopSettings, sqlx::Error> {
        sqlx::query_as::<_, ShopSettings>(
            "INSERT INTO shop_settings (id, reservation_days) VALUES (1, $1) \
             ON CONFLICT (id) DO UPDATE SET id = shop_settings.id \
             RETURNING id, reservation_days",
        )
        .bind(DEFAULT_RESERVATION_DAYS)
        .fetch_one(pool)
        .await
    }

    /// Upsert the reservation duration. Callers clamp the value first.
    pub async fn set_reservation_days(
        pool: &PgPool,
        days: i32,
    ) -> Result<ShopSettings, sqlx::Error> {
        sqlx::query_as::<_, ShopSettings>(
            "INSERT INTO shop_settings (id, reservation_days) VALUES (1, $1) \
             ON CONFLICT (id) DO UPDATE SET reservation_days = EXCLUDED.reservation_days \
             RETURNING id, reservation_days",
        )
        .bind(days)
        .fetch_one(pool)
        .await
    }
}
