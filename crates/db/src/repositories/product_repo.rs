//! Repository for the `products` table.

use sqlx::postgres::PgExecutor;
use sqlx::PgPool;

use rnr_core::types::DbId;

use crate::models::product::{CreateProduct, Product, UpdateProduct};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, garment_type, size, category, price, image, images, \
    badge, description, featured, sold, reserved, created_at, updated_at";

/// Provides CRUD and availability-flag operations for products.
pub struct ProductRepo;

impl ProductRepo {
    // ── Standard CRUD ────────────────────────────────────────────────

    /// Insert a new product. `featured` defaults to `false`; both
    /// availability flags start `false`.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products
                (name, garment_type, size, category, price, image, images, badge, description, featured)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, false))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.name)
            .bind(&input.garment_type)
            .bind(&input.size)
            .bind(&input.category)
            .bind(input.price)
            .bind(&input.image)
            .bind(&input.images)
            .bind(&input.badge)
            .bind(&input.description)
            .bind(input.featured)
            .fetch_one(pool)
            .await
    }

    /// Find a product by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all products, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Product>(&query).fetch_all(pool).await
    }

    /// Update a product. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists. The `sold` /
    /// `reserved` fields here are the admin escape hatch; the lifecycle
    /// engine uses the conditional flag methods below instead.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET
                name = COALESCE($2, name),
                garment_type = COALESCE($3, garment_type),
                size = COALESCE($4, size),
                category = COALESCE($5, category),
                price = COALESCE($6, price),
                image = COALESCE($7, image),
                images = COALESCE($8, images),
                badge = COALESCE($9, badge),
                description = COALESCE($10, description),
                featured = COALESCE($11, featured),
                sold = COALESCE($12, sold),
                reserved = COALESCE($13, reserved),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.garment_type)
            .bind(&input.size)
            .bind(&input.category)
            .bind(input.price)
            .bind(&input.image)
            .bind(&input.images)
            .bind(&input.badge)
            .bind(&input.description)
            .bind(input.featured)
            .bind(input.sold)
            .bind(input.reserved)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a product by ID. Returns `true` if a row was
    /// removed. Order line items keep their snapshot regardless.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ── Availability flags (lifecycle engine primitives) ─────────────

    /// Atomically place a hold on an available unit.
    ///
    /// The admission gate: the WHERE clause makes the availability check
    /// and the flag write one conditional update, so of two racing
    /// callers exactly one sees `true` and the other sees `false`.
    pub async fn try_hold(exec: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE products SET reserved = true, updated_at = NOW() \
             WHERE id = $1 AND sold = false AND reserved = false",
        )
        .bind(id)
        .execute(exec)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Release a hold. Idempotent: releasing an unheld or missing
    /// product affects zero rows, which is not an error.
    pub async fn release_hold(exec: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE products SET reserved = false, updated_at = NOW() \
             WHERE id = $1 AND reserved = true",
        )
        .bind(id)
        .execute(exec)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Mark a unit as sold and clear its hold (pickup completed).
    pub async fn mark_sold(exec: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE products SET sold = true, reserved = false, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .execute(exec)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}
