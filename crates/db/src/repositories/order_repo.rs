//! Repository for the `orders` and `order_items` tables.

use std::collections::HashMap;

use sqlx::postgres::PgExecutor;
use sqlx::{PgConnection, PgPool};

use rnr_core::types::{DbId, Timestamp};

use crate::models::order::{CreateOrderItem, CustomerInput, Order, OrderItem, OrderWithItems};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, customer_name, customer_phone, customer_notes, \
    subtotal, total, status, reserved_until, created_at, updated_at";

const ITEM_COLUMNS: &str = "id, order_id, product_id, name, price, image, quantity";

/// Provides CRUD and lifecycle operations for orders.
pub struct OrderRepo;

impl OrderRepo {
    // ── Inserts (composed into the engine's transaction) ─────────────

    /// Insert a new order with status `reserved`.
    pub async fn insert_order(
        exec: impl PgExecutor<'_>,
        customer: &CustomerInput,
        subtotal: f64,
        total: f64,
        reserved_until: Timestamp,
    ) -> Result<Order, sqlx::Error> {
        let query = format!(
            "INSERT INTO orders
                (customer_name, customer_phone, customer_notes, subtotal, total, reserved_until)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(&customer.name)
            .bind(&customer.phone)
            .bind(&customer.notes)
            .bind(subtotal)
            .bind(total)
            .bind(reserved_until)
            .fetch_one(exec)
            .await
    }

    /// Insert the line-item snapshots for an order.
    pub async fn insert_items(
        conn: &mut PgConnection,
        order_id: DbId,
        items: &[CreateOrderItem],
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        let query = format!(
            "INSERT INTO order_items (order_id, product_id, name, price, image, quantity)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {ITEM_COLUMNS}"
        );
        let mut inserted = Vec::with_capacity(items.len());
        for item in items {
            let row = sqlx::query_as::<_, OrderItem>(&query)
                .bind(order_id)
                .bind(item.product_id)
                .bind(&item.name)
                .bind(item.price)
                .bind(&item.image)
                .bind(item.quantity)
                .fetch_one(&mut *conn)
                .await?;
            inserted.push(row);
        }
        Ok(inserted)
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Find an order by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an order with its line items.
    pub async fn find_with_items(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<OrderWithItems>, sqlx::Error> {
        let Some(order) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let items = Self::items_for(pool, id).await?;
        Ok(Some(OrderWithItems { order, items }))
    }

    /// List all orders with their line items, newest first.
    pub async fn list_with_items(pool: &PgPool) -> Result<Vec<OrderWithItems>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders ORDER BY created_at DESC, id DESC");
        let orders = sqlx::query_as::<_, Order>(&query).fetch_all(pool).await?;

        let ids: Vec<DbId> = orders.iter().map(|o| o.id).collect();
        let item_query =
            format!("SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = ANY($1) ORDER BY id");
        let items = sqlx::query_as::<_, OrderItem>(&item_query)
            .bind(&ids)
            .fetch_all(pool)
            .await?;

        let mut by_order: HashMap<DbId, Vec<OrderItem>> = HashMap::new();
        for item in items {
            by_order.entry(item.order_id).or_default().push(item);
        }

        Ok(orders
            .into_iter()
            .map(|order| {
                let items = by_order.remove(&order.id).unwrap_or_default();
                OrderWithItems { order, items }
            })
            .collect())
    }

    /// Fetch the line items for an order.
    pub async fn items_for(
        exec: impl PgExecutor<'_>,
        order_id: DbId,
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        let query = format!("SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = $1 ORDER BY id");
        sqlx::query_as::<_, OrderItem>(&query)
            .bind(order_id)
            .fetch_all(exec)
            .await
    }

    // ── Lifecycle operations ─────────────────────────────────────────

    /// Re-read an order inside a transaction, taking a row lock so a
    /// concurrent status change on the same order serializes behind us.
    pub async fn lock_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Persist a status change and (optionally) a new deadline.
    pub async fn update_status(
        exec: impl PgExecutor<'_>,
        id: DbId,
        status: &str,
        reserved_until: Option<Timestamp>,
    ) -> Result<Order, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET
                status = $2,
                reserved_until = COALESCE($3, reserved_until),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(status)
            .bind(reserved_until)
            .fetch_one(exec)
            .await
    }

    /// IDs of active reservations whose deadline has passed.
    pub async fn find_expired_ids(pool: &PgPool) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT id FROM orders \
             WHERE status = 'reserved' AND reserved_until < NOW() \
             ORDER BY id",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    /// Compare-and-swap expiry: flips a reservation to `expired` only if
    /// it is still `reserved` and still past its deadline. Returns
    /// `false` when another sweeper (or an admin) got there first.
    pub async fn expire_if_due(exec: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE orders SET status = 'expired', updated_at = NOW() \
             WHERE id = $1 AND status = 'reserved' AND reserved_until < NOW()",
        )
        .bind(id)
        .execute(exec)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}
