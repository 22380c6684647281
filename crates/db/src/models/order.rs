//! Order (reservation) entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use rnr_core::types::{DbId, Timestamp};

/// A row from the `orders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_notes: Option<String>,
    pub subtotal: f64,
    pub total: f64,
    pub status: String,
    pub reserved_until: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `order_items` table: a denormalized snapshot of the
/// product at reservation time, decoupled from the live product record.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderItem {
    pub id: DbId,
    pub order_id: DbId,
    pub product_id: DbId,
    pub name: String,
    pub price: f64,
    pub image: String,
    pub quantity: i32,
}

/// An order together with its line items, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Customer details on a reservation request.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerInput {
    pub name: String,
    pub phone: String,
    pub notes: Option<String>,
}

/// A requested line item on a reservation request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderItem {
    pub product_id: DbId,
    pub name: String,
    pub price: f64,
    pub image: String,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

/// DTO for creating a reservation (`POST /orders`).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrder {
    pub customer: CustomerInput,
    pub items: Vec<CreateOrderItem>,
}

/// DTO for updating an order (`PUT /orders/{id}`). All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOrder {
    pub status: Option<String>,
    pub reserved_until: Option<Timestamp>,
}
