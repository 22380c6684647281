//! Product entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use rnr_core::types::{DbId, Timestamp};

/// A row from the `products` table.
///
/// Each product is a single physical unit: `sold` is terminal,
/// `reserved` is held by at most one active order at a time.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub garment_type: String,
    pub size: String,
    pub category: String,
    pub price: f64,
    pub image: String,
    pub images: Vec<String>,
    pub badge: Option<String>,
    pub description: Option<String>,
    pub featured: bool,
    pub sold: bool,
    pub reserved: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new product.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub garment_type: String,
    pub size: String,
    pub category: String,
    pub price: f64,
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub badge: Option<String>,
    pub description: Option<String>,
    pub featured: Option<bool>,
}

/// DTO for updating a product. All fields optional.
///
/// Includes the availability flags as an admin escape hatch; flag
/// changes made here bypass the lifecycle engine's bookkeeping.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub garment_type: Option<String>,
    pub size: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    pub badge: Option<String>,
    pub description: Option<String>,
    pub featured: Option<bool>,
    pub sold: Option<bool>,
    pub reserved: Option<bool>,
}
