//! Product domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use bodega_core::{Price, ProductId};

/// A product in the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Product display name.
    pub name: String,
    /// Non-negative unit price.
    pub price: Price,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a product.
#[derive(Debug, Clone)]
pub struct CreateProductInput {
    pub name: String,
    pub price: Price,
}
