//! Order domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use bodega_core::{CustomerId, OrderId, OrderStatus};

use crate::models::product::Product;

/// An order owned by a customer.
///
/// An order with [`OrderStatus::Open`] status is the customer's cart.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Customer who owns this order.
    pub customer_id: CustomerId,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
    /// When the order was last updated.
    pub updated_at: DateTime<Utc>,
}

/// An order together with its products, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithProducts {
    #[serde(flatten)]
    pub order: Order,
    pub products: Vec<Product>,
}
