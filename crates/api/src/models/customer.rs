//! Customer domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use bodega_core::{CustomerId, Email};

use crate::models::order::OrderWithProducts;

/// A storefront customer.
#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    /// Unique customer ID.
    pub id: CustomerId,
    /// Customer's display name.
    pub name: String,
    /// Customer's age in years.
    pub age: i32,
    /// Optional contact phone number.
    pub phone_number: Option<String>,
    /// Customer's email address.
    pub email: Email,
    /// When the customer was created.
    pub created_at: DateTime<Utc>,
    /// When the customer was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A customer together with their orders, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerWithOrders {
    #[serde(flatten)]
    pub customer: Customer,
    pub orders: Vec<OrderWithProducts>,
}

/// Validated input for creating a customer.
#[derive(Debug, Clone)]
pub struct CreateCustomerInput {
    pub name: String,
    pub age: i32,
    pub phone_number: Option<String>,
    pub email: Email,
}

/// Validated input for a partial customer update.
///
/// `None` means "leave the stored value unchanged".
#[derive(Debug, Clone, Default)]
pub struct UpdateCustomerInput {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub phone_number: Option<String>,
    pub email: Option<Email>,
}

impl UpdateCustomerInput {
    /// Whether the update carries no changes at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.phone_number.is_none()
            && self.email.is_none()
    }
}
