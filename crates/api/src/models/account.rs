//! Account domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use bodega_core::{AccountId, CustomerId, Username};

/// A customer's account record.
///
/// The password hash is deliberately absent: it never leaves the data
/// layer, and API payloads are built from this type.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    /// Unique account ID.
    pub id: AccountId,
    /// Customer who owns this account (one account per customer).
    pub customer_id: CustomerId,
    /// Globally unique username.
    pub username: Username,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    pub username: Username,
    /// Argon2id PHC string, produced by the account service.
    pub password_hash: String,
}
