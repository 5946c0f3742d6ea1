//! Account repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use bodega_core::{AccountId, CustomerId, Username};

use super::RepositoryError;
use crate::models::account::{Account, CreateAccountInput};

const ACCOUNT_COLUMNS: &str = "id, customer_id, username, created_at, updated_at";

/// Internal row type for account queries.
///
/// The password hash is never selected into this type; it stays in the
/// database.
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: i32,
    customer_id: i32,
    username: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = RepositoryError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let username = Username::parse(&row.username).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid username in database: {e}"))
        })?;

        Ok(Self {
            id: AccountId::new(row.id),
            customer_id: CustomerId::new(row.customer_id),
            username,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for account database operations.
pub struct AccountRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AccountRepository<'a> {
    /// Create a new account repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert an account for a customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username is taken or the
    /// customer already has an account, `RepositoryError::Database` for
    /// other database errors.
    pub async fn create(
        &self,
        customer_id: CustomerId,
        input: &CreateAccountInput,
    ) -> Result<Account, RepositoryError> {
        let row: AccountRow = sqlx::query_as(&format!(
            "INSERT INTO shop.account (customer_id, username, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(customer_id)
        .bind(input.username.as_str())
        .bind(&input.password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                let message = match db_err.constraint() {
                    Some("account_username_key") => "username already taken",
                    Some("account_customer_id_key") => "customer already has an account",
                    _ => "account already exists",
                };
                return RepositoryError::Conflict(message.to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    /// Get the account owned by a customer, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<Account>, RepositoryError> {
        let row: Option<AccountRow> = sqlx::query_as(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM shop.account WHERE customer_id = $1"
        ))
        .bind(customer_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Delete the account owned by a customer.
    ///
    /// Returns `true` if a row was deleted, `false` if the customer had no
    /// account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM shop.account WHERE customer_id = $1")
            .bind(customer_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
