//! Account registration service.
//!
//! Only the Argon2id hash of the password is ever persisted; the raw
//! credential exists for the duration of the request and no longer.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;
use thiserror::Error;

use bodega_core::{CustomerId, Username};

use crate::db::RepositoryError;
use crate::db::accounts::AccountRepository;
use crate::models::account::{Account, CreateAccountInput};

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

/// Account registration service.
///
/// Hashes credentials and delegates persistence to the account repository.
pub struct AccountService<'a> {
    accounts: AccountRepository<'a>,
}

impl<'a> AccountService<'a> {
    /// Create a new account service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            accounts: AccountRepository::new(pool),
        }
    }

    /// Register an account for a customer.
    ///
    /// The caller is responsible for field validation (username lexical
    /// rules, password length); this method hashes and persists.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::PasswordHash` if hashing fails, or a
    /// `RepositoryError` (duplicate username / existing account surfaces as
    /// `Conflict`) from the insert.
    pub async fn register(
        &self,
        customer_id: CustomerId,
        username: Username,
        password: &str,
    ) -> Result<Account, AccountError> {
        let password_hash = hash_password(password)?;

        let input = CreateAccountInput {
            username,
            password_hash,
        };

        Ok(self.accounts.create(customer_id, &input).await?)
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AccountError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AccountError::PasswordHash)
}
