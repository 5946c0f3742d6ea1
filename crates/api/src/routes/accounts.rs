//! Account management handlers.
//!
//! These manage the account record (username + hashed credential) attached
//! to a customer. There is no login or session surface.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;

use bodega_core::{CustomerId, Username};

use crate::db::{AccountRepository, CustomerRepository};
use crate::error::{ApiJson, AppError, Result, ValidationErrors};
use crate::models::account::Account;
use crate::services::accounts::{AccountService, MIN_PASSWORD_LENGTH};
use crate::state::AppState;

/// Request body for creating an account.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    username: Option<String>,
    password: Option<String>,
}

impl CreateAccountRequest {
    fn validate(self) -> Result<(Username, String)> {
        let Self { username, password } = self;

        let mut errors = ValidationErrors::default();

        let username = match username {
            Some(username) => match Username::parse(&username) {
                Ok(username) => Some(username),
                Err(e) => {
                    errors.add("username", e.to_string());
                    None
                }
            },
            None => {
                errors.add("username", "username is required");
                None
            }
        };

        let password = match password {
            Some(password) if password.len() >= MIN_PASSWORD_LENGTH => Some(password),
            Some(_) => {
                errors.add(
                    "password",
                    format!("password must be at least {MIN_PASSWORD_LENGTH} characters"),
                );
                None
            }
            None => {
                errors.add("password", "password is required");
                None
            }
        };

        match (username, password) {
            (Some(username), Some(password)) => Ok((username, password)),
            _ => Err(AppError::Validation(errors)),
        }
    }
}

/// Create an account for a customer.
///
/// # Errors
///
/// 404 if the customer does not exist, 400 if validation fails, if the
/// username is taken, or if the customer already has an account.
pub async fn create(
    State(state): State<AppState>,
    Path(customer_id): Path<CustomerId>,
    ApiJson(body): ApiJson<CreateAccountRequest>,
) -> Result<(StatusCode, Json<Account>)> {
    let (username, password) = body.validate()?;

    if !CustomerRepository::new(state.pool())
        .exists(customer_id)
        .await?
    {
        return Err(AppError::NotFound(format!(
            "customer {customer_id} not found"
        )));
    }

    let account = AccountService::new(state.pool())
        .register(customer_id, username, &password)
        .await?;

    tracing::info!(customer_id = %customer_id, account_id = %account.id, "account created");

    Ok((StatusCode::CREATED, Json(account)))
}

/// Get the account owned by a customer.
///
/// # Errors
///
/// 404 if the customer does not exist or has no account.
pub async fn show(
    State(state): State<AppState>,
    Path(customer_id): Path<CustomerId>,
) -> Result<Json<Account>> {
    let account = AccountRepository::new(state.pool())
        .get_by_customer(customer_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no account for customer {customer_id}")))?;

    Ok(Json(account))
}

/// Delete the account owned by a customer.
///
/// # Errors
///
/// 404 if the customer has no account.
pub async fn destroy(
    State(state): State<AppState>,
    Path(customer_id): Path<CustomerId>,
) -> Result<StatusCode> {
    let deleted = AccountRepository::new(state.pool())
        .delete_by_customer(customer_id)
        .await?;

    if !deleted {
        return Err(AppError::NotFound(format!(
            "no account for customer {customer_id}"
        )));
    }

    tracing::info!(customer_id = %customer_id, "account deleted");

    Ok(StatusCode::NO_CONTENT)
}
