//! Unified error handling at the handler boundary.
//!
//! All route handlers return `Result<T, AppError>`. The `IntoResponse` impl
//! maps each failure to its HTTP status and JSON body: validation failures
//! carry a field-to-message map, everything else a `{"message": ...}`
//! envelope. Persistence failures answer with a stable generic message and
//! log the detail internally.

use std::collections::BTreeMap;

use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::accounts::AccountError;

/// Application-level error type for the storefront API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request body failed field validation.
    #[error("validation failed")]
    Validation(ValidationErrors),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Business-rule conflict (e.g. product already in cart).
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// Malformed request (e.g. a body that is not valid JSON).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Database operation failed.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Account service operation failed.
    #[error("account error: {0}")]
    Account(#[from] AccountError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) | Self::Duplicate(_) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Repository(err) => repository_status(err),
            Self::Account(err) => match err {
                AccountError::Repository(repo) => repository_status(repo),
                AccountError::PasswordHash => StatusCode::INTERNAL_SERVER_ERROR,
            },
        };

        // Log server faults with full detail; the client only sees a
        // generic message
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Request error");
        }

        let body = match self {
            Self::Validation(errors) => json!(errors),
            Self::NotFound(message) | Self::Duplicate(message) | Self::BadRequest(message) => {
                json!({ "message": message })
            }
            Self::Repository(err) => json!({ "message": repository_message(&err) }),
            Self::Account(err) => match err {
                AccountError::Repository(repo) => json!({ "message": repository_message(&repo) }),
                AccountError::PasswordHash => json!({ "message": "Internal server error" }),
            },
        };

        (status, Json(body)).into_response()
    }
}

const fn repository_status(err: &RepositoryError) -> StatusCode {
    match err {
        RepositoryError::NotFound => StatusCode::NOT_FOUND,
        RepositoryError::Conflict(_) => StatusCode::BAD_REQUEST,
        RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn repository_message(err: &RepositoryError) -> String {
    match err {
        RepositoryError::NotFound => "not found".to_owned(),
        RepositoryError::Conflict(message) => message.clone(),
        RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
            "Internal server error".to_owned()
        }
    }
}

/// Field-to-message map returned as the body of a 400 validation failure.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<&'static str, String>);

impl ValidationErrors {
    /// Record a validation failure for a field.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Whether any failure has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

/// JSON extractor whose rejection is an [`AppError`].
///
/// A body that is missing, not JSON, or of the wrong shape answers 400 with
/// the usual message envelope instead of axum's default 422.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
