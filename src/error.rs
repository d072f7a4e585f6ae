//! Error types and HTTP error response handling.
//!
//! This module defines all server errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::ledger::LedgerError;

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Persistence Errors**: connectivity or query failures from sqlx
/// - **Authentication Errors**: missing/invalid bearer token, bad credentials
/// - **Lookup Errors**: list-not-found and entity-not-found
/// - **Write Errors**: update-failed (zero rows affected), creation-failed
/// - **Ledger Errors**: a transfer or balance breaks a ledger rule
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Bearer token is missing or unknown.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Invalid or missing token")]
    InvalidToken,

    /// Username/password pair did not match.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Authenticated user is not allowed to act on this resource.
    ///
    /// Returns HTTP 403 Forbidden.
    #[error("Forbidden")]
    Forbidden,

    #[error("No accounts found")]
    AccountListNotFound,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Transfer not found")]
    TransferNotFound,

    #[error("User not found")]
    UserNotFound,

    /// Update statement affected zero rows.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("{0}")]
    UpdateFailed(String),

    /// Insert did not return the created row.
    ///
    /// Returns HTTP 500 Internal Server Error.
    #[error("{0}")]
    CreationFailed(String),

    #[error("Username is already taken")]
    UsernameTaken,

    /// Transfer or balance breaks a ledger rule.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Invalid request")]
    InvalidRequest(String),
}

/// JSON body of every error response.
///
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// Shared with the console client, which parses it back out of failed
/// responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl AppError {
    /// HTTP status and machine-readable code for this error.
    ///
    /// # Status Code Mapping
    ///
    /// - `InvalidToken`, `InvalidCredentials` → 401 Unauthorized
    /// - `Forbidden` → 403 Forbidden
    /// - not-found variants and `UpdateFailed` → 404 Not Found
    /// - `InvalidRequest` and shape-level ledger errors (including sub-cent
    ///   amounts and out-of-range balances) → 400 Bad Request
    /// - `InsufficientFunds` → 422 Unprocessable Entity
    /// - `InvalidTransition`, `UsernameTaken` → 409 Conflict
    /// - `CreationFailed`, `Database` → 500 Internal Server Error
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token"),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid_credentials"),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "forbidden"),
            AppError::AccountListNotFound => (StatusCode::NOT_FOUND, "account_list_not_found"),
            AppError::AccountNotFound => (StatusCode::NOT_FOUND, "account_not_found"),
            AppError::TransferNotFound => (StatusCode::NOT_FOUND, "transfer_not_found"),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "user_not_found"),
            AppError::UpdateFailed(_) => (StatusCode::NOT_FOUND, "update_failed"),
            AppError::CreationFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, "creation_failed"),
            AppError::UsernameTaken => (StatusCode::CONFLICT, "username_taken"),
            AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            AppError::Ledger(err) => match err {
                LedgerError::NonPositiveAmount => (StatusCode::BAD_REQUEST, "non_positive_amount"),
                LedgerError::SelfTransfer => (StatusCode::BAD_REQUEST, "self_transfer"),
                LedgerError::NegativeBalance => (StatusCode::BAD_REQUEST, "negative_balance"),
                LedgerError::SubCentPrecision => (StatusCode::BAD_REQUEST, "sub_cent_precision"),
                LedgerError::BalanceOutOfRange => {
                    (StatusCode::BAD_REQUEST, "balance_out_of_range")
                }
                LedgerError::InsufficientFunds => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "insufficient_funds")
                }
                LedgerError::InvalidTransition { .. } => {
                    (StatusCode::CONFLICT, "invalid_transition")
                }
            },
        }
    }
}

/// Convert AppError into an HTTP response.
///
/// Server-side failures are logged and their details hidden from the client.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            AppError::Database(err) => {
                tracing::error!("Database error: {err}");
                "An internal error occurred".to_string()
            }
            AppError::CreationFailed(msg) => {
                tracing::error!("Creation failed: {msg}");
                "An internal error occurred".to_string()
            }
            AppError::InvalidRequest(msg) => msg.clone(),
            other => other.to_string(),
        };

        let body = Json(ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::transfer::{TransferStatus, TransferType};

    #[test]
    fn lookup_and_update_failures_are_not_found() {
        assert_eq!(AppError::AccountListNotFound.status_and_code().0, StatusCode::NOT_FOUND);
        assert_eq!(AppError::TransferNotFound.status_and_code().0, StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::UpdateFailed("no rows".into()).status_and_code().0,
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn creation_failure_is_a_server_error() {
        let (status, code) = AppError::CreationFailed("insert".into()).status_and_code();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "creation_failed");
    }

    #[test]
    fn ledger_errors_keep_distinct_statuses() {
        let funds: AppError = LedgerError::InsufficientFunds.into();
        let repeat: AppError = LedgerError::InvalidTransition {
            kind: TransferType::Request,
            current: TransferStatus::Approved,
            requested: TransferStatus::Approved,
        }
        .into();

        assert_eq!(funds.status_and_code().0, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(repeat.status_and_code().0, StatusCode::CONFLICT);
        assert_eq!(
            AppError::from(LedgerError::SelfTransfer).status_and_code().0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(LedgerError::SubCentPrecision).status_and_code(),
            (StatusCode::BAD_REQUEST, "sub_cent_precision")
        );
    }
}
