//! Error handling module
//!
//! Centralized HTTP error type and response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::{ErrorKind, LedgerError};

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // Ledger outcomes, including store failures (5xx)
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AppError {
    /// HTTP status and machine-readable code for this error
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            AppError::Ledger(e) => {
                let kind = e.kind();
                let status = match kind {
                    ErrorKind::InvalidAmount => StatusCode::BAD_REQUEST,
                    ErrorKind::NotFound => StatusCode::NOT_FOUND,
                    ErrorKind::AlreadyExists | ErrorKind::InsufficientFunds => {
                        StatusCode::CONFLICT
                    }
                    ErrorKind::Store => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, kind.code())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();

        let (error, details) = match &self {
            // 400 Bad Request
            AppError::InvalidRequest(msg) => {
                ("Invalid request".to_string(), Some(msg.clone()))
            }

            // 500 Internal Server Error: log the cause, return nothing internal
            AppError::Ledger(e) if e.kind() == ErrorKind::Store => {
                tracing::error!(
                    outcome_unknown = e.is_outcome_unknown(),
                    "Store error: {:?}",
                    e
                );
                ("Internal server error".to_string(), None)
            }

            // 4xx ledger outcomes
            AppError::Ledger(e) => {
                tracing::debug!(error_code, "Ledger rejected request: {}", e);
                (e.to_string(), None)
            }
        };

        let body = ErrorResponse {
            error,
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
