//! # API Error Types
//!
//! [`AppError`] implements `axum::response::IntoResponse`. Ledger failures
//! keep their machine code; the HTTP status follows the failure kind.
//! Codec failures are logged and reported without their message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lran_core::LedgerError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "ACCESS_DENIED").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request body could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A ledger operation failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl AppError {
    /// HTTP status and machine-readable code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        let err = match self {
            Self::BadRequest(_) => return (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Ledger(err) => err,
        };
        let status = match err {
            LedgerError::AccessDenied { .. } => StatusCode::FORBIDDEN,
            LedgerError::Argument(_)
            | LedgerError::DateFormat(_)
            | LedgerError::UnknownFunction { .. } => StatusCode::BAD_REQUEST,
            LedgerError::AlreadyExists { .. }
            | LedgerError::Conflict { .. }
            | LedgerError::InvalidStage { .. } => StatusCode::CONFLICT,
            LedgerError::NotFound { .. } => StatusCode::NOT_FOUND,
            LedgerError::Identity(_) => StatusCode::UNAUTHORIZED,
            LedgerError::Downstream { .. } => StatusCode::BAD_GATEWAY,
            LedgerError::Codec(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, err.code())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "internal server error");
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}
