//! Error types for the employee API
//!
//! Provides unified error handling using thiserror.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == App Error Enum ==
/// Unified error type for the employee API.
///
/// Server-side variants are rendered with a generic message; callers log the
/// detail with their own context before converting.
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed or missing request fields
    #[error("Invalid employee data: {0}")]
    Validation(String),

    /// Identifier below 1
    #[error("Invalid ID: {0}")]
    InvalidId(i64),

    /// No employee with this identifier
    #[error("Employee not found: {0}")]
    NotFound(i64),

    /// Backing store failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be mapped back to an employee
    #[error("Corrupt employee record: {0}")]
    CorruptRecord(String),

    /// Waiting for the cache fill gate took too long
    #[error("Timed out after {0:?} waiting for the cache gate")]
    GateTimeout(Duration),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidId(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::GateTimeout(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database(_) | AppError::CorruptRecord(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::Validation(_) => "Invalid employee data".to_string(),
            AppError::InvalidId(_) => "Invalid ID".to_string(),
            AppError::NotFound(_) => "Employee not found".to_string(),
            AppError::GateTimeout(_) => "The service is busy, please retry".to_string(),
            AppError::Database(_) | AppError::CorruptRecord(_) | AppError::Internal(_) => {
                "An internal error occurred".to_string()
            }
        };

        let mut body = json!({ "error": message });
        if let AppError::Validation(detail) = &self {
            body["detail"] = json!(detail);
        }

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the employee API.
pub type Result<T> = std::result::Result<T, AppError>;
