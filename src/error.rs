//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and error message.
///
/// # Error Categories
///
/// - **Database Errors**: Any sqlx::Error from database operations
/// - **Validation Errors**: Invalid request parameters (bad sort field,
///   bad sort direction)
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    ///
    /// This wraps any sqlx::Error using the `#[from]` attribute, which
    /// automatically implements `From<sqlx::Error> for AppError`.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested sort field is not in the allow-list of sortable columns.
    ///
    /// Returns HTTP 400 Bad Request. The String is the rejected field name,
    /// echoed back so the caller can see what was wrong. The field name is
    /// never used to build SQL.
    #[error("Unknown sort field: {0}")]
    UnknownSortField(String),

    /// Request parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("Invalid request")]
    InvalidRequest(String),
}

/// Convert AppError into an HTTP response.
///
/// This implementation allows Axum handlers to return `Result<T, AppError>`
/// and have errors automatically converted to proper HTTP responses.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `UnknownSortField` → 400 Bad Request
/// - `InvalidRequest` → 400 Bad Request
/// - `Database` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map each error variant to (HTTP status, error code, message)
        let (status, code, message) = match self {
            AppError::UnknownSortField(_) => (
                StatusCode::BAD_REQUEST,
                "unknown_sort_field",
                self.to_string(),
            ),
            AppError::InvalidRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred".to_string(),
            ),
        };

        // Build JSON response body
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
