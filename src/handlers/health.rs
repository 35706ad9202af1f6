//! Health check endpoint for service monitoring.

use crate::{db::DbPool, error::AppError};
use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Health check response: service status and database connectivity.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub timestamp: DateTime<Utc>,
}

/// Health check handler.
///
/// Verifies database connectivity with a trivial query.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "status": "healthy",
///   "database": "connected",
///   "timestamp": "2026-08-30T19:00:00Z"
/// }
/// ```
///
/// If the database is unreachable, returns the standard 500 error response.
pub async fn health_check(State(pool): State<DbPool>) -> Result<Json<HealthResponse>, AppError> {
    sqlx::query("SELECT 1").execute(&pool).await?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        database: "connected".to_string(),
        timestamp: Utc::now(),
    }))
}
