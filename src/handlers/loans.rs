//! Loan list HTTP handler.
//!
//! This module implements the one data endpoint the grid talks to:
//! - GET /api/v1/loans - One page of joined loan rows plus the total count

use crate::{
    db::DbPool,
    error::AppError,
    models::loan::{LoanListQuery, LoanPage},
    services::loan_service,
};
use axum::{
    Json,
    extract::{Query, State},
};

/// List one page of loans.
///
/// # Endpoint
///
/// `GET /api/v1/loans`
///
/// # Query Parameters
///
/// All optional; see `LoanListQuery::normalize` for defaults and clamping.
///
/// - `page` - zero-based page index
/// - `pageSize` - rows per page (clamped to 1..=100)
/// - `search` - case-insensitive substring filter on company name or street address
/// - `field` - grid column to sort by (allow-listed camelCase names)
/// - `sort` - `asc` or `desc`
///
/// # Response
///
/// - **Success (200 OK)**: One page of rows plus the total filtered count
/// - **Error (400)**: Unknown sort field or direction
/// - **Error (500)**: Database error
///
/// ```json
/// {
///   "rows": [
///     {
///       "id": 1,
///       "amount": 250000,
///       "loanTerm": 360,
///       "loanRate": 4.125,
///       "address1": "12 Main St",
///       "city": "Austin",
///       "state": "TX",
///       "zipCode": "78701",
///       "companyName": "Acme Lending"
///     }
///   ],
///   "totalCount": 137
/// }
/// ```
///
/// `totalCount` is the size of the full filtered set, independent of the
/// page window, so the grid can always draw its pager.
///
/// # Arguments
///
/// * `State(pool)` - Database connection pool (injected by Axum)
/// * `Query(query)` - Raw query-string parameters
pub async fn list_loans(
    State(pool): State<DbPool>,
    Query(query): Query<LoanListQuery>,
) -> Result<Json<LoanPage>, AppError> {
    // Validate sort inputs and clamp the page window before touching the db
    let request = query.normalize()?;

    let page = loan_service::fetch_page(&pool, &request).await?;

    Ok(Json(page))
}
