//! Loan page queries - the one read path in this service.
//!
//! Builds and runs the two queries behind every grid request: a count of the
//! full filtered result set and a page window of joined loan rows. The SQL
//! text varies only along compile-time constants (the sort allow-list and
//! the optional search predicate); every request-supplied value travels as a
//! bind parameter.
//!
//! # Count Correctness
//!
//! The count runs as its own query rather than a `count(*) over()` window
//! column on the page query. A window column disappears when the requested
//! page is past the end of the result set, which would leave the grid's pager
//! with no total to draw. A separate count holds for any page window.

use crate::{
    db::DbPool,
    error::AppError,
    models::loan::{LoanPage, LoanRow, PageRequest, SortDirection, SortField},
};

/// Join clause shared by the count and page queries.
///
/// Left joins keep loans visible even when the address or company foreign key
/// is null; those rows render with blank cells in the grid.
const FROM_CLAUSE: &str = "FROM loan l \
     LEFT JOIN address a ON l.address_id = a.id \
     LEFT JOIN company c ON l.company_id = c.id";

/// Search predicate, applied only when the client sent a search term.
///
/// Matches the grid's search box promise: company name or street address,
/// case-insensitive. `$1` is the LIKE pattern built by [`like_pattern`].
const SEARCH_CLAUSE: &str = "WHERE (c.name ILIKE $1 OR a.address_1 ILIKE $1)";

/// Build the count query for the full filtered result set.
fn count_sql(filtered: bool) -> String {
    if filtered {
        format!("SELECT count(*) {FROM_CLAUSE} {SEARCH_CLAUSE}")
    } else {
        format!("SELECT count(*) {FROM_CLAUSE}")
    }
}

/// Build the page query for one window of joined loan rows.
///
/// The ORDER BY column and direction come from the [`SortField`] and
/// [`SortDirection`] enums, so only allow-listed SQL ever lands in the query
/// text. `l.id` is appended as a tie-break so rows with equal sort keys land
/// on stable page boundaries.
fn page_sql(field: SortField, direction: SortDirection, filtered: bool) -> String {
    let (search, limit, offset) = if filtered {
        (SEARCH_CLAUSE, "$2", "$3")
    } else {
        ("", "$1", "$2")
    };

    format!(
        "SELECT l.id, l.amount, l.loan_term, l.loan_rate, \
         a.address_1, a.city, a.state, a.zip_code, \
         c.name AS company_name \
         {FROM_CLAUSE} {search} \
         ORDER BY {} {}, l.id ASC \
         LIMIT {limit} OFFSET {offset}",
        field.as_sql(),
        direction.as_sql(),
    )
}

/// Turn a search term into a LIKE pattern.
///
/// LIKE wildcards in the user's input are escaped so a search for "100%"
/// matches the literal text instead of everything starting with "100".
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Fetch one page of the loan grid.
///
/// # Process
///
/// 1. Count the full filtered result set
/// 2. Fetch the requested page window, sorted
///
/// The two queries run back to back on pool connections. The dataset is
/// read-only from this service's point of view, so no transaction is needed
/// to keep them consistent.
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `request` - Normalized page parameters (see `LoanListQuery::normalize`)
///
/// # Errors
///
/// - `Database`: the count or page query failed
pub async fn fetch_page(pool: &DbPool, request: &PageRequest) -> Result<LoanPage, AppError> {
    let pattern = request.search.as_deref().map(like_pattern);

    let total_count: i64 = match &pattern {
        Some(pattern) => {
            sqlx::query_scalar(&count_sql(true))
                .bind(pattern)
                .fetch_one(pool)
                .await?
        }
        None => sqlx::query_scalar(&count_sql(false)).fetch_one(pool).await?,
    };

    let sql = page_sql(request.sort_field, request.sort_direction, pattern.is_some());
    let mut query = sqlx::query_as::<_, LoanRow>(&sql);
    if let Some(pattern) = &pattern {
        query = query.bind(pattern);
    }
    let rows = query
        .bind(request.limit)
        .bind(request.offset)
        .fetch_all(pool)
        .await?;

    Ok(LoanPage { rows, total_count })
}
