//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (query params, etc.)
//! 2. Performs business logic (database queries, validation)
//! 3. Returns HTTP response (JSON, status code)
/// Liveness probe
pub mod health;
/// Paginated loan list endpoint
pub mod loans;
/// The grid page
pub mod page;
