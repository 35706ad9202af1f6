//! Data models representing database entities and API types.

/// Loan records and the paginated page result
pub mod loan;
