//! Business logic shared by HTTP handlers.

/// Paginated loan query construction and execution
pub mod loan_service;
