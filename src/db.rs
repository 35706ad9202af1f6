//! Database connection pool and migration management.

use sqlx::{Pool, Postgres};

/// Type alias for the PostgreSQL connection pool shared across handlers.
pub type DbPool = Pool<Postgres>;

/// Create a new PostgreSQL connection pool.
///
/// The pool is shared across all HTTP requests; connections are created
/// lazily up to `max_connections` and reused, instead of the
/// connect-per-request pattern this service replaced.
///
/// # Errors
///
/// Returns an error if the connection string is invalid or the server cannot
/// be reached.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Run database migrations from the `migrations/` directory.
///
/// Migration files are embedded at compile time and tracked in the
/// `_sqlx_migrations` table, so each migration runs only once.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
