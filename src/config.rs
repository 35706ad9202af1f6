//! Application configuration management.
//!
//! Configuration comes entirely from environment variables (optionally via a
//! `.env` file), deserialized into a type-safe struct with the `envy` crate.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `MAX_DB_CONNECTIONS` (optional): connection pool size, defaults to 5
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_max_db_connections")]
    pub max_db_connections: u32,
}

fn default_port() -> u16 {
    3000
}

fn default_max_db_connections() -> u32 {
    5
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Loads a `.env` file first if one exists, then deserializes the
    /// environment into a `Config`.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a value cannot be
    /// parsed into its expected type.
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Field names are automatically converted: database_url -> DATABASE_URL
        envy::from_env::<Config>()
    }
}
