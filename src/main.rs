//! Loan Browser - Main Application Entry Point
//!
//! This is a small internal data browser: a REST API server that serves one page
//! of loan records at a time (joined with address and company data), plus the
//! HTML grid page that consumes it.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Format**: JSON responses, camelCase field names
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations
//! 4. Build HTTP router with routes and middleware
//! 5. Start server on configured port

mod config;
mod db;
mod error;
mod handlers;
mod models;
mod services;

use tracing_subscriber::EnvFilter;

use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Create database pool
    let pool = db::create_pool(&config.database_url, config.max_db_connections).await?;
    tracing::info!("Database pool created");

    // Run migrations
    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let app = Router::new()
        // The grid page itself
        .route("/", get(handlers::page::index))
        // Paginated loan data consumed by the grid
        .route("/api/v1/loans", get(handlers::loans::list_loans))
        // Liveness probe
        .route("/health", get(handlers::health::health_check))
        // Allow the grid data to be fetched from other internal tools
        .layer(CorsLayer::permissive())
        // Add distributed tracing middleware for observability
        .layer(TraceLayer::new_for_http())
        // Share database pool with all handlers via State extraction
        .with_state(pool);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Start serving HTTP requests
    // This blocks forever, handling requests concurrently with tokio
    axum::serve(listener, app).await?;

    Ok(())
}
