//! TEnmo Server - Main Application Entry Point
//!
//! REST API for TE Bucks accounts and transfers: users register and log in,
//! send TE Bucks to each other, and request TE Bucks that the fund-holder
//! later approves or rejects.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx, or an in-memory store
//! - **Authentication**: bearer tokens with SHA-256 hashing
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create the store (Postgres pool + migrations, or in-memory)
//! 3. Build HTTP router with routes and middleware
//! 4. Start server on configured port

use std::sync::Arc;

use tenmo::{
    app::{self, AppState},
    config::Config,
    db, ledger,
    store::{MemoryStore, PgStore, Store},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG (defaults to "info")
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    ledger::validate_balance(config.starting_balance)?;
    tracing::info!("Configuration loaded");

    let store: Arc<dyn Store> = if config.uses_memory_store() {
        tracing::warn!("Using in-memory store; data is lost on shutdown");
        Arc::new(MemoryStore::new())
    } else {
        let pool = db::create_pool(&config.database_url).await?;
        tracing::info!("Database pool created");

        db::run_migrations(&pool).await?;
        tracing::info!("Database migrations complete");

        Arc::new(PgStore::new(pool))
    };

    let app = app::router(AppState::new(store, config.starting_balance));

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
