//! TEnmo console client.
//!
//! Talks to the server at `TENMO_API_BASE_URL` (default
//! `http://localhost:8080/`). Logs go to stderr so they do not interleave
//! with the menus; set `RUST_LOG` to see more than warnings.

use std::io;

use tenmo::client::{ApiClient, App, ClientConfig, Console};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let config = ClientConfig::from_env()?;
    let api = ApiClient::new(&config.api_base_url)?;
    tracing::info!("Using TEnmo server at {}", api.base_url());

    let console = Console::new(io::stdin().lock(), io::stdout());
    App::new(api, console).run().await?;

    Ok(())
}
