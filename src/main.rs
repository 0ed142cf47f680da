use anyhow::Result;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use price_tracker::config::Config;
use price_tracker::server::{build_router, AppState};
use price_tracker::storage::SqliteStorage;
use price_tracker::utils;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("price_tracker=info".parse()?),
        )
        .init();

    info!("Starting Price Tracker");

    // Load configuration
    let config = Arc::new(Config::load()?);

    // Storage must be reachable before any request is accepted
    let storage = Arc::new(SqliteStorage::new(&config.database_path).await?);
    storage.migrate().await?;

    // HTTP client with connection pooling
    let client = utils::http::create_client(&config)?;

    let state = AppState {
        config: config.clone(),
        storage,
        client,
    };
    let app = build_router(state);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
