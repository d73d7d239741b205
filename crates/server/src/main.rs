//! Digibank API Server

use anyhow::{Context, Result};
use digibank_persistence::Database;
use digibank_server::{create_router, AppConfig, AppState};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = Database::connect(&config.database_url, &config.pool_settings())
        .await
        .context("Failed to open database")?;

    let app = create_router(AppState::new(&db, &config));

    let addr: SocketAddr = config.bind_address().parse()?;
    tracing::info!(
        allow_self_transfer = config.allow_self_transfer,
        "🏦 Digibank API starting at http://{}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
