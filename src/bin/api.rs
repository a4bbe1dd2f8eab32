//! MoMo Dashboard API Server
//!
//! Run with: cargo run --bin momo-api
//!
//! # Configuration
//!
//! Read from the first config file found (`~/.config/momo/config.toml`,
//! `/etc/momo/config.toml`, `./config.toml`), falling back to the built-in
//! defaults. Environment variables override the file:
//! - `MOMO_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `MOMO_API_PORT`: Port to listen on (default: 5000)
//! - `MOMO_TRANSACTIONS_FILE`: Transaction XML or SMS backup export
//! - `MOMO_SNAPSHOT_FILE`: Pre-built snapshot document (optional)
//! - `MOMO_LOG_LEVEL`, `MOMO_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Full filter directive, wins over the configured level

use anyhow::Context;
use momo_dashboard::api::{serve, AppState};
use momo_dashboard::config::Config;
use momo_dashboard::ingest::{SmsClassifier, TransactionStore};
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    momo_dashboard::logging::init(&config.logging);

    tracing::info!("Starting MoMo Dashboard API server v{}", env!("CARGO_PKG_VERSION"));

    let classifier = SmsClassifier::new().context("Failed to compile SMS patterns")?;

    let transactions_file = Path::new(&config.data.transactions_file);
    tracing::info!("Transactions file: {:?}", transactions_file);
    let store = TransactionStore::load(transactions_file, &classifier)
        .with_context(|| format!("Failed to load {}", transactions_file.display()))?;

    if store.is_empty() {
        tracing::warn!("No transactions loaded; the dashboard will be empty");
    }

    let mut state = AppState::new(store, config.api.clone());
    if let Some(path) = &config.data.snapshot_file {
        tracing::info!("Serving snapshot document from {:?}", path);
        state = state.with_snapshot_file(path);
    }

    // Run server
    tracing::info!("Starting server on {}:{}", config.api.host, config.api.port);
    serve(state, &config.api).await?;

    tracing::info!("MoMo Dashboard API server stopped");

    Ok(())
}
