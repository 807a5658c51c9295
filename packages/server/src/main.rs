//! GeoDash server binary: read-only geospatial reporting API.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use geodash_server::config::NetworkConfig;
use geodash_server::db::PostgresDatabase;
use geodash_server::network::NetworkModule;
use geodash_server::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let app_config = AppConfig::from_env()?;
    let network_config = NetworkConfig::from_env();

    let db = PostgresDatabase::connect(&app_config.database_url).await?;
    info!(table = %app_config.map.table, "connected to database");

    let mut network = NetworkModule::new(network_config, Arc::new(db), Arc::new(app_config));
    let port = network.start().await?;
    info!(port, "reporting API listening");

    network.serve(shutdown_signal()).await
}

/// Resolves when ctrl-c is received, triggering graceful shutdown.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to install ctrl-c handler");
    }
}
