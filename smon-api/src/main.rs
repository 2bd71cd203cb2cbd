//! smon-api - Social activity monitor HTTP service
//!
//! Ingests heterogeneous activity records, persists the normalized form,
//! and serves aggregate statistics and exports over the filtered set.

use std::net::SocketAddr;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use smon_api::config::Config;
use smon_api::{build_router, db, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = Config::parse();

    info!(
        "Starting Social Activity Monitor API (smon-api) v{}",
        env!("CARGO_PKG_VERSION")
    );

    if let Some(parent) = config.database.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let pool = db::connect(&config.database).await?;
    info!("Database path: {}", config.database.display());

    let state = AppState::new(pool);
    let app = build_router(state);

    let addr = SocketAddr::new(config.bind, config.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("smon-api listening on http://{addr}");
    info!("Health check: http://{addr}/api/health");

    axum::serve(listener, app).await?;

    Ok(())
}
