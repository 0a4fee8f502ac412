use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

use draft_oracle::api::{self, AppState};
use draft_oracle::config::Config;
use draft_oracle::grid::{DraftSource, GridClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    // Series lookups need a GRID key; without one every draft is simulated
    let draft_source: Option<Arc<dyn DraftSource>> = match config.grid_api_key() {
        Some(key) => {
            let client = GridClient::new(
                &config.grid_central_url,
                key.to_string(),
                config.grid_timeout(),
                config.grid_max_retries,
                config.history_limit,
            )?;
            info!("GRID central-data source: {}", config.grid_central_url);
            Some(Arc::new(client))
        }
        None => {
            warn!("GRID_API_KEY not set – draft analysis runs in simulation mode only");
            None
        }
    };

    let app = api::router(AppState { draft_source });
    let addr: SocketAddr = config.listen_addr.parse()?;
    info!("Prediction API listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
