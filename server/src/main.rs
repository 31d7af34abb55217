//! licvault server: per-project license certificate store
//!
//! Configuration is read from the JSON file named by `LICVAULT_CONFIG`;
//! built-in defaults apply when it is unset.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use licvault::{load_config, Config};
use tracing::info;

use licvault_server::{build_router, logging, AppState};

const CONFIG_ENV: &str = "LICVAULT_CONFIG";

#[tokio::main]
async fn main() -> Result<()> {
    let config = match std::env::var_os(CONFIG_ENV) {
        Some(path) => load_config(&path)
            .with_context(|| format!("Failed to load configuration from {:?}", path))?,
        None => Config::default(),
    };

    logging::init_logging(&config.logging)?;
    info!("Starting licvault server v{}", env!("CARGO_PKG_VERSION"));

    let state = Arc::new(AppState::new(&config)?);
    let app = build_router(state, config.server.max_upload_bytes);

    let addr: SocketAddr = config
        .server
        .bind_address
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind_address))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
