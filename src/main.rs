//! Relay Server - Binary Entry Point
//!
//! This is the main entry point for the relay-server binary.

use relay_server::{RelayConfig, RelayResult, RelayServer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> RelayResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = RelayConfig::from_env()?;
    tracing::info!(port = config.port, "Starting Minecraft-Roblox relay server");

    RelayServer::new(config).run().await
}
