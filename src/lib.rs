//! Minecraft-Roblox Relay Server
//!
//! Relays producer data between real-time WebSocket clients and exposes a
//! small HTTP surface for polling the latest payload and triggering rescans.
//!
//! # Features
//!
//! - **Fan-out**: Producer payloads reach every other connection verbatim
//! - **Late join**: New connections receive the latest snapshot immediately
//! - **Targeted rescans**: Scan requests go to producers only
//! - **Self-healing**: Peers whose sends fail are pruned on the spot
//!
//! # Modules
//!
//! - `relay`: Registry, classifier, router and snapshot store
//! - `api`: Axum HTTP endpoints and WebSocket handler
//! - `server`: Listener and lifecycle
//! - `config`: Environment-driven configuration
//! - `error`: Startup and serving errors
//! - `utils`: Timestamp helpers
//!
//! # Example
//!
//! ```no_run
//! use relay_server::{RelayConfig, RelayServer};
//!
//! #[tokio::main]
//! async fn main() -> relay_server::RelayResult<()> {
//!     let config = RelayConfig::from_env()?;
//!     RelayServer::new(config).run().await
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod relay;
pub mod server;
pub mod utils;

// Re-export commonly used items at crate root
pub use api::{create_router, AppState};
pub use config::RelayConfig;
pub use error::{RelayError, RelayResult};
pub use relay::{
    classify, BroadcastRouter, ClassifiedMessage, ConnectionHandle, ConnectionId,
    ConnectionRegistry, ControlMessage, Delivery, RouteOutcome, Snapshot, SnapshotStore,
};
pub use server::{RelayServer, ServerHandle};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
