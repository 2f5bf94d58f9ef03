//! WebSocket module for relay connections
//!
//! Provides WebSocket endpoints at `/ws` and `/` for producers and viewers.
//!
//! ## Features
//! - Welcome message and latest snapshot on connect
//! - In-order routing of each connection's inbound frames
//! - Per-connection outbound queue; a dead writer makes sends fail fast

pub mod handler;
pub mod state;

pub use handler::ws_handler;
pub use state::AppState;
