//! REST API module for HTTP endpoints
//!
//! - `GET /` - Server identity, endpoint list and counts
//! - `GET /health` - Liveness and connection counts
//! - `GET /blocks` - Latest producer payload
//! - `POST /scan` - Ask every producer to resend its data

pub mod blocks;
pub mod scan;
pub mod status;

/// Message returned when no producer is connected
pub const NO_PRODUCERS_MESSAGE: &str = "No Minecraft clients connected";

/// Message returned when no snapshot has been received
pub const NO_DATA_MESSAGE: &str = "No Minecraft data available";
