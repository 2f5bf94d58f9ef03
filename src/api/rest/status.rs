//! Identity and health endpoints

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::websocket::state::AppState;
use crate::utils::uptime_secs;

/// Server name reported by `GET /`
pub const SERVER_NAME: &str = "Minecraft-Roblox Relay Server";

/// Endpoint map advertised by `GET /`
#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub websocket: &'static str,
    pub blocks: &'static str,
    pub health: &'static str,
    pub scan: &'static str,
}

/// Response for GET /
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RootInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: Endpoints,
    pub connections: usize,
    pub minecraft_clients: usize,
}

/// Response for GET /health
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub connections: usize,
    pub minecraft_clients: usize,
    pub has_minecraft_data: bool,
    /// Seconds since the relay started
    pub uptime: f64,
}

/// Build the identity document served by a plain `GET /`
pub fn root_info(state: &AppState) -> RootInfo {
    RootInfo {
        message: SERVER_NAME,
        version: crate::VERSION,
        endpoints: Endpoints {
            websocket: "/ws",
            blocks: "/blocks",
            health: "/health",
            scan: "/scan",
        },
        connections: state.registry().count_all(),
        minecraft_clients: state.registry().count_producers(),
    }
}

/// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        connections: state.registry().count_all(),
        minecraft_clients: state.registry().count_producers(),
        has_minecraft_data: state.snapshot().is_present(),
        uptime: uptime_secs(state.started_at),
    })
}
