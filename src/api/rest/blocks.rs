//! Snapshot polling endpoint

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::debug;

use super::NO_DATA_MESSAGE;
use crate::api::websocket::state::AppState;
use crate::utils::{current_timestamp_ms, to_millis};

/// Response for GET /blocks
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlocksResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    /// When the payload was received (Unix ms)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<i64>,
    /// When this response was produced (Unix ms)
    pub timestamp: i64,
}

/// GET /blocks - Latest producer payload, verbatim
pub async fn get_blocks(State(state): State<Arc<AppState>>) -> Json<BlocksResponse> {
    debug!("HTTP request for block data");

    let response = match state.snapshot().get() {
        Some(snapshot) => BlocksResponse {
            success: true,
            captured_at: Some(to_millis(&snapshot.captured_at)),
            data: Some(snapshot.payload),
            message: None,
            timestamp: current_timestamp_ms(),
        },
        None => BlocksResponse {
            success: false,
            data: None,
            message: Some(NO_DATA_MESSAGE),
            captured_at: None,
            timestamp: current_timestamp_ms(),
        },
    };
    Json(response)
}
