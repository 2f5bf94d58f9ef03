//! Rescan trigger endpoint

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use super::NO_PRODUCERS_MESSAGE;
use crate::api::websocket::state::AppState;
use crate::utils::current_timestamp_ms;

/// Response for POST /scan
#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: i64,
}

/// POST /scan - Send a scan request to every producer
///
/// Succeeds only if at least one producer actually received the request;
/// producers found dead along the way are pruned and not counted.
pub async fn request_scan(State(state): State<Arc<AppState>>) -> Json<ScanResponse> {
    let delivered = if state.registry().count_producers() == 0 {
        0
    } else {
        state.router.request_rescan().delivered
    };
    info!(delivered, "Scan requested over HTTP");

    let (success, message) = if delivered == 0 {
        (false, NO_PRODUCERS_MESSAGE.to_string())
    } else {
        (true, format!("Scan requested from {delivered} clients"))
    };

    Json(ScanResponse {
        success,
        message,
        timestamp: current_timestamp_ms(),
    })
}
