//! HTTP server setup with Axum

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ws::WebSocketUpgrade, ConnectInfo, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};

use super::rest::{blocks, scan, status};
use super::websocket::{
    handler::{upgrade, ws_handler},
    state::AppState,
};

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    // Browser dashboards poll from any origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Identity, or a WebSocket upgrade for clients connecting to the bare host
        .route("/", get(root))
        // WebSocket endpoint
        .route("/ws", get(ws_handler))
        .route("/health", get(status::health))
        .route("/blocks", get(blocks::get_blocks))
        .route("/scan", post(scan::request_scan))
        .layer(cors)
        .with_state(state)
}

/// GET / - upgrade if asked to, otherwise describe the server
async fn root(
    ws: Option<WebSocketUpgrade>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    State(state): State<Arc<AppState>>,
) -> Response {
    match ws {
        Some(ws) => upgrade(ws, connect_info.map(|ConnectInfo(addr)| addr), state),
        None => Json(status::root_info(&state)).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::{classify, ConnectionHandle};
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request};
    use serde_json::Value;
    use tower::util::ServiceExt;

    async fn call(state: Arc<AppState>, method: Method, uri: &str) -> (u16, Value) {
        let app = create_router(state);
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status().as_u16();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_root_reports_identity() {
        let state = Arc::new(AppState::new());
        let (status, body) = call(state, Method::GET, "/").await;

        assert_eq!(status, 200);
        assert_eq!(body["message"], status::SERVER_NAME);
        assert_eq!(body["endpoints"]["blocks"], "/blocks");
        assert_eq!(body["connections"], 0);
        assert_eq!(body["minecraftClients"], 0);
    }

    #[tokio::test]
    async fn test_health_check() {
        let state = Arc::new(AppState::new());
        let (status, body) = call(state, Method::GET, "/health").await;

        assert_eq!(status, 200);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["connections"], 0);
        assert_eq!(body["minecraftClients"], 0);
        assert_eq!(body["hasMinecraftData"], false);
        assert!(body["uptime"].as_f64().unwrap() >= 0.0);
    }

    #[tokio::test]
    async fn test_blocks_absent() {
        let state = Arc::new(AppState::new());
        let (_, body) = call(state, Method::GET, "/blocks").await;

        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "No Minecraft data available");
        assert!(body.get("data").is_none());
        assert!(body["timestamp"].as_i64().is_some());
    }

    #[tokio::test]
    async fn test_blocks_returns_payload_verbatim() {
        let state = Arc::new(AppState::new());
        let (producer, _rx) = ConnectionHandle::channel(None);
        state.router.on_connect(&producer);
        let raw = r#"{"blocks":[{"x":0}]}"#;
        state.router.handle(&producer, classify(raw));

        let (_, body) = call(state.clone(), Method::GET, "/blocks").await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], raw);
        assert!(body["capturedAt"].as_i64().is_some());

        let (_, health) = call(state, Method::GET, "/health").await;
        assert_eq!(health["hasMinecraftData"], true);
        assert_eq!(health["minecraftClients"], 1);
    }

    #[tokio::test]
    async fn test_scan_without_producers() {
        let state = Arc::new(AppState::new());
        let (viewer, _rx) = ConnectionHandle::channel(None);
        state.router.on_connect(&viewer);

        let (_, body) = call(state, Method::POST, "/scan").await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "No Minecraft clients connected");
    }

    #[tokio::test]
    async fn test_scan_reaches_producers() {
        let state = Arc::new(AppState::new());
        let (producer, mut rx) = ConnectionHandle::channel(None);
        state.router.on_connect(&producer);
        state.router.handle(&producer, classify("PLAYER:x=1"));
        while rx.try_recv().is_ok() {}

        let (_, body) = call(state, Method::POST, "/scan").await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Scan requested from 1 clients");

        let frame: Value = serde_json::from_str(&rx.try_recv().unwrap()).unwrap();
        assert_eq!(frame["type"], "scan_request");
    }

    #[tokio::test]
    async fn test_scan_with_only_dead_producers() {
        let state = Arc::new(AppState::new());
        let (producer, rx) = ConnectionHandle::channel(None);
        state.router.on_connect(&producer);
        state.router.handle(&producer, classify("PLAYER:x=1"));
        drop(rx);

        let (_, body) = call(state.clone(), Method::POST, "/scan").await;
        assert_eq!(body["success"], false);
        assert_eq!(state.registry().count_all(), 0);
    }

    #[tokio::test]
    async fn test_cors_headers_present() {
        let app = create_router(Arc::new(AppState::new()));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("origin", "https://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_scan_requires_post() {
        let app = create_router(Arc::new(AppState::new()));
        let response = app
            .oneshot(Request::builder().uri("/scan").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), 405);
    }
}
