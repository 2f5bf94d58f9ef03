//! WebSocket connection handler

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        ConnectInfo, State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tracing::{debug, info, warn};

use super::state::AppState;
use crate::relay::{classify, ConnectionHandle, RouteOutcome};
use crate::utils::preview;

/// WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let peer = connect_info.map(|ConnectInfo(addr)| addr);
    upgrade(ws, peer, state)
}

/// Finish an upgrade into a relay connection
pub fn upgrade(ws: WebSocketUpgrade, peer: Option<SocketAddr>, state: Arc<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, peer, state))
}

/// Handle an individual WebSocket connection
///
/// The socket is split: a writer task drains the connection's outbound
/// queue, while this task reads frames in order and routes them.
async fn handle_socket(socket: WebSocket, peer: Option<SocketAddr>, state: Arc<AppState>) {
    let (conn, mut outbound) = ConnectionHandle::channel(peer);
    let (mut sink, mut stream) = socket.split();

    let conn_id = conn.id();
    let writer = tokio::spawn(async move {
        while let Some(text) = outbound.recv().await {
            if sink.send(Message::Text(text)).await.is_err() {
                break; // Client disconnected
            }
        }
        // Dropping `outbound` here makes every later send to this peer fail
        let _ = sink.close().await;
    });

    info!(conn_id = %conn_id, peer = ?conn.remote_addr(), "New WebSocket connection");
    if !state.router.on_connect(&conn) {
        return; // Client disconnected immediately
    }

    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Text(text)) => route_text(&state, &conn, &text),
            Ok(Message::Binary(bytes)) => match String::from_utf8(bytes) {
                Ok(text) => route_text(&state, &conn, &text),
                Err(_) => debug!(conn_id = %conn_id, "Ignoring non-UTF-8 binary frame"),
            },
            Ok(Message::Close(frame)) => {
                let (code, reason) = frame
                    .map(|f| (f.code, f.reason.to_string()))
                    .unwrap_or_default();
                info!(conn_id = %conn_id, code, reason = %reason, "Client disconnected");
                break;
            }
            Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {} // Answered by axum
            Err(e) => {
                warn!(conn_id = %conn_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    state.router.on_disconnect(conn_id);
    info!(
        conn_id = %conn_id,
        peer = ?conn.remote_addr(),
        active = state.registry().count_all(),
        "Connection closed"
    );
    drop(conn);
    writer.abort();
}

fn route_text(state: &AppState, conn: &ConnectionHandle, text: &str) {
    debug!(conn_id = %conn.id(), preview = preview(text, 100), "Received message");

    let message = classify(text);
    let kind = message.kind();
    match state.router.handle(conn, message) {
        RouteOutcome::Broadcast(delivery) | RouteOutcome::Rescan(delivery) => {
            debug!(
                conn_id = %conn.id(),
                kind,
                delivered = delivery.delivered,
                pruned = delivery.pruned,
                "Routed message"
            );
        }
        RouteOutcome::Ignored => {}
    }
}
