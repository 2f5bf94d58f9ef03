//! Relay server
//!
//! Owns the listener and the shared state, and wires the HTTP/WebSocket
//! router onto it.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::api::{create_router, AppState};
use crate::config::RelayConfig;
use crate::error::{RelayError, RelayResult};

/// Background tasks started by [`RelayServer::listen`]
#[derive(Debug)]
pub struct ServerHandle {
    serve: JoinHandle<()>,
    status: Option<JoinHandle<()>>,
}

impl ServerHandle {
    /// Stop serving and stop the status log
    pub fn abort(&self) {
        self.serve.abort();
        if let Some(status) = &self.status {
            status.abort();
        }
    }

    /// Whether every background task has ended
    pub fn is_finished(&self) -> bool {
        self.serve.is_finished() && self.status.as_ref().map_or(true, |s| s.is_finished())
    }
}

/// HTTP + WebSocket relay server
pub struct RelayServer {
    config: RelayConfig,
    state: Arc<AppState>,
}

impl RelayServer {
    /// Create a server with fresh, empty state
    pub fn new(config: RelayConfig) -> Self {
        Self::with_state(config, Arc::new(AppState::new()))
    }

    /// Create a server around existing state
    pub fn with_state(config: RelayConfig, state: Arc<AppState>) -> Self {
        Self { config, state }
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Bind and serve in the background
    ///
    /// Returns the bound address (useful with port 0) and a handle owning
    /// the serve and status tasks.
    pub async fn listen(&self) -> RelayResult<(SocketAddr, ServerHandle)> {
        let listener = self.bind().await?;
        let addr = listener.local_addr()?;
        let status = self.spawn_status_task();

        let app = create_router(self.state.clone());
        let serve = tokio::spawn(async move {
            let service = app.into_make_service_with_connect_info::<SocketAddr>();
            if let Err(e) = axum::serve(listener, service).await {
                error!(error = %e, "Relay server stopped");
            }
        });
        Ok((addr, ServerHandle { serve, status }))
    }

    /// Serve until Ctrl+C or SIGTERM, then shut down gracefully
    pub async fn run(self) -> RelayResult<()> {
        let listener = self.bind().await?;
        let status = self.spawn_status_task();

        let app = create_router(self.state.clone());
        let service = app.into_make_service_with_connect_info::<SocketAddr>();
        axum::serve(listener, service)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        if let Some(status) = status {
            status.abort();
        }
        info!("Server closed");
        Ok(())
    }

    async fn bind(&self) -> RelayResult<TcpListener> {
        let addr = self.config.socket_addr()?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| RelayError::Bind { addr, source })?;
        info!(addr = %listener.local_addr()?, "Relay server listening");
        Ok(listener)
    }

    /// Periodically log connection counts
    fn spawn_status_task(&self) -> Option<JoinHandle<()>> {
        if self.config.status_interval_secs == 0 {
            return None;
        }
        let period = Duration::from_secs(self.config.status_interval_secs);
        let state = self.state.clone();

        Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.tick().await; // First tick fires immediately
            loop {
                ticker.tick().await;
                info!(
                    connections = state.registry().count_all(),
                    producers = state.registry().count_producers(),
                    has_data = state.snapshot().is_present(),
                    "Relay status"
                );
            }
        }))
    }
}

/// Resolves on Ctrl+C, or SIGTERM on Unix
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl+C received, shutting down gracefully"),
        _ = terminate => info!("SIGTERM received, shutting down gracefully"),
    }
}
