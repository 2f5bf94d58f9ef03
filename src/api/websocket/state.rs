//! Shared application state for HTTP and WebSocket handlers

use std::sync::Arc;
use std::time::Instant;

use crate::relay::{BroadcastRouter, ConnectionRegistry, SnapshotStore};

/// State injected into every handler
pub struct AppState {
    /// Routes inbound frames over the shared registry and snapshot
    pub router: BroadcastRouter,

    /// When the relay started, for `/health` uptime
    pub started_at: Instant,
}

impl AppState {
    /// Create state with an empty registry and no snapshot
    pub fn new() -> Self {
        Self::with_router(BroadcastRouter::new(
            Arc::new(ConnectionRegistry::new()),
            Arc::new(SnapshotStore::new()),
        ))
    }

    /// Create state around an existing router
    pub fn with_router(router: BroadcastRouter) -> Self {
        Self {
            router,
            started_at: Instant::now(),
        }
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        self.router.registry()
    }

    pub fn snapshot(&self) -> &SnapshotStore {
        self.router.snapshot()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::ConnectionHandle;

    #[test]
    fn test_new_state_is_empty() {
        let state = AppState::new();
        assert_eq!(state.registry().count_all(), 0);
        assert!(!state.snapshot().is_present());
    }

    #[test]
    fn test_registry_shared_with_router() {
        let state = AppState::new();
        let (conn, _rx) = ConnectionHandle::channel(None);
        state.router.on_connect(&conn);
        assert_eq!(state.registry().count_all(), 1);
    }
}
