//! Connection handles
//!
//! A `ConnectionHandle` is the relay's view of one peer: an identity, the
//! peer address for diagnostics, and the sending half of that peer's
//! outbound queue. The socket itself lives in the WebSocket handler, which
//! drains the queue. Once the handler's writer stops, the queue's receiver
//! is dropped and every later send fails.

use std::fmt;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;
use tokio::sync::mpsc;

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique connection identity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    fn next() -> Self {
        Self(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A send to a peer that is no longer open
#[derive(Debug, Error, PartialEq, Eq)]
#[error("connection {0} is closed")]
pub struct SendError(pub ConnectionId);

/// Receiving half of a connection's outbound queue
pub type OutboundReceiver = mpsc::UnboundedReceiver<String>;

/// Cloneable handle to a live peer
#[derive(Clone, Debug)]
pub struct ConnectionHandle {
    id: ConnectionId,
    remote_addr: Option<SocketAddr>,
    outbound: mpsc::UnboundedSender<String>,
}

impl ConnectionHandle {
    /// Create a handle and the queue its socket writer should drain
    pub fn channel(remote_addr: Option<SocketAddr>) -> (Self, OutboundReceiver) {
        let (outbound, rx) = mpsc::unbounded_channel();
        let handle = Self {
            id: ConnectionId::next(),
            remote_addr,
            outbound,
        };
        (handle, rx)
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn remote_addr(&self) -> Option<SocketAddr> {
        self.remote_addr
    }

    /// Whether the peer's writer is still draining the queue
    pub fn is_open(&self) -> bool {
        !self.outbound.is_closed()
    }

    /// Queue a text frame for the peer
    ///
    /// Never blocks. Fails only when the peer is no longer open.
    pub fn send_text(&self, text: impl Into<String>) -> Result<(), SendError> {
        self.outbound
            .send(text.into())
            .map_err(|_| SendError(self.id))
    }
}

impl PartialEq for ConnectionHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ConnectionHandle {}
