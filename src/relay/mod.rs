//! Transport-independent relay core
//!
//! - `connection`: peer handles with a fallible, non-blocking send
//! - `registry`: live connections and the producer subset
//! - `classifier`: inbound frame categories
//! - `snapshot`: the latest producer payload
//! - `router`: fan-out and rescan delivery with pruning
//! - `events`: relay-originated control messages

pub mod classifier;
pub mod connection;
pub mod events;
pub mod registry;
pub mod router;
pub mod snapshot;

pub use classifier::{classify, ClassifiedMessage};
pub use connection::{ConnectionHandle, ConnectionId, OutboundReceiver, SendError};
pub use events::ControlMessage;
pub use registry::ConnectionRegistry;
pub use router::{BroadcastRouter, Delivery, RouteOutcome};
pub use snapshot::{Snapshot, SnapshotStore};
