//! Broadcast routing
//!
//! Producer data goes to every connection except its sender; rescan
//! requests go to producers only. Every delivery is a fallible send, and a
//! recipient whose send fails is removed from the registry on the spot.
//! One failed recipient never stops delivery to the rest.
//!
//! Admitting a connection and publishing producer data are serialized by
//! one admission lock, so a new peer sees the welcome first, then either
//! the stored snapshot or the fan-out of each later payload, never both.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::classifier::ClassifiedMessage;
use super::connection::{ConnectionHandle, ConnectionId};
use super::events::ControlMessage;
use super::registry::ConnectionRegistry;
use super::snapshot::SnapshotStore;
use crate::utils::preview;

/// Per-broadcast delivery counts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Delivery {
    /// Recipients the frame was queued for
    pub delivered: usize,
    /// Recipients removed because the send failed
    pub pruned: usize,
}

/// What the router did with a classified message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteOutcome {
    Broadcast(Delivery),
    Rescan(Delivery),
    Ignored,
}

/// Routes classified messages across the shared registry and snapshot
#[derive(Clone)]
pub struct BroadcastRouter {
    registry: Arc<ConnectionRegistry>,
    snapshot: Arc<SnapshotStore>,
    /// Held across snapshot read/write plus the matching sends
    admission: Arc<Mutex<()>>,
}

impl BroadcastRouter {
    pub fn new(registry: Arc<ConnectionRegistry>, snapshot: Arc<SnapshotStore>) -> Self {
        Self {
            registry,
            snapshot,
            admission: Arc::new(Mutex::new(())),
        }
    }

    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    pub fn snapshot(&self) -> &Arc<SnapshotStore> {
        &self.snapshot
    }

    /// Register a new connection, greet it, and hand it the latest snapshot
    ///
    /// Returns `false` if the peer was already gone and has been dropped.
    pub fn on_connect(&self, conn: &ConnectionHandle) -> bool {
        // Sends only enqueue, so holding the lock across them never blocks
        let _admission = self.admission.lock();

        let mut frames = Vec::with_capacity(2);
        match ControlMessage::welcome().to_json() {
            Ok(json) => frames.push(json),
            Err(e) => warn!(error = %e, "Failed to encode welcome message"),
        }
        if let Some(snapshot) = self.snapshot.get() {
            frames.push(snapshot.payload);
        }

        if frames.into_iter().any(|frame| conn.send_text(frame).is_err()) {
            debug!(conn_id = %conn.id(), "Peer closed before registration");
            return false;
        }
        self.registry.add(conn);
        true
    }

    /// Deregister a closed connection
    pub fn on_disconnect(&self, id: ConnectionId) {
        self.registry.remove_all(id);
    }

    /// Act on one classified message from `sender`
    pub fn handle(&self, sender: &ConnectionHandle, msg: ClassifiedMessage) -> RouteOutcome {
        match msg {
            ClassifiedMessage::ProducerData(payload) => {
                RouteOutcome::Broadcast(self.publish(sender, payload))
            }
            ClassifiedMessage::RescanRequest => {
                info!(conn_id = %sender.id(), "Rescan requested");
                RouteOutcome::Rescan(self.request_rescan())
            }
            ClassifiedMessage::Unrecognized(raw) => {
                info!(conn_id = %sender.id(), payload = preview(&raw, 100), "Unknown message type");
                RouteOutcome::Ignored
            }
        }
    }

    /// Ask every producer to resend its data
    pub fn request_rescan(&self) -> Delivery {
        let frame = match ControlMessage::scan_request().to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to encode scan request");
                return Delivery::default();
            }
        };

        let mut delivery = Delivery::default();
        self.registry
            .for_each_producer(|conn| self.deliver(conn, &frame, &mut delivery));
        info!(
            delivered = delivery.delivered,
            pruned = delivery.pruned,
            "Scan request sent to producers"
        );
        delivery
    }

    fn publish(&self, sender: &ConnectionHandle, payload: String) -> Delivery {
        let _admission = self.admission.lock();
        self.snapshot.put(payload.as_str());
        self.registry.mark_producer(sender.id());

        let mut delivery = Delivery::default();
        self.registry
            .for_each_other(sender.id(), |conn| self.deliver(conn, &payload, &mut delivery));
        debug!(
            conn_id = %sender.id(),
            delivered = delivery.delivered,
            pruned = delivery.pruned,
            "Broadcast producer data"
        );
        delivery
    }

    fn deliver(&self, conn: &ConnectionHandle, frame: &str, delivery: &mut Delivery) {
        match conn.send_text(frame) {
            Ok(()) => delivery.delivered += 1,
            Err(e) => {
                debug!(error = %e, "Pruning unreachable connection");
                self.prune(conn.id());
                delivery.pruned += 1;
            }
        }
    }

    fn prune(&self, id: ConnectionId) {
        self.registry.remove_all(id);
    }
}
