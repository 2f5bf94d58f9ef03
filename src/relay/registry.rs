//! Connection registry
//!
//! Tracks every live connection and the subset that has produced data.
//! A single `parking_lot::Mutex` guards both collections so `producers ⊆ all`
//! holds at every observable point. Iteration works on a snapshot taken
//! under the lock and released before visiting, so visitors may remove
//! connections (including the one being visited) without deadlocking or
//! disturbing the remaining visits.

use std::collections::{BTreeMap, BTreeSet};

use parking_lot::Mutex;

use super::connection::{ConnectionHandle, ConnectionId};

#[derive(Default)]
struct Members {
    all: BTreeMap<ConnectionId, ConnectionHandle>,
    producers: BTreeSet<ConnectionId>,
}

/// Set of live connections plus the producer subset
#[derive(Default)]
pub struct ConnectionRegistry {
    members: Mutex<Members>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection. No-op if it is already present.
    pub fn add(&self, conn: &ConnectionHandle) {
        self.members
            .lock()
            .all
            .entry(conn.id())
            .or_insert_with(|| conn.clone());
    }

    /// Drop a connection from both collections. Returns whether it was present.
    pub fn remove_all(&self, id: ConnectionId) -> bool {
        let mut members = self.members.lock();
        members.producers.remove(&id);
        members.all.remove(&id).is_some()
    }

    /// Mark a registered connection as a producer
    ///
    /// Ignored for connections that are not (or no longer) registered.
    pub fn mark_producer(&self, id: ConnectionId) -> bool {
        let mut members = self.members.lock();
        if members.all.contains_key(&id) {
            members.producers.insert(id)
        } else {
            false
        }
    }

    pub fn contains(&self, id: ConnectionId) -> bool {
        self.members.lock().all.contains_key(&id)
    }

    pub fn is_producer(&self, id: ConnectionId) -> bool {
        self.members.lock().producers.contains(&id)
    }

    /// Visit every registered connection except `sender`
    pub fn for_each_other<F>(&self, sender: ConnectionId, visit: F)
    where
        F: FnMut(&ConnectionHandle),
    {
        let targets: Vec<ConnectionHandle> = {
            let members = self.members.lock();
            members
                .all
                .iter()
                .filter(|(id, _)| **id != sender)
                .map(|(_, conn)| conn.clone())
                .collect()
        };
        targets.iter().for_each(visit);
    }

    /// Visit every producer connection
    pub fn for_each_producer<F>(&self, visit: F)
    where
        F: FnMut(&ConnectionHandle),
    {
        let targets: Vec<ConnectionHandle> = {
            let members = self.members.lock();
            members
                .producers
                .iter()
                .filter_map(|id| members.all.get(id).cloned())
                .collect()
        };
        targets.iter().for_each(visit);
    }

    pub fn count_all(&self) -> usize {
        self.members.lock().all.len()
    }

    pub fn count_producers(&self) -> usize {
        self.members.lock().producers.len()
    }
}
