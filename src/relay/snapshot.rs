//! Latest producer payload

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

/// A stored producer payload and when it arrived
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub payload: String,
    pub captured_at: DateTime<Utc>,
}

/// Single-slot, last-write-wins payload store
#[derive(Default)]
pub struct SnapshotStore {
    slot: RwLock<Option<Snapshot>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored payload, stamping it with the current time
    pub fn put(&self, payload: impl Into<String>) {
        *self.slot.write() = Some(Snapshot {
            payload: payload.into(),
            captured_at: Utc::now(),
        });
    }

    /// The stored payload, or `None` if nothing has been received yet
    pub fn get(&self) -> Option<Snapshot> {
        self.slot.read().clone()
    }

    pub fn is_present(&self) -> bool {
        self.slot.read().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_is_absent() {
        let store = SnapshotStore::new();
        assert!(store.get().is_none());
        assert!(!store.is_present());
    }

    #[test]
    fn test_empty_payload_is_present() {
        let store = SnapshotStore::new();
        store.put("");
        assert_eq!(store.get().map(|s| s.payload), Some(String::new()));
    }

    #[test]
    fn test_last_write_wins() {
        let store = SnapshotStore::new();
        for i in 0..5 {
            store.put(format!("PLAYER:{i}"));
        }
        assert_eq!(store.get().unwrap().payload, "PLAYER:4");
    }

    #[test]
    fn test_captured_at_advances() {
        let store = SnapshotStore::new();
        store.put("a");
        let first = store.get().unwrap().captured_at;
        store.put("b");
        assert!(store.get().unwrap().captured_at >= first);
    }
}
