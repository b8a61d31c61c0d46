//! Last known phone status per user

use std::collections::BTreeMap;
use parking_lot::Mutex;
use crate::status::PhoneStatus;

/// One row of a store snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub user: String,
    pub status: PhoneStatus,
}

impl StatusEntry {
    pub fn new(user: impl Into<String>, status: PhoneStatus) -> Self {
        Self {
            user: user.into(),
            status,
        }
    }
}

/// In-memory status store
///
/// A single lock guards the whole map; writes are last-write-wins and entries
/// live as long as the store. Keys are kept sorted so snapshots come out in a
/// stable order.
#[derive(Debug, Default)]
pub struct StatusStore {
    status: Mutex<BTreeMap<String, PhoneStatus>>,
}

impl StatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `status` for `user`, returning what was stored before
    pub fn set(&self, user: impl Into<String>, status: PhoneStatus) -> Option<PhoneStatus> {
        self.status.lock().insert(user.into(), status)
    }

    pub fn get(&self, user: &str) -> Option<PhoneStatus> {
        self.status.lock().get(user).copied()
    }

    /// Copy of every entry, ordered by user name
    pub fn snapshot(&self) -> Vec<StatusEntry> {
        self.status
            .lock()
            .iter()
            .map(|(user, status)| StatusEntry::new(user.clone(), *status))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.status.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.status.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_set_overwrites() {
        let store = StatusStore::new();
        assert_eq!(store.set("alice", PhoneStatus::DndOn), None);
        assert_eq!(store.set("alice", PhoneStatus::Offhook), Some(PhoneStatus::DndOn));
        assert_eq!(store.set("alice", PhoneStatus::Onhook), Some(PhoneStatus::Offhook));

        let snapshot = store.snapshot();
        assert_eq!(snapshot, vec![StatusEntry::new("alice", PhoneStatus::Onhook)]);
    }

    #[test]
    fn test_snapshot_is_sorted_by_user() {
        let store = StatusStore::new();
        store.set("carol", PhoneStatus::Login);
        store.set("alice", PhoneStatus::DndOn);
        store.set("bob", PhoneStatus::PausedOn);

        let users: Vec<_> = store.snapshot().into_iter().map(|e| e.user).collect();
        assert_eq!(users, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let store = StatusStore::new();
        store.set("alice", PhoneStatus::DndOn);
        let before = store.snapshot();
        store.set("alice", PhoneStatus::DndOff);
        store.set("bob", PhoneStatus::Login);

        assert_eq!(before, vec![StatusEntry::new("alice", PhoneStatus::DndOn)]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_concurrent_writers_keep_one_entry_per_user() {
        let store = Arc::new(StatusStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                thread::spawn(move || {
                    for n in 0..200 {
                        let status = if n % 2 == 0 { PhoneStatus::Offhook } else { PhoneStatus::Onhook };
                        store.set(format!("user{}", i % 4), status);
                        let snapshot = store.snapshot();
                        assert!(snapshot.len() <= 4);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 4);
        assert!(store.get("user0").is_some());
        assert!(store.get("user4").is_none());
    }
}
