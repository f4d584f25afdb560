use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::Snapshot;

/// Holds the snapshot currently being served.
///
/// One writer (the refresher) publishes; any number of readers take the
/// current `Arc<Snapshot>`. Readers only ever hold the lock long enough to
/// clone the pointer, and versions become visible in publish order.
#[derive(Clone)]
pub struct SnapshotStore {
    tx: Arc<watch::Sender<Arc<Snapshot>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::with_initial(Snapshot::empty())
    }

    pub fn with_initial(initial: Snapshot) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(initial));
        Self { tx: Arc::new(tx) }
    }

    pub fn current(&self) -> Arc<Snapshot> {
        self.tx.borrow().clone()
    }

    /// Replaces the current snapshot and returns the version it was given.
    pub fn publish(&self, mut snapshot: Snapshot) -> u64 {
        let mut version = 0;
        self.tx.send_modify(|current| {
            version = current.version + 1;
            snapshot.version = version;
            *current = Arc::new(snapshot);
        });
        version
    }

    /// Receiver that wakes on every publish.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.tx.subscribe()
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::domain::{Item, ItemKind};

    fn snapshot_with(ids: &[u64]) -> Snapshot {
        let items = ids
            .iter()
            .map(|&id| Item::new(id, ItemKind::Story, Utc::now()))
            .collect();
        Snapshot::new(items, Utc::now())
    }

    #[test]
    fn test_current_before_publish_is_initial() {
        let store = SnapshotStore::new();
        let current = store.current();
        assert!(current.is_empty());
        assert_eq!(current.version, 0);
    }

    #[test]
    fn test_publish_assigns_increasing_versions() {
        let store = SnapshotStore::new();
        assert_eq!(store.publish(snapshot_with(&[1])), 1);
        assert_eq!(store.publish(snapshot_with(&[2, 3])), 2);

        let current = store.current();
        assert_eq!(current.version, 2);
        assert_eq!(current.len(), 2);
    }

    #[test]
    fn test_superseded_snapshot_stays_readable() {
        let store = SnapshotStore::new();
        store.publish(snapshot_with(&[1, 2, 3]));
        let held = store.current();

        store.publish(snapshot_with(&[9]));

        assert_eq!(held.version, 1);
        assert_eq!(held.len(), 3);
        assert_eq!(store.current().items[0].id, 9);
    }

    #[tokio::test]
    async fn test_subscribe_sees_publish() {
        let store = SnapshotStore::new();
        let mut rx = store.subscribe();

        store.publish(snapshot_with(&[7]));

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().version, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_readers_never_go_backwards() {
        const PUBLISHES: u64 = 2_000;
        let store = SnapshotStore::new();

        let mut readers = Vec::new();
        for _ in 0..6 {
            let store = store.clone();
            readers.push(tokio::spawn(async move {
                let mut last = 0;
                loop {
                    let seen = store.current().version;
                    assert!(seen >= last, "saw version {} after {}", seen, last);
                    last = seen;
                    if seen == PUBLISHES {
                        break;
                    }
                    tokio::task::yield_now().await;
                }
            }));
        }

        let writer = {
            let store = store.clone();
            tokio::spawn(async move {
                for i in 0..PUBLISHES {
                    store.publish(snapshot_with(&[i]));
                    if i % 16 == 0 {
                        tokio::task::yield_now().await;
                    }
                }
            })
        };

        writer.await.unwrap();
        for reader in readers {
            reader.await.unwrap();
        }
        assert_eq!(store.current().version, PUBLISHES);
    }
}
