use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::Item;

/// A ranked, size-bounded set of items as served to readers.
///
/// Built once by the pipeline and never mutated afterwards; the store hands
/// out `Arc<Snapshot>` and replaces the pointer on publish.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Assigned by the store on publish, 0 for the initial empty snapshot.
    pub version: u64,
    pub generated_at: DateTime<Utc>,
    pub items: Vec<Item>,
}

impl Snapshot {
    pub fn new(items: Vec<Item>, generated_at: DateTime<Utc>) -> Self {
        Self {
            version: 0,
            generated_at,
            items,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), DateTime::<Utc>::UNIX_EPOCH)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_ranked(&self) -> bool {
        self.items.windows(2).all(|w| w[0].score >= w[1].score)
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::empty()
    }
}
