pub mod item;
pub mod snapshot;

pub use item::{Item, ItemId, ItemKind};
pub use snapshot::Snapshot;
