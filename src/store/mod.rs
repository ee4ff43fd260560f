//! Item Store: synchronous storage capability used by the service and the
//! batch processor.
//!
//! Implementations only need per-call atomicity: each method is one atomic
//! read or write. Callers add no locking of their own around store calls.

mod error;
mod in_memory;

use crate::item::{Item, ItemId};

pub use error::StoreError;
pub use in_memory::InMemoryItemStore;

/// Abstract CRUD storage for items.
pub trait ItemStore: Send + Sync {
    /// Snapshot of every identifier currently stored.
    fn list_ids(&self) -> Result<Vec<ItemId>, StoreError>;

    /// Every stored item.
    fn find_all(&self) -> Result<Vec<Item>, StoreError>;

    /// Get an item by ID. Returns `None` if not found.
    fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, StoreError>;

    /// Upsert an item, assigning an id when it has none. Returns the
    /// persisted representation.
    fn save(&self, item: &Item) -> Result<Item, StoreError>;

    /// Delete an item by ID. Returns true if it existed.
    fn delete_by_id(&self, id: ItemId) -> Result<bool, StoreError>;
}
