//! InMemoryItemStore - BTreeMap-backed item store for development and tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use super::{ItemStore, StoreError};
use crate::item::{Item, ItemId};

/// In-memory item store.
///
/// Identifiers come from a sequence starting at 1. Clone-friendly via Arc:
/// clones share storage and sequence.
#[derive(Clone)]
pub struct InMemoryItemStore {
    storage: Arc<RwLock<BTreeMap<ItemId, Item>>>,
    next_id: Arc<AtomicU64>,
}

impl Default for InMemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryItemStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Create a store pre-populated with `items`. Items without an id get
    /// one from the sequence.
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Result<Self, StoreError> {
        let store = Self::new();
        for item in items {
            store.save(&item)?;
        }
        Ok(store)
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("len"))?;
        Ok(storage.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl ItemStore for InMemoryItemStore {
    fn list_ids(&self) -> Result<Vec<ItemId>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("list_ids"))?;
        Ok(storage.keys().copied().collect())
    }

    fn find_all(&self) -> Result<Vec<Item>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("find_all"))?;
        Ok(storage.values().cloned().collect())
    }

    fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("find_by_id"))?;
        Ok(storage.get(&id).cloned())
    }

    fn save(&self, item: &Item) -> Result<Item, StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("save"))?;

        let id = match item.id {
            Some(id) => {
                // Keep the sequence ahead of explicitly supplied ids.
                self.next_id.fetch_max(id.saturating_add(1), Ordering::Relaxed);
                id
            }
            None => self
                .next_id
                .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1))
                .map_err(|_| StoreError::SequenceExhausted)?,
        };

        let mut saved = item.clone();
        saved.id = Some(id);
        storage.insert(id, saved.clone());
        Ok(saved)
    }

    fn delete_by_id(&self, id: ItemId) -> Result<bool, StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("delete_by_id"))?;
        Ok(storage.remove(&id).is_some())
    }
}
