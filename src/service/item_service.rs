use std::sync::Arc;

use tracing::debug;

use super::error::ServiceError;
use crate::item::{Item, ItemId};
use crate::processor::{BatchHandle, BatchProcessor, BatchReport, ProcessorConfig};
use crate::store::ItemStore;

/// CRUD facade and batch entry point for one store.
///
/// Generic over `S`, the store type. The store is shared with the
/// processor through an `Arc`.
pub struct ItemService<S> {
    store: Arc<S>,
    processor: BatchProcessor<S>,
}

impl<S: ItemStore + 'static> ItemService<S> {
    /// Create a service with the default processor configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, ProcessorConfig::default())
    }

    pub fn with_config(store: S, config: ProcessorConfig) -> Self {
        Self::from_shared(Arc::new(store), config)
    }

    /// Build from a store that is also held elsewhere.
    pub fn from_shared(store: Arc<S>, config: ProcessorConfig) -> Self {
        let processor = BatchProcessor::with_config(Arc::clone(&store), config);
        Self { store, processor }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn processor(&self) -> &BatchProcessor<S> {
        &self.processor
    }

    pub fn find_all(&self) -> Result<Vec<Item>, ServiceError> {
        Ok(self.store.find_all()?)
    }

    pub fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, ServiceError> {
        Ok(self.store.find_by_id(id)?)
    }

    /// Like [`find_by_id`](Self::find_by_id) but absence is an error.
    pub fn get(&self, id: ItemId) -> Result<Item, ServiceError> {
        self.find_by_id(id)?.ok_or(ServiceError::NotFound(id))
    }

    /// Validate and store a new item. Any client-supplied id is ignored.
    pub fn create(&self, mut item: Item) -> Result<Item, ServiceError> {
        item.validate()?;
        item.id = None;
        let saved = self.store.save(&item)?;
        debug!(id = ?saved.id, "item created");
        Ok(saved)
    }

    /// Replace an existing item. The path id wins over any id in the body.
    pub fn update(&self, id: ItemId, mut item: Item) -> Result<Item, ServiceError> {
        if self.store.find_by_id(id)?.is_none() {
            return Err(ServiceError::NotFound(id));
        }
        item.validate()?;
        item.id = Some(id);
        let saved = self.store.save(&item)?;
        debug!(id, "item updated");
        Ok(saved)
    }

    /// Delete an item. Deleting a missing item is not an error.
    pub fn delete_by_id(&self, id: ItemId) -> Result<(), ServiceError> {
        let existed = self.store.delete_by_id(id)?;
        debug!(id, existed, "item deleted");
        Ok(())
    }

    /// Reprocess every item; see [`BatchProcessor::process_all`].
    pub async fn process_all(&self) -> Result<Vec<Item>, ServiceError> {
        Ok(self.processor.process_all().await?)
    }

    pub async fn process_all_report(&self) -> Result<BatchReport, ServiceError> {
        Ok(self.processor.process_all_report().await?)
    }

    /// Start a batch in the background.
    pub fn spawn_processing(&self) -> BatchHandle {
        self.processor.spawn()
    }
}
