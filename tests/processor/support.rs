//! Test doubles: a store with injectable failures and instrumented delays.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use item_service::{
    async_trait, BatchProcessor, InMemoryItemStore, Item, ItemId, ItemStore, ProcessorConfig,
    StoreError, WorkDelay,
};
use tokio::sync::Semaphore;

/// A store with `n` pending items, ids `1..=n`.
pub fn seeded_store(n: u64) -> InMemoryItemStore {
    InMemoryItemStore::with_items((1..=n).map(|id| {
        Item::new(
            format!("Item {id}"),
            format!("Description {id}"),
            format!("test{id}@example.com"),
        )
        .with_id(id)
    }))
    .unwrap()
}

/// Processor with no simulated work.
pub fn processor<S: ItemStore + 'static>(store: S) -> BatchProcessor<S> {
    BatchProcessor::with_config(Arc::new(store), ProcessorConfig::new().without_delay())
}

/// Wraps an in-memory store and fails, hides or panics on chosen ids.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: InMemoryItemStore,
    /// Ids reported by `list_ids` on top of the stored ones.
    pub phantom_ids: Vec<ItemId>,
    pub fail_find: HashSet<ItemId>,
    pub fail_save: HashSet<ItemId>,
    pub panic_on_find: HashSet<ItemId>,
    /// Save persists under a different id.
    pub remap_save: HashMap<ItemId, ItemId>,
    pub fail_list: bool,
    pub saves: AtomicUsize,
}

impl FlakyStore {
    pub fn new(inner: InMemoryItemStore) -> Self {
        Self {
            inner,
            ..Default::default()
        }
    }

    pub fn with_phantom(mut self, id: ItemId) -> Self {
        self.phantom_ids.push(id);
        self
    }

    pub fn failing_find(mut self, id: ItemId) -> Self {
        self.fail_find.insert(id);
        self
    }

    pub fn failing_save(mut self, id: ItemId) -> Self {
        self.fail_save.insert(id);
        self
    }

    pub fn panicking_find(mut self, id: ItemId) -> Self {
        self.panic_on_find.insert(id);
        self
    }

    pub fn remapping_save(mut self, from: ItemId, to: ItemId) -> Self {
        self.remap_save.insert(from, to);
        self
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl ItemStore for FlakyStore {
    fn list_ids(&self) -> Result<Vec<ItemId>, StoreError> {
        if self.fail_list {
            return Err(StoreError::Unavailable("database offline".into()));
        }
        let mut ids = self.inner.list_ids()?;
        ids.extend(&self.phantom_ids);
        Ok(ids)
    }

    fn find_all(&self) -> Result<Vec<Item>, StoreError> {
        self.inner.find_all()
    }

    fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        if self.panic_on_find.contains(&id) {
            panic!("store blew up reading item {id}");
        }
        if self.fail_find.contains(&id) {
            return Err(StoreError::Unavailable(format!("read timeout on {id}")));
        }
        self.inner.find_by_id(id)
    }

    fn save(&self, item: &Item) -> Result<Item, StoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        let id = item.id.unwrap_or_default();
        if self.fail_save.contains(&id) {
            return Err(StoreError::WriteRejected {
                id,
                reason: "constraint violation".into(),
            });
        }
        if let Some(&other) = self.remap_save.get(&id) {
            let mut moved = item.clone();
            moved.id = Some(other);
            return self.inner.save(&moved);
        }
        self.inner.save(item)
    }

    fn delete_by_id(&self, id: ItemId) -> Result<bool, StoreError> {
        self.inner.delete_by_id(id)
    }
}

/// Delay that tracks how many units are paused at once.
#[derive(Default)]
pub struct TrackingDelay {
    pub pause: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

impl TrackingDelay {
    pub fn new(pause: Duration) -> Arc<Self> {
        Arc::new(Self {
            pause,
            ..Default::default()
        })
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WorkDelay for TrackingDelay {
    async fn pause(&self, _id: ItemId) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.pause).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Delay that holds one chosen item until the test opens the gate.
pub struct GateDelay {
    held: ItemId,
    gate: Semaphore,
    reached: Mutex<bool>,
}

impl GateDelay {
    pub fn holding(held: ItemId) -> Arc<Self> {
        Arc::new(Self {
            held,
            gate: Semaphore::new(0),
            reached: Mutex::new(false),
        })
    }

    pub fn open(&self) {
        self.gate.add_permits(1);
    }

    pub fn reached(&self) -> bool {
        *self.reached.lock().unwrap()
    }
}

#[async_trait]
impl WorkDelay for GateDelay {
    async fn pause(&self, id: ItemId) {
        if id != self.held {
            return;
        }
        *self.reached.lock().unwrap() = true;
        let _permit = self.gate.acquire().await.unwrap();
    }
}

/// Delay long enough that an interruption always lands inside it.
pub struct SlowDelay;

#[async_trait]
impl WorkDelay for SlowDelay {
    async fn pause(&self, _id: ItemId) {
        tokio::time::sleep(Duration::from_secs(30)).await;
    }
}
