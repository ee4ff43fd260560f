//! Batch processor: reprocess every stored item concurrently.
//!
//! A batch takes a snapshot of the store's identifiers, spawns one unit of
//! work per identifier, waits for all of them, and returns the items that
//! were found and re-persisted with status `PROCESSED`. A missing item or a
//! failing unit only removes that item from the output.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use item_service::{BatchProcessor, InMemoryItemStore, ProcessorConfig};
//!
//! let store = Arc::new(InMemoryItemStore::new());
//! let processor = BatchProcessor::with_config(
//!     store,
//!     ProcessorConfig::new().with_concurrency(8).without_delay(),
//! );
//!
//! // Await directly
//! let items = processor.process_all().await?;
//!
//! // Or start in the background and collect later
//! let handle = processor.spawn();
//! let report = handle.wait().await?;
//! println!("{} of {} processed", report.succeeded(), report.requested);
//! ```

mod config;
mod delay;
mod error;
mod handle;
mod interrupt;
mod report;

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

use crate::item::{Item, ItemId};
use crate::store::ItemStore;

pub use config::{ProcessorConfig, DEFAULT_DELAY};
pub use delay::{FixedDelay, NoDelay, WorkDelay};
pub use error::{ProcessError, TaskError};
pub use handle::BatchHandle;
pub use interrupt::Interrupt;
pub use report::{BatchReport, TaskOutcome};

/// Runs batches over an [`ItemStore`].
///
/// Cloning is cheap and clones share the store and the interruption signal.
pub struct BatchProcessor<S> {
    store: Arc<S>,
    config: ProcessorConfig,
    interrupt: Interrupt,
}

impl<S> Clone for BatchProcessor<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
            interrupt: self.interrupt.clone(),
        }
    }
}

impl<S: ItemStore + 'static> BatchProcessor<S> {
    /// Create a processor with the default configuration.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, ProcessorConfig::default())
    }

    pub fn with_config(store: Arc<S>, config: ProcessorConfig) -> Self {
        Self {
            store,
            config,
            interrupt: Interrupt::new(),
        }
    }

    /// Share an externally owned interruption signal.
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn interrupt(&self) -> &Interrupt {
        &self.interrupt
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Process every item and return the ones that were persisted.
    pub async fn process_all(&self) -> Result<Vec<Item>, ProcessError> {
        Ok(self.process_all_report().await?.into_items())
    }

    /// Start a batch in the background and return without waiting.
    pub fn spawn(&self) -> BatchHandle {
        let this = self.clone();
        BatchHandle::new(tokio::spawn(async move { this.process_all_report().await }))
    }

    /// Process every item and report what happened to each identifier.
    ///
    /// Only a failure to list identifiers fails the call. Results are read
    /// after every unit has finished.
    #[instrument(skip(self), fields(concurrency = self.config.pool_size()))]
    pub async fn process_all_report(&self) -> Result<BatchReport, ProcessError> {
        let ids = self.list_ids().await?;
        debug!(count = ids.len(), "scheduling batch");

        let permits = Arc::new(Semaphore::new(self.config.pool_size()));

        // One handle per id: each unit owns its result slot.
        let handles: Vec<_> = ids
            .iter()
            .map(|&id| {
                tokio::spawn(process_one(
                    Arc::clone(&self.store),
                    id,
                    Arc::clone(&self.config.delay),
                    self.interrupt.clone(),
                    Arc::clone(&permits),
                ))
            })
            .collect();

        let joined = join_all(handles).await;

        let outcomes = ids.into_iter().zip(joined).map(|(id, joined)| {
            let outcome = joined
                .unwrap_or_else(|e| TaskOutcome::Failed(TaskError::Aborted(e.to_string())));
            match &outcome {
                TaskOutcome::Missing => debug!(id, "item vanished before processing"),
                TaskOutcome::Failed(err) => warn!(id, error = %err, "item not processed"),
                TaskOutcome::Processed(_) => {}
            }
            (id, outcome)
        });

        let report = BatchReport::collect(outcomes, self.interrupt.is_raised());
        info!(
            requested = report.requested,
            processed = report.processed.len(),
            missing = report.missing.len(),
            failed = report.failed.len(),
            interrupted = report.interrupted,
            "batch finished"
        );
        Ok(report)
    }

    async fn list_ids(&self) -> Result<Vec<ItemId>, ProcessError> {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || store.list_ids())
            .await
            .map_err(|e| ProcessError::Aborted(e.to_string()))?
            .map_err(ProcessError::Listing)
    }
}

/// One unit of work: wait for a worker slot, run the delay hook, then
/// read, mark and write back the item on the blocking pool.
async fn process_one<S: ItemStore + 'static>(
    store: Arc<S>,
    id: ItemId,
    delay: Arc<dyn WorkDelay>,
    interrupt: Interrupt,
    permits: Arc<Semaphore>,
) -> TaskOutcome {
    let _permit = match permits.acquire_owned().await {
        Ok(permit) => permit,
        Err(e) => return TaskOutcome::Failed(TaskError::Aborted(e.to_string())),
    };

    tokio::select! {
        biased;
        _ = interrupt.raised() => {
            // The signal is left raised for the caller.
            return TaskOutcome::Failed(TaskError::Interrupted);
        }
        _ = delay.pause(id) => {}
    }

    match tokio::task::spawn_blocking(move || read_mark_write(store.as_ref(), id)).await {
        Ok(outcome) => outcome,
        Err(e) => TaskOutcome::Failed(TaskError::Aborted(e.to_string())),
    }
}

fn read_mark_write<S: ItemStore + ?Sized>(store: &S, id: ItemId) -> TaskOutcome {
    let mut item = match store.find_by_id(id) {
        Ok(Some(item)) => item,
        Ok(None) => return TaskOutcome::Missing,
        Err(e) => return TaskOutcome::Failed(e.into()),
    };

    item.mark_processed();

    match store.save(&item) {
        Ok(saved) if saved.id == Some(id) => TaskOutcome::Processed(saved),
        Ok(saved) => TaskOutcome::Failed(TaskError::IdentityChanged {
            expected: id,
            actual: saved.id,
        }),
        Err(e) => TaskOutcome::Failed(e.into()),
    }
}
