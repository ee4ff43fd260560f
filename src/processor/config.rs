use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

use super::delay::{FixedDelay, NoDelay, WorkDelay};

/// Default simulated work per item.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

/// Configuration for a [`BatchProcessor`](super::BatchProcessor).
#[derive(Clone)]
pub struct ProcessorConfig {
    /// Maximum number of units doing work at the same time (default: number
    /// of available CPUs). Every unit is still scheduled up front.
    pub concurrency: usize,
    /// Hook run by every unit before it touches the store.
    pub delay: Arc<dyn WorkDelay>,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            concurrency: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            delay: Arc::new(FixedDelay(DEFAULT_DELAY)),
        }
    }
}

impl fmt::Debug for ProcessorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessorConfig")
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}

impl ProcessorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worker-pool size. Zero is bumped to one and anything above
    /// [`Semaphore::MAX_PERMITS`] is capped there.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = bounded_pool(concurrency);
        self
    }

    /// Pool size actually used by a batch, whatever was written to
    /// [`concurrency`](Self::concurrency).
    pub fn pool_size(&self) -> usize {
        bounded_pool(self.concurrency)
    }

    /// Replace the per-item delay hook.
    pub fn with_delay(mut self, delay: impl WorkDelay + 'static) -> Self {
        self.delay = Arc::new(delay);
        self
    }

    /// Use a delay hook the caller keeps a handle on.
    pub fn with_shared_delay(mut self, delay: Arc<dyn WorkDelay>) -> Self {
        self.delay = delay;
        self
    }

    /// Fixed sleep per item; `Duration::ZERO` disables it.
    pub fn with_fixed_delay(self, delay: Duration) -> Self {
        if delay.is_zero() {
            self.with_delay(NoDelay)
        } else {
            self.with_delay(FixedDelay(delay))
        }
    }

    /// Skip the simulated work entirely.
    pub fn without_delay(self) -> Self {
        self.with_delay(NoDelay)
    }
}

fn bounded_pool(concurrency: usize) -> usize {
    concurrency.clamp(1, Semaphore::MAX_PERMITS)
}
