pub mod config;
mod item;
pub mod logging;
mod processor;
mod service;
mod store;

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
pub mod http;

pub use item::{Item, ItemId, ValidationError, STATUS_PENDING, STATUS_PROCESSED};
pub use processor::{
    BatchHandle, BatchProcessor, BatchReport, FixedDelay, Interrupt, NoDelay, ProcessError,
    ProcessorConfig, TaskError, TaskOutcome, WorkDelay, DEFAULT_DELAY,
};
pub use service::{ItemService, ServiceError};
pub use store::{InMemoryItemStore, ItemStore, StoreError};

// Re-exported so custom `WorkDelay` implementations don't need their own
// dependency on async-trait.
pub use async_trait::async_trait;
