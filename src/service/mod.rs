//! Item Service: CRUD over an [`ItemStore`] plus batch reprocessing.
//!
//! `ItemService<S>` is what transports talk to. CRUD calls go straight to
//! the store; `process_all` hands off to the [`BatchProcessor`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use item_service::{InMemoryItemStore, Item, ItemService, ProcessorConfig};
//!
//! let service = ItemService::with_config(
//!     InMemoryItemStore::new(),
//!     ProcessorConfig::new().without_delay(),
//! );
//!
//! let created = service.create(Item::new("Desk", "Standing desk", "desk@example.com"))?;
//! let processed = service.process_all().await?;
//! assert_eq!(processed[0].id, created.id);
//! ```

mod error;
mod item_service;

pub use error::ServiceError;
pub use item_service::ItemService;
