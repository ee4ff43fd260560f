//! Item: the persisted entity handled by the store, the service and the
//! batch processor.
//!
//! ## Example
//!
//! ```ignore
//! use item_service::Item;
//!
//! let item = Item::new("Desk", "Standing desk", "desk@example.com");
//! assert_eq!(item.status, item_service::STATUS_PENDING);
//! item.validate()?;
//! ```

mod validate;

use serde::{Deserialize, Serialize};

pub use validate::ValidationError;

/// Store-assigned identifier of an item.
pub type ItemId = u64;

/// Status of an item that has not been through a batch yet.
pub const STATUS_PENDING: &str = "PENDING";

/// Status written by the batch processor.
pub const STATUS_PROCESSED: &str = "PROCESSED";

/// An item record.
///
/// `id` is `None` until the store saves the item for the first time and
/// never changes afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub id: Option<ItemId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub email: String,
}

fn default_status() -> String {
    STATUS_PENDING.to_string()
}

impl Item {
    /// Create an unsaved, pending item.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            status: default_status(),
            email: email.into(),
        }
    }

    /// Builder-style id assignment, mostly useful for seeding stores.
    pub fn with_id(mut self, id: ItemId) -> Self {
        self.id = Some(id);
        self
    }

    /// Builder-style status assignment.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn is_processed(&self) -> bool {
        self.status == STATUS_PROCESSED
    }

    /// Mark the item processed. Only the status changes.
    pub fn mark_processed(&mut self) {
        self.status = STATUS_PROCESSED.to_string();
    }
}
