use thiserror::Error;

use crate::item::ItemId;

/// Error type for item store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A lock guarding the storage was poisoned by a panicking writer.
    #[error("store lock poisoned during {0}")]
    LockPoisoned(&'static str),
    /// The store refused or failed a write for this item.
    #[error("write rejected for item {id}: {reason}")]
    WriteRejected { id: ItemId, reason: String },
    /// Every identifier the store can assign is taken.
    #[error("id sequence exhausted")]
    SequenceExhausted,
    /// Storage-level failure (connection loss, I/O, ...).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
