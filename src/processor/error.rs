//! Error types for batch processing.

use thiserror::Error;

use crate::item::ItemId;
use crate::store::StoreError;

/// Why a single unit of work produced no result. Never escapes the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// The store failed the read or the write.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    /// The interruption signal was raised during the delay step.
    #[error("interrupted during simulated work")]
    Interrupted,
    /// The store persisted the item under another identity.
    #[error("store returned id {actual:?} while processing item {expected}")]
    IdentityChanged {
        expected: ItemId,
        actual: Option<ItemId>,
    },
    /// The unit panicked or its task was cancelled.
    #[error("unit of work aborted: {0}")]
    Aborted(String),
}

/// Failure of the batch as a whole, as opposed to a per-item failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    /// The identifier snapshot could not be taken; nothing was processed.
    #[error("could not list item ids: {0}")]
    Listing(#[source] StoreError),
    /// The batch task itself could not be joined.
    #[error("batch aborted: {0}")]
    Aborted(String),
}

impl ProcessError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            ProcessError::Listing(_) => 500,
            ProcessError::Aborted(_) => 503,
        }
    }
}
