//! Error types for item service operations.

use thiserror::Error;

use crate::item::{ItemId, ValidationError};
use crate::processor::ProcessError;
use crate::store::StoreError;

/// Error type for item service operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// No item with this id.
    #[error("item not found: {0}")]
    NotFound(ItemId),
    /// Client-supplied item failed validation.
    #[error("invalid item: {0}")]
    Invalid(#[from] ValidationError),
    /// Store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    /// The batch could not run at all.
    #[error(transparent)]
    Process(#[from] ProcessError),
}

impl ServiceError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::NotFound(_) => 404,
            ServiceError::Invalid(_) => 400,
            ServiceError::Store(_) => 500,
            ServiceError::Process(e) => e.status_code(),
        }
    }
}
