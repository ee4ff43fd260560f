//! Boundary validation for items arriving from clients.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::Item;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("Invalid email regex")
});

/// Why an item was rejected at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name must not be blank")]
    BlankName,
    #[error("invalid email format: {0}")]
    InvalidEmail(String),
}

impl Item {
    /// Check the fields a client controls. The batch processor never calls
    /// this; it only rewrites `status`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankName);
        }
        if !EMAIL_PATTERN.is_match(&self.email) {
            return Err(ValidationError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }
}
