//! Error handling module for the Flexiplan engine
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Missing catalog rows and eligibility entries are deliberately not errors:
//! the selection contract degrades them to empty option sets and off values.
//! Only unparseable documents and explicit consistency checks fail loudly.

use thiserror::Error;

/// Main error type for the Flexiplan engine
#[derive(Error, Debug)]
pub enum FlexiplanError {
    /// Document errors (a collaborator document is not valid JSON)
    #[error("Document error: {0}")]
    Document(#[from] serde_json::Error),

    /// Validation errors (selection invariant, table consistency)
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Flexiplan operations
pub type Result<T> = std::result::Result<T, FlexiplanError>;

// Convenient error constructors
impl FlexiplanError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
