//! Error types for fieldbook core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the presentation layer maps
//! them to user-facing messages. All of them are recoverable; none is
//! fatal to the process, and no operation retries on its own.

use thiserror::Error;

/// Result type alias for fieldbook operations.
pub type Result<T> = std::result::Result<T, FieldbookError>;

/// Core error type for fieldbook operations.
#[derive(Debug, Error)]
pub enum FieldbookError {
    /// A record fails a domain invariant
    #[error("Validation error: {0}")]
    Validation(String),

    /// Update, delete, or restore targeted an id absent from its collection
    #[error("Not found: {0}")]
    NotFound(String),

    /// Imported data lacks the required top-level shape
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// An export was requested on an empty source collection
    #[error("No data to export")]
    NoData,

    /// The durable write or read failed; the attempted mutation was not applied
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Configuration could not be read or parsed
    #[error("Config error: {0}")]
    Config(String),
}

impl From<rusqlite::Error> for FieldbookError {
    fn from(err: rusqlite::Error) -> Self {
        FieldbookError::Persistence(err.to_string())
    }
}

impl From<std::io::Error> for FieldbookError {
    fn from(err: std::io::Error) -> Self {
        FieldbookError::Persistence(err.to_string())
    }
}
