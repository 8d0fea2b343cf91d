//! Error types for gridstore
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.
//!
//! Absence of a value is never represented here: single reads return
//! `Option` and bulk reads omit missing keys.

use thiserror::Error;

/// Result type alias for gridstore operations
pub type GridResult<T> = std::result::Result<T, GridError>;

/// Error types for the gridstore repository layer
#[derive(Debug, Error)]
pub enum GridError {
    /// No identity could be resolved for an entity that is about to be
    /// written or deleted. Raised before any store mutation is issued.
    #[error("identity for entity [{entity}] is required")]
    MissingIdentity {
        /// Name of the entity type lacking an identity
        entity: String,
    },

    /// The store does not support the requested operation
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Malformed query text, or a result shape the caller did not expect
    #[error("Query error: {0}")]
    Query(String),

    /// Backend/store failure (connectivity, persistence, internal fault)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Value projection or serialization failure
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl GridError {
    /// Create a `MissingIdentity` error for the named entity type
    pub fn missing_identity(entity: impl Into<String>) -> Self {
        GridError::MissingIdentity {
            entity: entity.into(),
        }
    }

    /// Create an `UnsupportedOperation` error
    pub fn unsupported_operation(message: impl Into<String>) -> Self {
        GridError::UnsupportedOperation(message.into())
    }

    /// Create a `Query` error
    pub fn query(message: impl Into<String>) -> Self {
        GridError::Query(message.into())
    }

    /// Create a `Storage` error
    pub fn storage(message: impl Into<String>) -> Self {
        GridError::Storage(message.into())
    }

    /// True if this error signals an operation the store does not support
    pub fn is_unsupported_operation(&self) -> bool {
        matches!(self, GridError::UnsupportedOperation(_))
    }
}

impl From<serde_json::Error> for GridError {
    fn from(e: serde_json::Error) -> Self {
        GridError::Serialization(e.to_string())
    }
}
