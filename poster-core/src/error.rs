//! Error types for layout operations.

use thiserror::Error;

/// Result type for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Errors that can occur in layout operations.
///
/// Lookup misses (unknown visual type, element or property value) are not
/// errors: they resolve to empty configuration or the poster dimensions.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Property name is not part of the element schema.
    #[error("Unknown element property: {0}")]
    UnknownProperty(String),

    /// Property value has the wrong shape for its property.
    #[error("Invalid value for {property}: {reason}")]
    InvalidValue {
        /// Property being assigned.
        property: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A transport document could not be imported.
    #[error("Import failed: {0}")]
    Import(String),

    /// Configuration serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Persistence backend failure.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Errors raised by an overlay persistence backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred during persistence.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing key-value store is not reachable.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
