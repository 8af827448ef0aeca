//! Error types for format operations

use thiserror::Error;

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// The source text could not be tokenized, or it has no usable root
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    /// The document does not have the canonical shape (rejected before export)
    #[error("Malformed document at '{path}': {reason}")]
    MalformedDocument { path: String, reason: String },
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the requested operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),
}

impl FormatError {
    pub(crate) fn malformed_document(path: impl Into<String>, reason: impl Into<String>) -> Self {
        FormatError::MalformedDocument {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
