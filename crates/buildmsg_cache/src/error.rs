//! Cache error types.

use thiserror::Error;

/// Errors that can occur in the message cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// A required argument or payload was absent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The snapshot could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The snapshot is malformed.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CacheError {
    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Creates a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Creates a deserialization error.
    pub fn deserialization(message: impl Into<String>) -> Self {
        Self::Deserialization(message.into())
    }
}
