//! Session error types.

use thiserror::Error;

/// Errors that can occur while running a build session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Cache error.
    #[error("Cache error: {0}")]
    Cache(#[from] buildmsg_cache::CacheError),
}

impl SessionError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
