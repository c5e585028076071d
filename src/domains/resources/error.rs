//! Errors raised while reading a resource.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResourceError {
    /// No resource is registered under this URI.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Generated content (a JSON listing) could not be produced.
    #[error("Could not build resource content: {0}")]
    Content(String),
}

impl ResourceError {
    pub fn not_found(uri: impl Into<String>) -> Self {
        Self::NotFound(uri.into())
    }

    pub fn content(msg: impl Into<String>) -> Self {
        Self::Content(msg.into())
    }
}
