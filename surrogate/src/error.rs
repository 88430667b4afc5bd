//! Errors raised by surrogate registration.

use std::sync::Arc;
use surrogate_core::ImportError;

/// Errors raised before a wrapped call runs.
///
/// Failures of the wrapped call itself are never converted into this type;
/// they propagate unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurrogateError {
    /// The path is empty or not a dot-separated list of identifiers.
    #[error("invalid module path {path:?}: expected dot-separated identifiers")]
    InvalidPath { path: Arc<str> },

    /// The injected path could not be imported back.
    #[error(transparent)]
    Import(#[from] ImportError),
}

impl SurrogateError {
    #[inline]
    pub fn invalid_path(path: &str) -> Self {
        Self::InvalidPath {
            path: Arc::from(path),
        }
    }
}

/// Result type for surrogate operations.
pub type SurrogateResult<T> = Result<T, SurrogateError>;
