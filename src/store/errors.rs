//! Error types for the store module.

use crate::embedding::EmbeddingError;

/// Errors from vector store operations.
///
/// An empty search result is not an error; callers treat it as
/// "insufficient context".
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RetrievalError {
    /// The embedding service failed.
    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    /// The underlying datastore failed.
    #[error("Datastore error: {0}")]
    Datastore(String),
}

impl RetrievalError {
    /// Create a datastore error with a message.
    #[must_use]
    pub fn datastore(msg: impl Into<String>) -> Self {
        Self::Datastore(msg.into())
    }
}
