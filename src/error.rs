//! Unified error types for the quizforge pipeline.
//!
//! Each module defines its own error type; this module aggregates them into
//! a single [`Error`] so pipeline callers handle one hierarchy:
//!
//! - ingestion errors (unreadable PDFs, invalid chunking parameters)
//! - retrieval errors (embedding service, vector store)
//! - provider errors (credentials, network, timeouts)
//! - response parsing errors (model output not recoverable as data)

use crate::embedding::EmbeddingError;
use crate::history::HistoryError;
use crate::loader::{ChunkConfigError, IngestError};
use crate::providers::ProviderError;
use crate::quiz::ResponseParseError;
use crate::store::RetrievalError;

/// Result type alias for quizforge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the quizforge pipeline.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Source document could not be read or yielded no text.
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// Invalid chunking parameters.
    #[error("Chunk configuration error: {0}")]
    ChunkConfig(#[from] ChunkConfigError),

    /// Embedding or vector store failure.
    #[error("Retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    /// No chunks are indexed for the requested document.
    #[error("No context available for document '{doc_id}': ingest it first")]
    NoContext {
        /// The document identifier that had no indexed chunks.
        doc_id: String,
    },

    /// Language model provider failure (credentials, network, API).
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Model output could not be recovered as structured data.
    #[error("Response parse error: {0}")]
    ResponseParse(#[from] ResponseParseError),

    /// Result persistence failure.
    #[error("History error: {0}")]
    History(#[from] HistoryError),
}

impl Error {
    /// Create a no-context error for the given document.
    #[must_use]
    pub fn no_context(doc_id: impl Into<String>) -> Self {
        Self::NoContext {
            doc_id: doc_id.into(),
        }
    }
}

impl From<EmbeddingError> for Error {
    fn from(err: EmbeddingError) -> Self {
        Self::Retrieval(RetrievalError::from(err))
    }
}
