//! Vector storage and similarity search for document chunks.
//!
//! Chunks are stored under a synthetic id `"<doc_id>-<index>"` and tagged
//! with their `doc_id`; queries are scoped to one document by filtering on
//! that metadata rather than by maintaining a physical index per document.
//! This trades a small per-query filter cost for a much simpler index
//! lifecycle (nothing to create or tear down per document).

mod errors;
mod memory;

pub use errors::RetrievalError;
pub use memory::InMemoryVectorStore;

use async_trait::async_trait;

/// A stored chunk: text, synthetic id, and its scoping document.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ChunkRecord {
    /// Synthetic id, `"<doc_id>-<index>"`.
    pub id: String,
    /// The document this chunk belongs to.
    pub doc_id: String,
    /// The chunk text.
    pub text: String,
    /// The chunk's embedding vector.
    pub embedding: Vec<f64>,
}

/// Chunk storage with nearest-neighbour retrieval.
///
/// Implementations embed on write and on query; the pipeline never touches
/// raw vectors.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Embed and upsert chunks for a document.
    ///
    /// Chunks are keyed `"<doc_id>-<index>"` in input order.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError`] when embedding or storage fails.
    async fn add_chunks(&self, doc_id: &str, chunks: Vec<String>) -> Result<(), RetrievalError>;

    /// Return the `k` chunk texts most similar to `query`, scoped to
    /// `doc_id`, in descending similarity order.
    ///
    /// A `doc_id` with no stored chunks yields an empty vector, never an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError`] when the query embedding fails.
    async fn similarity_search(
        &self,
        query: &str,
        k: usize,
        doc_id: &str,
    ) -> Result<Vec<String>, RetrievalError>;

    /// Number of chunks stored for a document.
    async fn chunk_count(&self, doc_id: &str) -> usize;
}
