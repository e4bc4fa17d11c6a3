//! In-memory vector store backed by cosine similarity.
//!
//! The reference [`VectorStore`] implementation: records live in a
//! `tokio::sync::RwLock`ed vector and queries scan with cosine similarity.
//! Good for single-process sessions and tests; larger corpora belong behind
//! the same trait on a real vector database.

use super::errors::RetrievalError;
use super::{ChunkRecord, VectorStore};
use crate::embedding::{EmbeddingModel, cosine_similarity};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// In-process chunk store with brute-force nearest-neighbour search.
pub struct InMemoryVectorStore {
    embedder: Arc<dyn EmbeddingModel>,
    records: RwLock<Vec<ChunkRecord>>,
}

impl std::fmt::Debug for InMemoryVectorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryVectorStore")
            .field("embedder", &self.embedder.model_id())
            .finish_non_exhaustive()
    }
}

impl InMemoryVectorStore {
    /// Create an empty store over the given embedding model.
    #[must_use]
    pub fn new(embedder: Arc<dyn EmbeddingModel>) -> Self {
        Self {
            embedder,
            records: RwLock::new(Vec::new()),
        }
    }

    /// Total number of stored chunks across all documents.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no chunks at all.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    #[instrument(skip(self, chunks), fields(doc_id, chunks = chunks.len()))]
    async fn add_chunks(&self, doc_id: &str, chunks: Vec<String>) -> Result<(), RetrievalError> {
        if chunks.is_empty() {
            return Ok(());
        }

        let embeddings = self.embedder.embed(&chunks).await?;
        if embeddings.len() != chunks.len() {
            return Err(RetrievalError::datastore(format!(
                "embedder returned {} vectors for {} chunks",
                embeddings.len(),
                chunks.len()
            )));
        }

        let mut records = self.records.write().await;
        // Upsert: re-ingesting a document replaces its previous chunks.
        records.retain(|r| r.doc_id != doc_id);
        for (index, (text, embedding)) in chunks.into_iter().zip(embeddings).enumerate() {
            records.push(ChunkRecord {
                id: format!("{doc_id}-{index}"),
                doc_id: doc_id.to_string(),
                text,
                embedding: embedding.vec,
            });
        }
        debug!(doc_id, total = records.len(), "chunks stored");
        Ok(())
    }

    #[instrument(skip(self, query), fields(doc_id, k))]
    async fn similarity_search(
        &self,
        query: &str,
        k: usize,
        doc_id: &str,
    ) -> Result<Vec<String>, RetrievalError> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let records = self.records.read().await;
        if !records.iter().any(|r| r.doc_id == doc_id) {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed_query(query).await?;

        let mut scored: Vec<(f64, &ChunkRecord)> = records
            .iter()
            .filter(|r| r.doc_id == doc_id)
            .map(|r| (cosine_similarity(&query_embedding.vec, &r.embedding), r))
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(_, r)| r.text.clone())
            .collect())
    }

    async fn chunk_count(&self, doc_id: &str) -> usize {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| r.doc_id == doc_id)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::{Embedding, EmbeddingError};
    use std::collections::HashMap;

    /// Deterministic embedder: preset vectors per exact text, zero otherwise.
    struct StubEmbedder {
        vectors: HashMap<String, Vec<f64>>,
    }

    impl StubEmbedder {
        fn new(entries: &[(&str, &[f64])]) -> Arc<Self> {
            Arc::new(Self {
                vectors: entries
                    .iter()
                    .map(|(text, vec)| ((*text).to_string(), vec.to_vec()))
                    .collect(),
            })
        }
    }

    #[async_trait]
    impl EmbeddingModel for StubEmbedder {
        fn model_id(&self) -> &str {
            "stub"
        }

        async fn embed(&self, texts: &[String]) -> Result<Vec<Embedding>, EmbeddingError> {
            Ok(texts
                .iter()
                .map(|t| {
                    let vec = self.vectors.get(t).cloned().unwrap_or(vec![0.0, 0.0]);
                    Embedding::new(t.clone(), vec)
                })
                .collect())
        }
    }

    fn sample_store() -> InMemoryVectorStore {
        let embedder = StubEmbedder::new(&[
            ("cats purr", &[1.0, 0.0]),
            ("dogs bark", &[0.0, 1.0]),
            ("felines nap", &[0.9, 0.1]),
            ("about cats", &[1.0, 0.0]),
        ]);
        InMemoryVectorStore::new(embedder)
    }

    #[tokio::test]
    async fn test_search_unseeded_doc_returns_empty() {
        let store = sample_store();
        let results = store
            .similarity_search("about cats", 5, "missing-doc")
            .await
            .expect("search should not fail");
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_orders_by_descending_similarity() {
        let store = sample_store();
        store
            .add_chunks(
                "doc",
                vec![
                    "dogs bark".to_string(),
                    "cats purr".to_string(),
                    "felines nap".to_string(),
                ],
            )
            .await
            .expect("add_chunks");

        let results = store
            .similarity_search("about cats", 2, "doc")
            .await
            .expect("search");
        assert_eq!(results, vec!["cats purr", "felines nap"]);
    }

    #[tokio::test]
    async fn test_documents_are_isolated_by_doc_id() {
        let store = sample_store();
        store
            .add_chunks("a", vec!["cats purr".to_string()])
            .await
            .expect("add_chunks");
        store
            .add_chunks("b", vec!["dogs bark".to_string()])
            .await
            .expect("add_chunks");

        let results = store
            .similarity_search("about cats", 10, "b")
            .await
            .expect("search");
        assert_eq!(results, vec!["dogs bark"]);
    }

    #[tokio::test]
    async fn test_reingest_replaces_previous_chunks() {
        let store = sample_store();
        store
            .add_chunks("doc", vec!["cats purr".to_string(), "dogs bark".to_string()])
            .await
            .expect("add_chunks");
        store
            .add_chunks("doc", vec!["felines nap".to_string()])
            .await
            .expect("add_chunks");

        assert_eq!(store.chunk_count("doc").await, 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_chunk_ids_are_doc_scoped_and_sequential() {
        let store = sample_store();
        store
            .add_chunks("doc", vec!["cats purr".to_string(), "dogs bark".to_string()])
            .await
            .expect("add_chunks");

        let records = store.records.read().await;
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["doc-0", "doc-1"]);
    }

    #[tokio::test]
    async fn test_k_zero_returns_empty() {
        let store = sample_store();
        store
            .add_chunks("doc", vec!["cats purr".to_string()])
            .await
            .expect("add_chunks");
        let results = store
            .similarity_search("about cats", 0, "doc")
            .await
            .expect("search");
        assert!(results.is_empty());
    }
}
