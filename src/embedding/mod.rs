//! Embeddings: numeric vector representations of text used for similarity
//! comparison.
//!
//! The computation itself is delegated to an external service behind the
//! [`EmbeddingModel`] trait; this module only defines the data type and the
//! distance measure the vector store ranks by.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Struct that holds a single document and its embedding.
#[derive(Clone, Default, Deserialize, Serialize, Debug)]
pub struct Embedding {
    /// The text that was embedded. Used for debugging.
    pub document: String,
    /// The embedding vector.
    pub vec: Vec<f64>,
}

impl Embedding {
    /// Creates a new embedding with the given document and vector.
    #[inline]
    pub fn new(document: impl Into<String>, vec: Vec<f64>) -> Self {
        Self {
            document: document.into(),
            vec,
        }
    }

    /// Returns the dimensionality of the embedding vector.
    #[inline]
    #[must_use]
    pub const fn ndims(&self) -> usize {
        self.vec.len()
    }

    /// Returns `true` if the embedding vector is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    /// Cosine similarity to another embedding, in `[-1, 1]`.
    ///
    /// Returns `0.0` when either vector is empty or zero-length so that
    /// degenerate embeddings rank last rather than poisoning the sort.
    #[must_use]
    pub fn cosine_similarity(&self, other: &Self) -> f64 {
        cosine_similarity(&self.vec, &other.vec)
    }
}

/// Cosine similarity between two raw vectors.
#[must_use]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Errors from the embedding service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EmbeddingError {
    /// The HTTP request to the embedding service failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The embedding service returned an error status.
    #[error("Embedding API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnosis.
        body: String,
    },

    /// The service response did not contain the expected vectors.
    #[error("Malformed embedding response: {0}")]
    MalformedResponse(String),
}

/// A model that turns text into embedding vectors.
///
/// One vector is returned per input text, in input order.
#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    /// The model identifier (e.g. "nomic-embed-text").
    fn model_id(&self) -> &str;

    /// Embed a batch of texts.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError`] when the service is unreachable or the
    /// response cannot be interpreted.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Embedding>, EmbeddingError>;

    /// Embed a single query string.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError`] as for [`embed`](EmbeddingModel::embed).
    async fn embed_query(&self, query: &str) -> Result<Embedding, EmbeddingError> {
        let mut embeddings = self.embed(std::slice::from_ref(&query.to_string())).await?;
        embeddings.pop().ok_or_else(|| {
            EmbeddingError::MalformedResponse("service returned no vectors".into())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity_identity() {
        let v = vec![1.0, 2.0, 3.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        assert!((cosine_similarity(&[1.0, 0.0], &[0.0, 1.0])).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_similarity_opposite() {
        let sim = cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]);
        assert!((sim + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_similarity_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_embedding_ndims() {
        let e = Embedding::new("doc", vec![0.1, 0.2]);
        assert_eq!(e.ndims(), 2);
        assert!(!e.is_empty());
        assert!(Embedding::default().is_empty());
    }
}
