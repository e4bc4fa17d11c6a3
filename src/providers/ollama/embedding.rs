//! Ollama embeddings API implementation.
//!
//! Implements [`EmbeddingModel`] over the `/api/embed` endpoint, which
//! accepts a batch of inputs and returns one vector per input.

use super::client::OllamaClient;
use crate::embedding::{Embedding, EmbeddingError, EmbeddingModel};
use crate::providers::common::ApiClient;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

/// Ollama embedding model (e.g. "nomic-embed-text").
#[derive(Clone)]
pub struct OllamaEmbeddingModel {
    client: OllamaClient,
    model_id: String,
}

impl std::fmt::Debug for OllamaEmbeddingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OllamaEmbeddingModel")
            .field("model_id", &self.model_id)
            .finish_non_exhaustive()
    }
}

impl OllamaEmbeddingModel {
    /// Create a new embedding model.
    pub(crate) fn new(client: OllamaClient, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
        }
    }
}

/// Pull the vectors out of an `/api/embed` response.
pub(crate) fn parse_embed_response(
    json: &Value,
    texts: &[String],
) -> Result<Vec<Embedding>, EmbeddingError> {
    let vectors = json
        .get("embeddings")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            EmbeddingError::MalformedResponse("response body missing 'embeddings' array".into())
        })?;

    if vectors.len() != texts.len() {
        return Err(EmbeddingError::MalformedResponse(format!(
            "expected {} vectors, got {}",
            texts.len(),
            vectors.len()
        )));
    }

    vectors
        .iter()
        .zip(texts)
        .map(|(vector, text)| {
            let vec: Option<Vec<f64>> = vector
                .as_array()
                .map(|vs| vs.iter().filter_map(Value::as_f64).collect());
            match vec {
                Some(v) if !v.is_empty() => Ok(Embedding::new(text.clone(), v)),
                _ => Err(EmbeddingError::MalformedResponse(
                    "embedding vector missing or empty".into(),
                )),
            }
        })
        .collect()
}

#[async_trait]
impl EmbeddingModel for OllamaEmbeddingModel {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    #[instrument(skip(self, texts), fields(model = %self.model_id, texts = texts.len()))]
    async fn embed(&self, texts: &[String]) -> Result<Vec<Embedding>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let body = serde_json::json!({
            "model": self.model_id,
            "input": texts,
        });
        let url = format!("{}/api/embed", self.client.base_url());

        let response = self
            .client
            .http_client()
            .post(&url)
            .headers(self.client.auth_headers())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Api { status, body });
        }

        let json: Value = response.json().await?;
        debug!("embedding response received");
        parse_embed_response(&json, texts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_embed_response() {
        let json = serde_json::json!({
            "model": "nomic-embed-text",
            "embeddings": [[0.1, 0.2], [0.3, 0.4]],
        });
        let texts = vec!["a".to_string(), "b".to_string()];
        let embeddings = parse_embed_response(&json, &texts).expect("vectors");
        assert_eq!(embeddings.len(), 2);
        assert_eq!(embeddings[0].vec, vec![0.1, 0.2]);
        assert_eq!(embeddings[1].document, "b");
    }

    #[test]
    fn test_parse_embed_response_count_mismatch() {
        let json = serde_json::json!({"embeddings": [[0.1]]});
        let texts = vec!["a".to_string(), "b".to_string()];
        assert!(matches!(
            parse_embed_response(&json, &texts),
            Err(EmbeddingError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_embed_response_missing_array() {
        let json = serde_json::json!({"error": "model not found"});
        assert!(parse_embed_response(&json, &["a".to_string()]).is_err());
    }
}
