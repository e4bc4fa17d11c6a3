//! Ollama API client implementation.
//!
//! Provides a client for a local Ollama server, exposing both completion
//! models (quiz generation, grading) and embedding models (retrieval).

use super::completion::CompletionModel;
use super::embedding::OllamaEmbeddingModel;
use crate::providers::common::{ApiClient, HttpClientConfig};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use std::sync::Arc;

/// Default Ollama API base URL (local server).
pub const OLLAMA_API_BASE_URL: &str = "http://localhost:11434";

/// Ollama API client for creating completion and embedding models.
///
/// Ollama runs locally and doesn't require an API key.
///
/// # Example
///
/// ```rust,ignore
/// use quizforge::providers::ollama::OllamaClient;
///
/// // Connect to the default local server
/// let client = OllamaClient::new();
///
/// // Connect to a custom host
/// let client = OllamaClient::builder()
///     .base_url("http://192.168.1.100:11434")
///     .build();
///
/// let model = client.completion_model("gemma3:latest");
/// let embedder = client.embedding_model("nomic-embed-text");
/// ```
#[derive(Clone)]
pub struct OllamaClient {
    http_client: reqwest::Client,
    base_url: Arc<str>,
}

impl std::fmt::Debug for OllamaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OllamaClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new()
    }
}

impl OllamaClient {
    /// Create a new Ollama client connecting to `http://localhost:11434`.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    #[must_use]
    pub fn builder() -> OllamaClientBuilder {
        OllamaClientBuilder::default()
    }

    /// Create a completion model with the specified model ID.
    #[must_use]
    pub fn completion_model(&self, model_id: impl Into<String>) -> CompletionModel {
        CompletionModel::new(self.clone(), model_id)
    }

    /// Create an embedding model with the specified model ID.
    #[must_use]
    pub fn embedding_model(&self, model_id: impl Into<String>) -> OllamaEmbeddingModel {
        OllamaEmbeddingModel::new(self.clone(), model_id)
    }

    /// Check if the Ollama server is running and accessible.
    ///
    /// # Errors
    ///
    /// Returns an error if the server is not reachable.
    pub async fn health_check(&self) -> Result<bool, reqwest::Error> {
        let response = self
            .http_client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await?;

        Ok(response.status().is_success())
    }
}

impl ApiClient for OllamaClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    fn auth_headers(&self) -> HeaderMap {
        // Ollama doesn't require authentication
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }
}

/// Builder for [`OllamaClient`].
#[derive(Debug, Default)]
pub struct OllamaClientBuilder {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl OllamaClientBuilder {
    /// Set a custom base URL, for remote Ollama servers.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the request timeout in seconds. Defaults to 120.
    #[must_use]
    pub const fn timeout_secs(mut self, timeout: u64) -> Self {
        self.timeout_secs = Some(timeout);
        self
    }

    /// Build the client.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client fails to build.
    #[must_use]
    pub fn build(self) -> OllamaClient {
        let base_url = self
            .base_url
            .unwrap_or_else(|| OLLAMA_API_BASE_URL.to_string());
        let http_client = HttpClientConfig {
            timeout_secs: self.timeout_secs.or(Some(120)),
            ..HttpClientConfig::default()
        }
        .build_client();

        OllamaClient {
            http_client,
            base_url: base_url.into(),
        }
    }
}
