//! Gemini API client implementation.
//!
//! Provides a client for Google's Generative Language API. Unlike the local
//! Ollama backend, Gemini is key-based: constructing a client without a key
//! is a configuration error surfaced to the caller, never a panic.

use super::completion::CompletionModel;
use crate::providers::common::{ApiClient, HttpClientConfig, ProviderError};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use std::sync::Arc;

/// Default Gemini API base URL.
pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini API client for creating completion models.
///
/// # Example
///
/// ```rust,ignore
/// use quizforge::providers::gemini::GeminiClient;
///
/// // With explicit API key
/// let client = GeminiClient::new("AIza...")?;
///
/// // From the GEMINI_API_KEY environment variable
/// let client = GeminiClient::from_env()?;
///
/// let model = client.completion_model("gemini-2.5-flash");
/// ```
#[derive(Clone)]
pub struct GeminiClient {
    http_client: reqwest::Client,
    api_key: Arc<str>,
    base_url: Arc<str>,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key.
    ///
    /// # Errors
    ///
    /// Returns a configuration [`ProviderError`] when the key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderError> {
        Self::builder().api_key(api_key).build()
    }

    /// Create a new Gemini client from the `GEMINI_API_KEY` environment
    /// variable.
    ///
    /// # Errors
    ///
    /// Returns a configuration [`ProviderError`] when the variable is unset
    /// or empty.
    pub fn from_env() -> Result<Self, ProviderError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| ProviderError::missing_api_key("gemini"))?;
        Self::new(api_key)
    }

    /// Create a new client builder.
    #[must_use]
    pub fn builder() -> GeminiClientBuilder {
        GeminiClientBuilder::default()
    }

    /// Create a completion model with the specified model ID.
    #[must_use]
    pub fn completion_model(&self, model_id: impl Into<String>) -> CompletionModel {
        CompletionModel::new(self.clone(), model_id)
    }
}

impl ApiClient for GeminiClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(2);
        if let Ok(value) = HeaderValue::from_str(&self.api_key) {
            headers.insert("x-goog-api-key", value);
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }
}

/// Builder for [`GeminiClient`].
#[derive(Debug, Default)]
pub struct GeminiClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl GeminiClientBuilder {
    /// Set the API key.
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set a custom base URL (proxies, regional endpoints).
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
    /// # Errors
    ///
    /// Returns a configuration [`ProviderError`] when no API key was
    /// supplied.
    pub fn build(self) -> Result<GeminiClient, ProviderError> {
        let api_key = match self.api_key {
            Some(key) if !key.trim().is_empty() => key,
            _ => return Err(ProviderError::missing_api_key("gemini")),
        };
        let base_url = self
            .base_url
            .unwrap_or_else(|| GEMINI_API_BASE_URL.to_string());
        let http_client = HttpClientConfig {
            timeout_secs: self.timeout_secs.or(Some(120)),
            ..HttpClientConfig::default()
        }
        .build_client();

        Ok(GeminiClient {
            http_client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }
}
