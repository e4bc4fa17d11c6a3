//! Common types and traits for all providers.
//!
//! The pipeline is provider-agnostic: generation and grading both go through
//! the [`TextModel`] trait, and switching backends changes only which
//! implementation is constructed. Cancellation follows the async model —
//! dropping the `generate` future aborts the in-flight request — and every
//! client carries an explicit timeout so a stuck endpoint surfaces as a
//! retryable [`ProviderErrorKind::Timeout`] instead of blocking forever.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Provider Errors
// ============================================================================

/// Error type for language model provider operations.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ProviderError {
    /// The error kind.
    pub kind: ProviderErrorKind,
    /// The provider name (e.g. "ollama", "gemini").
    pub provider: Option<String>,
    /// Human-readable error message.
    pub message: String,
}

/// Categories of provider errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProviderErrorKind {
    /// The selected provider is missing required configuration, such as an
    /// API key.
    Config,
    /// Authentication or authorization failure.
    Auth,
    /// Rate limit exceeded.
    RateLimited,
    /// Network or connection error.
    Network,
    /// The request timed out.
    Timeout,
    /// HTTP status error.
    HttpStatus,
    /// Response was not in the expected shape.
    ResponseFormat,
}

impl ProviderError {
    /// Create a configuration error (missing credentials, bad endpoint).
    #[must_use]
    pub fn config(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Config,
            provider: Some(provider.into()),
            message: message.into(),
        }
    }

    /// Create a missing-API-key configuration error.
    #[must_use]
    pub fn missing_api_key(provider: impl Into<String>) -> Self {
        let provider = provider.into();
        Self {
            kind: ProviderErrorKind::Config,
            message: format!("{provider} requires an API key but none was supplied"),
            provider: Some(provider),
        }
    }

    /// Create a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Network,
            provider: None,
            message: message.into(),
        }
    }

    /// Create a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Timeout,
            provider: None,
            message: message.into(),
        }
    }

    /// Create an error from an HTTP status and response body.
    #[must_use]
    pub fn http_status(provider: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        let kind = match status {
            401 | 403 => ProviderErrorKind::Auth,
            429 => ProviderErrorKind::RateLimited,
            _ => ProviderErrorKind::HttpStatus,
        };
        Self {
            kind,
            provider: Some(provider.into()),
            message: format!("HTTP {status}: {}", body.into()),
        }
    }

    /// Create a response format error.
    #[must_use]
    pub fn response_format(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::ResponseFormat,
            provider: Some(provider.into()),
            message: message.into(),
        }
    }

    /// Attach a provider name to this error.
    #[must_use]
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Whether retrying the same request may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self.kind,
            ProviderErrorKind::RateLimited | ProviderErrorKind::Network | ProviderErrorKind::Timeout
        )
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(provider) = &self.provider {
            write!(f, "[{provider}] ")?;
        }
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ProviderError {}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout("Request timed out")
        } else if err.is_connect() {
            Self::network(format!("Connection failed: {err}"))
        } else {
            Self::network(err.to_string())
        }
    }
}

// ============================================================================
// Generate Options
// ============================================================================

/// Options for text generation requests.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Temperature for sampling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl GenerateOptions {
    /// Create new default generate options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set temperature.
    #[must_use]
    pub const fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Set max tokens.
    #[must_use]
    pub const fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }
}

// ============================================================================
// TextModel Trait
// ============================================================================

/// The polymorphic text generation capability.
///
/// A single prompt in, free text out. Both quiz generation and grading are
/// dispatched through this trait.
#[async_trait]
pub trait TextModel: Send + Sync {
    /// The model identifier (e.g. "gemma3:latest", "gemini-2.5-flash").
    fn model_id(&self) -> &str;

    /// The provider name (e.g. "ollama", "gemini").
    fn provider(&self) -> &'static str;

    /// Generate a free-text response for the prompt.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the call fails or the response cannot
    /// be interpreted as text.
    async fn generate(
        &self,
        prompt: &str,
        options: GenerateOptions,
    ) -> Result<String, ProviderError>;
}

// ============================================================================
// API Client Infrastructure
// ============================================================================

/// Base configuration for HTTP-based API clients.
pub trait ApiClient: Clone + Send + Sync {
    /// Get the base URL for API requests.
    fn base_url(&self) -> &str;

    /// Get the HTTP client instance.
    fn http_client(&self) -> &reqwest::Client;

    /// Build authentication headers for API requests.
    fn auth_headers(&self) -> HeaderMap;
}

/// Shared HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// User agent string.
    pub user_agent: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: Some(120),
            user_agent: None,
        }
    }
}

impl HttpClientConfig {
    /// Build a reqwest client with this configuration.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    pub fn build_client(&self) -> reqwest::Client {
        let mut builder = reqwest::Client::builder();

        if let Some(timeout) = self.timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(timeout));
        }

        if let Some(ref user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        builder.build().expect("Failed to build HTTP client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::missing_api_key("gemini");
        assert_eq!(
            err.to_string(),
            "[gemini] gemini requires an API key but none was supplied"
        );
        assert_eq!(err.kind, ProviderErrorKind::Config);
    }

    #[test]
    fn test_http_status_classification() {
        assert_eq!(
            ProviderError::http_status("ollama", 401, "nope").kind,
            ProviderErrorKind::Auth
        );
        assert_eq!(
            ProviderError::http_status("ollama", 429, "slow down").kind,
            ProviderErrorKind::RateLimited
        );
        assert_eq!(
            ProviderError::http_status("ollama", 500, "boom").kind,
            ProviderErrorKind::HttpStatus
        );
    }

    #[test]
    fn test_retryable_kinds() {
        assert!(ProviderError::timeout("t").is_retryable());
        assert!(ProviderError::network("n").is_retryable());
        assert!(ProviderError::http_status("p", 429, "").is_retryable());
        assert!(!ProviderError::missing_api_key("gemini").is_retryable());
        assert!(!ProviderError::http_status("p", 500, "").is_retryable());
    }

    #[test]
    fn test_generate_options_builder() {
        let opts = GenerateOptions::new()
            .with_temperature(0.7)
            .with_max_tokens(512);
        assert_eq!(opts.temperature, Some(0.7));
        assert_eq!(opts.max_tokens, Some(512));
    }

    #[test]
    fn test_http_client_config_default() {
        let config = HttpClientConfig::default();
        assert_eq!(config.timeout_secs, Some(120));
        assert!(config.user_agent.is_none());
    }
}
