//! Language model backends.
//!
//! Two categories of providers are supported, selected by configuration:
//!
//! - [`ollama`] — local, endpoint-based (host URL + model name)
//! - [`gemini`] — hosted, key-based (API key + model name)
//!
//! Switching providers changes only how the two LLM calls (generation,
//! grading) are dispatched; everything else in the pipeline is
//! provider-agnostic via the [`TextModel`] trait.

pub mod common;
pub mod gemini;
pub mod ollama;

pub use common::{
    ApiClient, GenerateOptions, HttpClientConfig, ProviderError, ProviderErrorKind, TextModel,
};

use std::sync::Arc;

/// Configuration value choosing a text generation backend.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum ProviderSelection {
    /// Local Ollama server.
    Ollama {
        /// Server base URL; defaults to `http://localhost:11434`.
        #[serde(skip_serializing_if = "Option::is_none")]
        base_url: Option<String>,
        /// Model name, e.g. "gemma3:latest".
        model: String,
    },
    /// Hosted Gemini API.
    Gemini {
        /// API key. Required; a missing key is a configuration error at
        /// build time, not a panic.
        #[serde(skip_serializing_if = "Option::is_none")]
        api_key: Option<String>,
        /// Model name, e.g. "gemini-2.5-flash".
        model: String,
    },
}

impl ProviderSelection {
    /// Construct the selected backend.
    ///
    /// # Errors
    ///
    /// Returns a configuration [`ProviderError`] when the selected provider
    /// requires credentials that were not supplied.
    pub fn build(&self) -> Result<Arc<dyn TextModel>, ProviderError> {
        match self {
            Self::Ollama { base_url, model } => {
                let mut builder = ollama::OllamaClient::builder();
                if let Some(url) = base_url {
                    builder = builder.base_url(url.clone());
                }
                Ok(Arc::new(builder.build().completion_model(model.clone())))
            }
            Self::Gemini { api_key, model } => {
                let key = api_key
                    .as_deref()
                    .ok_or_else(|| ProviderError::missing_api_key("gemini"))?;
                let client = gemini::GeminiClient::new(key)?;
                Ok(Arc::new(client.completion_model(model.clone())))
            }
        }
    }
}
