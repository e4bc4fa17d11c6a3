//! Ollama generate API implementation.
//!
//! Implements the [`TextModel`] trait over Ollama's `/api/generate`
//! endpoint: one prompt in, one free-text completion out.

use super::client::OllamaClient;
use crate::providers::common::{ApiClient, GenerateOptions, ProviderError, TextModel};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

/// Ollama completion model.
#[derive(Clone)]
pub struct CompletionModel {
    client: OllamaClient,
    model_id: String,
}

impl std::fmt::Debug for CompletionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionModel")
            .field("model_id", &self.model_id)
            .finish_non_exhaustive()
    }
}

impl CompletionModel {
    /// Create a new completion model.
    pub(crate) fn new(client: OllamaClient, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
        }
    }

    /// Build the request body for `/api/generate`.
    fn build_request_body(&self, prompt: &str, options: GenerateOptions) -> Value {
        let mut body = serde_json::json!({
            "model": self.model_id,
            "prompt": prompt,
            "stream": false
        });

        let mut opts = serde_json::Map::new();
        if let Some(temp) = options.temperature {
            opts.insert("temperature".to_string(), serde_json::json!(temp));
        }
        if let Some(max_tokens) = options.max_tokens {
            opts.insert("num_predict".to_string(), serde_json::json!(max_tokens));
        }
        if !opts.is_empty() {
            body["options"] = Value::Object(opts);
        }

        body
    }
}

/// Pull the completion text out of an `/api/generate` response.
pub(crate) fn parse_generate_response(json: &Value) -> Result<String, ProviderError> {
    json.get("response")
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| {
            ProviderError::response_format("ollama", "response body missing 'response' field")
        })
}

#[async_trait]
impl TextModel for CompletionModel {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn provider(&self) -> &'static str {
        "ollama"
    }

    #[instrument(skip(self, prompt, options), fields(model = %self.model_id))]
    async fn generate(
        &self,
        prompt: &str,
        options: GenerateOptions,
    ) -> Result<String, ProviderError> {
        let body = self.build_request_body(prompt, options);
        let url = format!("{}/api/generate", self.client.base_url());

        debug!(prompt_len = prompt.len(), "sending request to Ollama API");

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
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::http_status("ollama", status, error_text));
        }

        let json: Value = response.json().await?;
        parse_generate_response(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate_response() {
        let json = serde_json::json!({"model": "gemma3", "response": "hello", "done": true});
        assert_eq!(parse_generate_response(&json).expect("text"), "hello");
    }

    #[test]
    fn test_parse_generate_response_missing_field() {
        let json = serde_json::json!({"done": true});
        let err = parse_generate_response(&json).expect_err("should fail");
        assert_eq!(
            err.kind,
            crate::providers::common::ProviderErrorKind::ResponseFormat
        );
    }

    #[test]
    fn test_request_body_includes_options() {
        let model = OllamaClient::new().completion_model("gemma3:latest");
        let body = model.build_request_body(
            "hi",
            GenerateOptions::new()
                .with_temperature(0.2)
                .with_max_tokens(64),
        );
        assert_eq!(body["model"], "gemma3:latest");
        assert_eq!(body["stream"], false);
        assert_eq!(body["options"]["num_predict"], 64);
    }

    #[test]
    fn test_request_body_omits_empty_options() {
        let model = OllamaClient::new().completion_model("gemma3:latest");
        let body = model.build_request_body("hi", GenerateOptions::default());
        assert!(body.get("options").is_none());
    }
}
