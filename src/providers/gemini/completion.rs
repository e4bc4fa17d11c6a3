//! Gemini generateContent API implementation.

use super::client::GeminiClient;
use crate::providers::common::{ApiClient, GenerateOptions, ProviderError, TextModel};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

/// Gemini completion model.
#[derive(Clone)]
pub struct CompletionModel {
    client: GeminiClient,
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
    pub(crate) fn new(client: GeminiClient, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
        }
    }

    /// Build the request body for `models/{model}:generateContent`.
    fn build_request_body(prompt: &str, options: GenerateOptions) -> Value {
        let mut body = serde_json::json!({
            "contents": [{
                "parts": [{"text": prompt}]
            }]
        });

        let mut config = serde_json::Map::new();
        if let Some(temp) = options.temperature {
            config.insert("temperature".to_string(), serde_json::json!(temp));
        }
        if let Some(max_tokens) = options.max_tokens {
            config.insert("maxOutputTokens".to_string(), serde_json::json!(max_tokens));
        }
        if !config.is_empty() {
            body["generationConfig"] = Value::Object(config);
        }

        body
    }
}

/// Concatenate the text parts of the first candidate.
pub(crate) fn parse_generate_content_response(json: &Value) -> Result<String, ProviderError> {
    let parts = json
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.pointer("/content/parts"))
        .and_then(Value::as_array);

    let Some(parts) = parts else {
        return Err(ProviderError::response_format(
            "gemini",
            "response has no candidates with content parts",
        ));
    };

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect::<Vec<_>>()
        .join("");

    if text.is_empty() {
        return Err(ProviderError::response_format(
            "gemini",
            "candidate contained no text parts",
        ));
    }
    Ok(text)
}

#[async_trait]
impl TextModel for CompletionModel {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn provider(&self) -> &'static str {
        "gemini"
    }

    #[instrument(skip(self, prompt, options), fields(model = %self.model_id))]
    async fn generate(
        &self,
        prompt: &str,
        options: GenerateOptions,
    ) -> Result<String, ProviderError> {
        let body = Self::build_request_body(prompt, options);
        let url = format!(
            "{}/models/{}:generateContent",
            self.client.base_url(),
            self.model_id
        );

        debug!(prompt_len = prompt.len(), "sending request to Gemini API");

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
            return Err(ProviderError::http_status("gemini", status, error_text));
        }

        let json: Value = response.json().await?;
        parse_generate_content_response(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate_content_response() {
        let json = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{"text": "Hello "}, {"text": "world"}],
                    "role": "model"
                }
            }]
        });
        assert_eq!(
            parse_generate_content_response(&json).expect("text"),
            "Hello world"
        );
    }

    #[test]
    fn test_parse_generate_content_no_candidates() {
        let json = serde_json::json!({"candidates": []});
        assert!(parse_generate_content_response(&json).is_err());
    }

    #[test]
    fn test_request_body_shape() {
        let body = CompletionModel::build_request_body(
            "quiz me",
            GenerateOptions::new().with_temperature(0.5),
        );
        assert_eq!(body["contents"][0]["parts"][0]["text"], "quiz me");
        assert_eq!(body["generationConfig"]["temperature"], 0.5);
    }
}
