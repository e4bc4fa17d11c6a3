//! Best-effort extraction of a JSON array from free-text model output.
//!
//! Language models do not reliably emit pure JSON: responses arrive wrapped
//! in prose, trailed by commentary, or contaminated with typographic quotes.
//! This module is the single narrow recovery layer for that — callers get a
//! typed list or a [`ResponseParseError`] carrying the raw response, never a
//! silent empty result.

use super::QuestionAnswer;
use regex::Regex;
use serde::de::DeserializeOwned;
use std::sync::LazyLock;
use thiserror::Error;

/// First syntactically-plausible JSON array of objects, tolerant of
/// surrounding text.
static JSON_ARRAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\s*\{[\s\S]+?\}\s*\]").expect("valid JSON array regex"));

/// Errors from structured-output extraction.
///
/// Both variants carry the raw model response so the failure can be
/// diagnosed; "model produced nothing usable" is always distinguishable
/// from "model produced zero questions".
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResponseParseError {
    /// No JSON array of objects was found anywhere in the response.
    #[error("no JSON array found in model response: {raw}")]
    NoJsonArray {
        /// The full raw response text.
        raw: String,
    },

    /// An array was located but did not decode as the expected shape.
    #[error("could not decode model response as JSON list ({source}): {raw}")]
    Json {
        /// The full raw response text.
        raw: String,
        /// The underlying decode error.
        source: serde_json::Error,
    },
}

impl ResponseParseError {
    /// The raw model response that failed to parse.
    #[must_use]
    pub fn raw(&self) -> &str {
        match self {
            Self::NoJsonArray { raw } | Self::Json { raw, .. } => raw,
        }
    }
}

/// Replace typographic (curly/smart) quotes with straight ASCII quotes.
fn normalize_quotes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{201c}' | '\u{201d}' => '"',
            '\u{2018}' | '\u{2019}' => '\'',
            other => other,
        })
        .collect()
}

/// Extract the first JSON array of objects from free text and decode it.
///
/// The array may be surrounded by prose; typographic quotes are normalized
/// to straight quotes before structural parsing.
///
/// # Errors
///
/// Returns [`ResponseParseError`] when no array is present or decoding
/// fails; the error carries the raw response.
pub fn extract_structured_list<T: DeserializeOwned>(
    text: &str,
) -> Result<Vec<T>, ResponseParseError> {
    let matched = JSON_ARRAY_RE
        .find(text)
        .ok_or_else(|| ResponseParseError::NoJsonArray {
            raw: text.to_string(),
        })?;

    let normalized = normalize_quotes(matched.as_str());
    serde_json::from_str(&normalized).map_err(|source| ResponseParseError::Json {
        raw: text.to_string(),
        source,
    })
}

/// Extract question/answer pairs from a model response.
///
/// # Errors
///
/// See [`extract_structured_list`].
pub fn extract_qa_array(text: &str) -> Result<Vec<QuestionAnswer>, ResponseParseError> {
    extract_structured_list(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_array_surrounded_by_prose() {
        let response = "Here are your questions:\n[{\"question\":\"Q1\",\"answer\":\"A1\",\"topic\":\"T\"}]\nThanks!";
        let pairs = extract_qa_array(response).expect("one pair");
        assert_eq!(pairs, vec![QuestionAnswer::new("Q1", "A1", "T")]);
    }

    #[test]
    fn test_extracts_clean_array() {
        let response = r#"[
            {"question": "What is RAM?", "answer": "Memory", "topic": "Hardware"},
            {"question": "What is a CPU?", "answer": "Processor", "topic": "Hardware"}
        ]"#;
        let pairs = extract_qa_array(response).expect("two pairs");
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1].topic, "Hardware");
    }

    #[test]
    fn test_normalizes_smart_quotes() {
        let response = "Sure!\n[{\u{201c}question\u{201d}: \u{201c}Q\u{201d}, \u{201c}answer\u{201d}: \u{201c}A\u{201d}, \u{201c}topic\u{201d}: \u{201c}T\u{201d}}]";
        let pairs = extract_qa_array(response).expect("smart quotes must parse");
        assert_eq!(pairs, vec![QuestionAnswer::new("Q", "A", "T")]);
    }

    #[test]
    fn test_no_array_is_an_error_carrying_raw() {
        let response = "I'm sorry, I can't produce questions from this.";
        let err = extract_qa_array(response).expect_err("must not return empty list");
        assert!(matches!(err, ResponseParseError::NoJsonArray { .. }));
        assert_eq!(err.raw(), response);
    }

    #[test]
    fn test_malformed_array_is_a_decode_error() {
        let response = "[{\"question\": \"Q\", \"answer\": }]";
        let err = extract_qa_array(response).expect_err("must fail to decode");
        assert!(matches!(err, ResponseParseError::Json { .. }));
        assert_eq!(err.raw(), response);
    }

    #[test]
    fn test_markdown_fenced_array_still_found() {
        let response = "```json\n[{\"question\":\"Q\",\"answer\":\"A\",\"topic\":\"T\"}]\n```";
        let pairs = extract_qa_array(response).expect("fenced array");
        assert_eq!(pairs.len(), 1);
    }
}
