//! Quiz generation: structured question/answer pairs from retrieved context.

mod extract;
mod generator;

pub use extract::{ResponseParseError, extract_qa_array, extract_structured_list};
pub use generator::{
    GeneratorConfig, QA_SYSTEM_PROMPT, build_generation_prompt, build_instruction, select_context,
};

use serde::{Deserialize, Serialize};

/// A generated quiz item: question, reference answer, and free-text topic
/// label. Immutable once parsed from model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    /// The question text.
    pub question: String,
    /// The reference answer.
    pub answer: String,
    /// Free-text topic label; no enforced vocabulary.
    pub topic: String,
}

impl QuestionAnswer {
    /// Create a new question/answer pair.
    #[must_use]
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        topic: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            topic: topic.into(),
        }
    }
}
