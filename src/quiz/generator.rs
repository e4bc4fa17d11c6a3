//! Prompt assembly for quiz generation.
//!
//! The retrieval step returns up to `retrieval_k` chunks; a random sample of
//! `sample_size` of them is concatenated and truncated to `context_budget`
//! characters to bound prompt size. The cutoff is hard, not sentence-aware.
//! All three knobs are configurable rather than baked in.

use fastrand::Rng;

/// System instructions sent ahead of every generation request.
///
/// The strict output contract ("ONLY a JSON list") keeps the extraction
/// layer's job tractable; it is still treated as best-effort downstream.
pub const QA_SYSTEM_PROMPT: &str = "\
You are a professional exam tutor. Based on the textbook context, generate ONLY a JSON list.

STRICTLY follow this format:
[
  {\"question\": \"What is ...?\", \"answer\": \"...\", \"topic\": \"TopicName\"},
  ...
]

Do NOT include numbering, explanations, markdown, or any text outside the list. Output MUST start with `[`.
Use ONLY the context below.";

/// Default number of chunks requested from the vector store.
pub const DEFAULT_RETRIEVAL_K: usize = 50;

/// Default number of retrieved chunks sampled into the prompt.
pub const DEFAULT_SAMPLE_SIZE: usize = 8;

/// Default character budget for the concatenated context.
pub const DEFAULT_CONTEXT_BUDGET: usize = 2000;

/// Tunables for context selection and prompt assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Chunks requested from the vector store per generation.
    pub retrieval_k: usize,
    /// Retrieved chunks sampled (without replacement) into the prompt.
    pub sample_size: usize,
    /// Hard character cap on the concatenated context.
    pub context_budget: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            retrieval_k: DEFAULT_RETRIEVAL_K,
            sample_size: DEFAULT_SAMPLE_SIZE,
            context_budget: DEFAULT_CONTEXT_BUDGET,
        }
    }
}

impl GeneratorConfig {
    /// Create a config with the default knobs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of chunks requested from the store.
    #[must_use]
    pub const fn with_retrieval_k(mut self, retrieval_k: usize) -> Self {
        self.retrieval_k = retrieval_k;
        self
    }

    /// Set the number of chunks sampled into the prompt.
    #[must_use]
    pub const fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Set the context character budget.
    #[must_use]
    pub const fn with_context_budget(mut self, context_budget: usize) -> Self {
        self.context_budget = context_budget;
        self
    }
}

/// Sample up to `sample_size` chunks without replacement, join them, and
/// truncate to the character budget.
#[must_use]
pub fn select_context(mut chunks: Vec<String>, config: &GeneratorConfig, rng: &mut Rng) -> String {
    rng.shuffle(&mut chunks);
    chunks.truncate(config.sample_size);

    let joined = chunks.join("\n");
    truncate_chars(joined, config.context_budget)
}

/// The per-request instruction line.
///
/// Biases toward `topic` when given, otherwise asks for general coverage;
/// always requests exactly `n` pairs.
#[must_use]
pub fn build_instruction(n: usize, topic: Option<&str>) -> String {
    match topic {
        Some(topic) => {
            format!("Generate {n} question-answer pairs focused on the topic '{topic}'.")
        }
        None => format!("Generate {n} general exam-style question-answer pairs."),
    }
}

/// Assemble the full generation prompt: system instructions, instruction,
/// and retrieved context.
#[must_use]
pub fn build_generation_prompt(instruction: &str, context: &str) -> String {
    format!(
        "{QA_SYSTEM_PROMPT}\n\n{}\n\nContext:\n{}",
        instruction.trim(),
        context.trim()
    )
}

/// Hard truncation on a char boundary.
fn truncate_chars(text: String, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text,
    }
}
