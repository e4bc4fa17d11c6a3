//! Convenience re-exports for the common case.
//!
//! ```ignore
//! use quizforge::prelude::*;
//! ```

pub use crate::embedding::{Embedding, EmbeddingModel};
pub use crate::error::{Error, Result};
pub use crate::grading::{Grade, GradedAnswer, Grader};
pub use crate::history::{ResultStore, StoredResult};
pub use crate::loader::{ChunkConfig, PdfLoader};
pub use crate::pipeline::{Pipeline, PipelineConfig};
pub use crate::providers::{
    GenerateOptions, ProviderError, ProviderSelection, TextModel,
    gemini::GeminiClient, ollama::OllamaClient,
};
pub use crate::quiz::{GeneratorConfig, QuestionAnswer};
pub use crate::recommend::{recommend, recommend_top};
pub use crate::store::{InMemoryVectorStore, VectorStore};
