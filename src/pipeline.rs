//! The end-to-end quiz pipeline.
//!
//! [`Pipeline`] owns its collaborators explicitly — a [`VectorStore`], a
//! [`TextModel`], and a [`PipelineConfig`] — rather than reaching for
//! process-wide singletons, so every seam can be replaced with a test
//! double.
//!
//! Data flow: PDF -> chunks -> vector store -> similarity query -> context
//! -> prompt -> model response -> parsed QA pairs -> (student answers) ->
//! grading -> aggregation -> recommended topics.

use crate::error::{Error, Result};
use crate::grading::{GradedAnswer, Grader};
use crate::loader::{ChunkConfig, PdfLoader, chunk_text};
use crate::providers::{GenerateOptions, TextModel};
use crate::quiz::{
    GeneratorConfig, QuestionAnswer, build_generation_prompt, build_instruction, extract_qa_array,
    select_context,
};
use crate::recommend;
use crate::store::VectorStore;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument};

/// Tunables for the whole pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineConfig {
    /// Chunking parameters for ingestion.
    pub chunking: ChunkConfig,
    /// Context selection and prompt assembly knobs.
    pub generator: GeneratorConfig,
    /// Generation options passed to the model.
    pub options: GenerateOptions,
}

/// The retrieval-augmented quiz pipeline.
pub struct Pipeline {
    store: Arc<dyn VectorStore>,
    model: Arc<dyn TextModel>,
    grader: Grader,
    config: PipelineConfig,
    rng: Mutex<fastrand::Rng>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("model", &self.model.model_id())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Create a pipeline with default configuration.
    #[must_use]
    pub fn new(store: Arc<dyn VectorStore>, model: Arc<dyn TextModel>) -> Self {
        Self::with_config(store, model, PipelineConfig::default())
    }

    /// Create a pipeline with explicit configuration.
    #[must_use]
    pub fn with_config(
        store: Arc<dyn VectorStore>,
        model: Arc<dyn TextModel>,
        config: PipelineConfig,
    ) -> Self {
        let grader = Grader::new(Arc::clone(&model));
        Self {
            store,
            model,
            grader,
            config,
            rng: Mutex::new(fastrand::Rng::new()),
        }
    }

    /// Seed the context-sampling RNG. Tests use this for determinism.
    #[must_use]
    pub fn with_rng_seed(self, seed: u64) -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::with_seed(seed)),
            ..self
        }
    }

    /// The pipeline configuration.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load a PDF, split it into chunks, and index them under `doc_id`.
    ///
    /// Returns the number of chunks stored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Ingest`] for unreadable documents,
    /// [`Error::ChunkConfig`] for invalid chunking parameters, and
    /// [`Error::Retrieval`] when embedding or storage fails.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub async fn ingest_pdf(&self, path: impl AsRef<Path>, doc_id: &str) -> Result<usize> {
        let chunks = PdfLoader::new(path.as_ref()).load_chunks(&self.config.chunking)?;
        let count = chunks.len();
        self.store.add_chunks(doc_id, chunks).await?;
        info!(doc_id, chunks = count, "document ingested");
        Ok(count)
    }

    /// Chunk and index already-extracted text under `doc_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChunkConfig`] for invalid chunking parameters and
    /// [`Error::Retrieval`] when embedding or storage fails.
    pub async fn ingest_text(&self, text: &str, doc_id: &str) -> Result<usize> {
        let chunks = chunk_text(text, &self.config.chunking)?;
        let count = chunks.len();
        self.store.add_chunks(doc_id, chunks).await?;
        Ok(count)
    }

    /// Generate `n` question/answer pairs for a document, optionally biased
    /// toward a topic.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoContext`] when the document has no indexed
    /// chunks, [`Error::Retrieval`] when the similarity query fails,
    /// [`Error::Provider`] when the model call fails, and
    /// [`Error::ResponseParse`] when the response cannot be decoded.
    #[instrument(skip(self), fields(doc_id, n, topic))]
    pub async fn generate_qa_pairs(
        &self,
        doc_id: &str,
        n: usize,
        topic: Option<&str>,
    ) -> Result<Vec<QuestionAnswer>> {
        let query = topic.unwrap_or("general");
        let chunks = self
            .store
            .similarity_search(query, self.config.generator.retrieval_k, doc_id)
            .await?;

        if chunks.is_empty() {
            return Err(Error::no_context(doc_id));
        }

        let context = {
            let mut rng = self.rng.lock().expect("pipeline rng mutex poisoned");
            select_context(chunks, &self.config.generator, &mut rng)
        };
        let instruction = build_instruction(n, topic);
        let prompt = build_generation_prompt(&instruction, &context);

        debug!(prompt_len = prompt.len(), "requesting quiz generation");
        let response = self.model.generate(&prompt, self.config.options).await?;

        let pairs = extract_qa_array(&response)?;
        info!(doc_id, pairs = pairs.len(), "quiz generated");
        Ok(pairs)
    }

    /// Grade a single student answer. Never fails; see [`Grader::grade`].
    pub async fn grade(
        &self,
        reference: &str,
        student: &str,
        question: Option<&str>,
    ) -> crate::grading::Grade {
        self.grader.grade(reference, student, question).await
    }

    /// Grade a batch of answers against their generated pairs.
    ///
    /// Pairs and answers are matched by position; missing or blank answers
    /// short-circuit to the "No answer submitted." default without a model
    /// call. A malformed grading response degrades that one item to the
    /// parse fallback, never the batch.
    #[instrument(skip(self, pairs, answers), fields(pairs = pairs.len()))]
    pub async fn grade_all(
        &self,
        pairs: &[QuestionAnswer],
        answers: &[String],
    ) -> Vec<GradedAnswer> {
        let mut graded = Vec::with_capacity(pairs.len());
        for (i, pair) in pairs.iter().enumerate() {
            let student = answers.get(i).map(String::as_str).unwrap_or("");
            if student.trim().is_empty() {
                graded.push(GradedAnswer::unanswered(pair));
                continue;
            }
            let grade = self
                .grader
                .grade(&pair.answer, student, Some(&pair.question))
                .await;
            graded.push(GradedAnswer::from_pair(pair, student, grade));
        }
        graded
    }

    /// Recommend up to three weak topics from graded results.
    #[must_use]
    pub fn recommend(&self, graded: &[GradedAnswer]) -> Vec<String> {
        recommend::recommend(graded)
    }
}
