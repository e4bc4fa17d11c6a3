//! Quizforge is a Rust library for retrieval-augmented quiz generation over
//! study material.
//!
//! The pipeline ingests PDFs into overlapping text chunks, embeds and indexes
//! them in a vector store, asks a language model to produce
//! question/answer/topic triples grounded in retrieved context, grades
//! free-text student answers against the reference answers, and recommends
//! the topics a student is weakest on.
//!
//! All external capabilities (embedding, nearest-neighbour search, text
//! generation) sit behind traits so they can be swapped or mocked:
//!
//! - [`embedding::EmbeddingModel`] — text to vector
//! - [`store::VectorStore`] — chunk storage and similarity search
//! - [`providers::TextModel`] — prompt to free-text response
//!
//! [`pipeline::Pipeline`] wires the pieces together.

pub mod embedding;
pub mod error;
pub mod grading;
pub mod history;
pub mod loader;
pub mod pipeline;
pub mod prelude;
pub mod providers;
pub mod quiz;
pub mod recommend;
pub mod store;

pub use error::{Error, Result};
pub use grading::{Grade, GradedAnswer};
pub use pipeline::{Pipeline, PipelineConfig};
pub use quiz::QuestionAnswer;
