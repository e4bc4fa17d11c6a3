//! Ollama provider: local, endpoint-based text generation and embeddings.

mod client;
mod completion;
mod embedding;

pub use client::{OLLAMA_API_BASE_URL, OllamaClient, OllamaClientBuilder};
pub use completion::CompletionModel;
pub use embedding::OllamaEmbeddingModel;
