//! PDF ingestion: text extraction and chunking.
//!
//! [`PdfLoader`] extracts text page by page with `lopdf`, normalizes
//! whitespace, and hands the result to the sliding-window
//! [`chunker`](crate::loader::chunker). Pages with no extractable text are
//! skipped rather than failing the whole document.

mod chunker;
mod errors;

pub use chunker::{ChunkConfig, DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP, chunk_text};
pub use errors::{ChunkConfigError, IngestError};

use lopdf::Document;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Loads a PDF from disk and turns it into retrieval chunks.
#[derive(Debug, Clone)]
pub struct PdfLoader {
    path: PathBuf,
}

impl PdfLoader {
    /// Create a loader for the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path this loader reads from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Extract and normalize the full document text.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError`] when the file is unreadable or not a valid
    /// PDF. Individual pages without extractable text contribute nothing.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load_text(&self) -> Result<String, IngestError> {
        let doc = Document::load(&self.path)?;

        let mut text = String::new();
        for (page_number, _) in doc.get_pages() {
            match doc.extract_text(&[page_number]) {
                Ok(content) => {
                    text.push_str(&content);
                    text.push(' ');
                }
                Err(err) => {
                    debug!(page = page_number, error = %err, "no extractable text on page");
                }
            }
        }

        Ok(clean_text(&text))
    }

    /// Extract the document text and split it into overlapping chunks.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Ingest`] for unreadable documents and
    /// [`crate::Error::ChunkConfig`] for invalid chunking parameters.
    pub fn load_chunks(&self, config: &ChunkConfig) -> crate::Result<Vec<String>> {
        let text = self.load_text()?;
        let chunks = chunk_text(&text, config)?;
        debug!(
            path = %self.path.display(),
            chunks = chunks.len(),
            "document chunked"
        );
        Ok(chunks)
    }
}

/// Collapse whitespace runs to single spaces, keeping punctuation.
#[must_use]
pub fn clean_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(
            clean_text("one\n\ntwo\t three    four "),
            "one two three four"
        );
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text("  \n "), "");
    }

    #[test]
    fn test_clean_text_keeps_punctuation() {
        assert_eq!(clean_text("a, b; c.\nd!"), "a, b; c. d!");
    }

    #[test]
    fn test_load_text_missing_file_is_ingest_error() {
        let loader = PdfLoader::new("/nonexistent/definitely-missing.pdf");
        assert!(loader.load_text().is_err());
    }
}
