//! Error types for the loader module.

use thiserror::Error;

/// Errors that can occur while reading a source document.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum IngestError {
    /// The PDF could not be parsed.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// The file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors for invalid chunking parameters.
///
/// Raised before any document work starts: a window that does not advance
/// (or walks backwards) would loop forever.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChunkConfigError {
    /// `overlap` must be strictly smaller than `chunk_size`.
    #[error("overlap ({overlap}) must be smaller than chunk size ({chunk_size})")]
    OverlapTooLarge {
        /// Configured window size in words.
        chunk_size: usize,
        /// Configured overlap in words.
        overlap: usize,
    },

    /// `chunk_size` must be non-zero.
    #[error("chunk size must be greater than zero")]
    ZeroChunkSize,
}
