//! Sliding-window word chunking for ingested documents.
//!
//! A chunk is a window of `chunk_size` words; consecutive windows share
//! `overlap` words so context is not lost at chunk boundaries. For a
//! document of `L` words the chunker yields `ceil(L / (chunk_size -
//! overlap))` chunks, and a document shorter than one window yields exactly
//! one chunk.

use super::errors::ChunkConfigError;

/// Default window size in words.
pub const DEFAULT_CHUNK_SIZE: usize = 300;

/// Default overlap between consecutive windows in words.
pub const DEFAULT_OVERLAP: usize = 50;

/// Configuration for the sliding-window chunker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Window size in words.
    pub chunk_size: usize,
    /// Words shared between consecutive windows. Must be < `chunk_size`.
    pub overlap: usize,
    /// Display-width cap per chunk in characters. Cosmetic only; defaults
    /// to `chunk_size * 4` when unset.
    pub max_chunk_chars: Option<usize>,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_OVERLAP,
            max_chunk_chars: None,
        }
    }
}

impl ChunkConfig {
    /// Create a config with the default window and overlap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window size in words.
    #[must_use]
    pub const fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set the overlap between consecutive windows in words.
    #[must_use]
    pub const fn with_overlap(mut self, overlap: usize) -> Self {
        self.overlap = overlap;
        self
    }

    /// Set the cosmetic per-chunk character cap.
    #[must_use]
    pub const fn with_max_chunk_chars(mut self, max_chunk_chars: usize) -> Self {
        self.max_chunk_chars = Some(max_chunk_chars);
        self
    }

    /// Validate the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkConfigError`] when the window is empty or the overlap
    /// is not strictly smaller than the window.
    pub const fn validate(&self) -> Result<(), ChunkConfigError> {
        if self.chunk_size == 0 {
            return Err(ChunkConfigError::ZeroChunkSize);
        }
        if self.overlap >= self.chunk_size {
            return Err(ChunkConfigError::OverlapTooLarge {
                chunk_size: self.chunk_size,
                overlap: self.overlap,
            });
        }
        Ok(())
    }

    /// Effective per-chunk character cap.
    #[must_use]
    pub fn char_limit(&self) -> usize {
        self.max_chunk_chars.unwrap_or(self.chunk_size * 4)
    }
}

/// Split cleaned text into overlapping word-window chunks.
///
/// Empty windows are dropped, so empty or whitespace-only input yields an
/// empty vector rather than an error.
///
/// # Errors
///
/// Returns [`ChunkConfigError`] for invalid parameters.
pub fn chunk_text(text: &str, config: &ChunkConfig) -> Result<Vec<String>, ChunkConfigError> {
    config.validate()?;

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Ok(Vec::new());
    }

    let step = config.chunk_size - config.overlap;
    let limit = config.char_limit();
    let mut chunks = Vec::with_capacity(words.len().div_ceil(step));

    let mut start = 0;
    while start < words.len() {
        let end = usize::min(start + config.chunk_size, words.len());
        chunks.push(shorten(&words[start..end].join(" "), limit));
        start += step;
    }

    Ok(chunks)
}

/// Truncate a chunk to at most `limit` characters on a char boundary.
fn shorten(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => text[..idx].trim_end().to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_chunk_count_matches_formula() {
        // count = ceil(L / (C - O))
        for (len, chunk_size, overlap) in [(1000, 300, 50), (500, 100, 20), (80, 80, 0)] {
            let config = ChunkConfig::new()
                .with_chunk_size(chunk_size)
                .with_overlap(overlap)
                .with_max_chunk_chars(usize::MAX);
            let chunks = chunk_text(&words(len), &config).expect("valid config");
            assert_eq!(chunks.len(), len.div_ceil(chunk_size - overlap));
        }
    }

    #[test]
    fn test_consecutive_chunks_share_overlap() {
        let config = ChunkConfig::new()
            .with_chunk_size(10)
            .with_overlap(3)
            .with_max_chunk_chars(usize::MAX);
        let chunks = chunk_text(&words(30), &config).expect("valid config");

        let first: Vec<&str> = chunks[0].split(' ').collect();
        let second: Vec<&str> = chunks[1].split(' ').collect();
        assert_eq!(first.len(), 10);
        assert_eq!(&first[7..], &second[..3]);
    }

    #[test]
    fn test_short_document_yields_one_chunk() {
        let chunks = chunk_text(&words(42), &ChunkConfig::default()).expect("valid config");
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_empty_input_yields_no_chunks() {
        let chunks = chunk_text("   \n\t  ", &ChunkConfig::default()).expect("valid config");
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_overlap_must_be_smaller_than_chunk_size() {
        let equal = ChunkConfig::new().with_chunk_size(50).with_overlap(50);
        assert_eq!(
            chunk_text("a b c", &equal),
            Err(ChunkConfigError::OverlapTooLarge {
                chunk_size: 50,
                overlap: 50
            })
        );

        let larger = ChunkConfig::new().with_chunk_size(50).with_overlap(60);
        assert!(matches!(
            chunk_text("a b c", &larger),
            Err(ChunkConfigError::OverlapTooLarge { .. })
        ));
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let config = ChunkConfig::new().with_chunk_size(0).with_overlap(0);
        assert_eq!(config.validate(), Err(ChunkConfigError::ZeroChunkSize));
    }

    #[test]
    fn test_chunks_respect_char_limit() {
        let config = ChunkConfig::new()
            .with_chunk_size(100)
            .with_overlap(0)
            .with_max_chunk_chars(20);
        let chunks = chunk_text(&words(100), &config).expect("valid config");
        assert!(chunks.iter().all(|c| c.chars().count() <= 20));
    }

    #[test]
    fn test_default_char_limit_tracks_chunk_size() {
        let config = ChunkConfig::new().with_chunk_size(10).with_overlap(2);
        assert_eq!(config.char_limit(), 40);
        assert_eq!(
            config.with_max_chunk_chars(7).char_limit(),
            7,
            "explicit cap wins"
        );
    }
}
