//! Corpus and retrieval configuration.

use std::path::PathBuf;

use crate::errors::RagError;

/// Configuration for building the index and querying it.
#[derive(Clone, Debug)]
pub struct RagConfig {
    /// Plain-text reference corpus.
    pub corpus_path: PathBuf,
    /// Maximum chunk length in characters.
    pub chunk_size: usize,
    /// Characters shared by consecutive chunks.
    pub chunk_overlap: usize,
    /// Passages returned per query.
    pub top_k: usize,
    /// Chunks sent per embeddings request while indexing.
    pub embed_batch: usize,
}

impl RagConfig {
    /// Defaults: 1000-char chunks, 150-char overlap, top-4, batches of 128.
    pub fn new_default(corpus_path: impl Into<PathBuf>) -> Self {
        Self {
            corpus_path: corpus_path.into(),
            chunk_size: 1000,
            chunk_overlap: 150,
            top_k: 4,
            embed_batch: 128,
        }
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), RagError> {
        if self.chunk_size == 0 {
            return Err(RagError::Config("chunk_size must be > 0".into()));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(RagError::Config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        if self.top_k == 0 {
            return Err(RagError::Config("top_k must be > 0".into()));
        }
        if self.embed_batch == 0 {
            return Err(RagError::Config("embed_batch must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = RagConfig::new_default("textbook.txt");
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.chunk_size, 1000);
        assert_eq!(cfg.chunk_overlap, 150);
    }

    #[test]
    fn overlap_must_be_smaller_than_chunk() {
        let cfg = RagConfig {
            chunk_overlap: 1000,
            ..RagConfig::new_default("textbook.txt")
        };
        assert!(matches!(cfg.validate(), Err(RagError::Config(_))));
    }
}
