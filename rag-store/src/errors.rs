//! Unified error types for the crate.

use std::path::PathBuf;

use ai_llm_service::AiLlmError;
use thiserror::Error;

/// Top-level error for rag-store operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// The reference corpus could not be read.
    #[error("cannot read corpus {}: {source}", .path.display())]
    Corpus {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The splitter rejected the chunk size/overlap pair.
    #[error("chunking error: {0}")]
    Chunking(#[from] text_splitter::ChunkConfigError),

    /// Embedding backend failed.
    #[error("embedding error: {0}")]
    Embedding(#[from] AiLlmError),

    /// Mismatch in vector dimensionality across records.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    /// Provider returned a different number of vectors than texts sent.
    #[error("embedding count mismatch: got {got}, want {want}")]
    EmbeddingCountMismatch { got: usize, want: usize },
}
