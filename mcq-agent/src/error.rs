//! Typed error for the mcq-agent crate.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    /// Chat or embeddings API failures, and LLM config errors.
    #[error("LLM error: {0}")]
    Llm(#[from] ai_llm_service::AiLlmError),

    /// Errors from the underlying rag-store crate.
    #[error("RAG error: {0}")]
    Rag(#[from] rag_store::RagError),

    /// Answer log or dataset file could not be opened.
    #[error("cannot open {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid agent configuration value.
    #[error("config error: {0}")]
    Config(String),

    /// Malformed evaluation dataset row.
    #[error("dataset line {line}: {reason}")]
    Dataset { line: usize, reason: String },

    /// More choices than option letters `A`..=`Z`.
    #[error("{0} answer choices given; at most 26 can be lettered")]
    TooManyChoices(usize),
}
