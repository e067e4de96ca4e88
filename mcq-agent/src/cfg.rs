//! Runtime configuration loaded from environment variables.
//!
//! - `MCQA_USE_RAG`                 = augment prompts with retrieved context (default `true`)
//! - `RETRIEVE_CONTEXT_FOR_ANSWERS` = also query the index once per choice (default `false`)
//! - `REFERENCE_CORPUS_PATH`        = plain-text corpus (default `textbook.txt`)
//! - `RAG_CHUNK_SIZE` / `RAG_CHUNK_OVERLAP` / `RAG_TOP_K` / `EMBEDDING_BATCH`
//! - `ANSWER_LOG_PATH`              = append-only answer log (default `app.log`)
//!
//! OpenAI variables are read by `ai_llm_service::config::default_config`.

use std::path::PathBuf;

use ai_llm_service::LlmModelConfig;
use ai_llm_service::config::default_config::{config_openai_chat, config_openai_embedding};
use ai_llm_service::error_handler::{EnvLookup, process_env, var_or};
use rag_store::RagConfig;

use crate::error::AgentError;

pub const DEFAULT_CORPUS_PATH: &str = "textbook.txt";
pub const DEFAULT_LOG_PATH: &str = "app.log";

/// Everything needed to construct an [`crate::McqAgent`].
#[derive(Clone, Debug)]
pub struct AgentConfig {
    pub chat: LlmModelConfig,
    pub embedding: LlmModelConfig,
    pub rag: RagConfig,
    pub use_rag: bool,
    pub retrieve_for_answers: bool,
    pub log_path: PathBuf,
}

impl AgentConfig {
    /// Reads the process environment.
    ///
    /// # Errors
    /// See [`AgentConfig::from_lookup`].
    pub fn from_env() -> Result<Self, AgentError> {
        Self::from_lookup(&process_env)
    }

    /// Builds the config from an arbitrary variable lookup.
    ///
    /// # Errors
    /// - [`AgentError::Llm`] when `OPENAI_API_KEY` is missing or an OpenAI knob is malformed
    /// - [`AgentError::Config`] for malformed booleans or sizes
    /// - [`AgentError::Rag`] when chunking knobs are inconsistent
    pub fn from_lookup(lookup: EnvLookup<'_>) -> Result<Self, AgentError> {
        let chat = config_openai_chat(lookup)?;
        let embedding = config_openai_embedding(lookup)?;

        let defaults = RagConfig::new_default(var_or(
            lookup,
            "REFERENCE_CORPUS_PATH",
            DEFAULT_CORPUS_PATH,
        ));
        let rag = RagConfig {
            chunk_size: parse_usize(lookup, "RAG_CHUNK_SIZE", defaults.chunk_size)?,
            chunk_overlap: parse_usize(lookup, "RAG_CHUNK_OVERLAP", defaults.chunk_overlap)?,
            top_k: parse_usize(lookup, "RAG_TOP_K", defaults.top_k)?,
            embed_batch: parse_usize(lookup, "EMBEDDING_BATCH", defaults.embed_batch)?,
            ..defaults
        };
        rag.validate()?;

        Ok(Self {
            chat,
            embedding,
            rag,
            use_rag: parse_bool(lookup, "MCQA_USE_RAG", true)?,
            retrieve_for_answers: parse_bool(lookup, "RETRIEVE_CONTEXT_FOR_ANSWERS", false)?,
            log_path: var_or(lookup, "ANSWER_LOG_PATH", DEFAULT_LOG_PATH).into(),
        })
    }
}

fn parse_bool(lookup: EnvLookup<'_>, name: &str, default: bool) -> Result<bool, AgentError> {
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(default),
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AgentError::Config(format!(
            "{name} must be a boolean, got {raw:?}"
        ))),
    }
}

fn parse_usize(lookup: EnvLookup<'_>, name: &str, default: usize) -> Result<usize, AgentError> {
    match lookup(name) {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse().map_err(|_| {
            AgentError::Config(format!("{name} must be a non-negative integer, got {raw:?}"))
        }),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ai_llm_service::{AiLlmError, ConfigError};
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AgentConfig, AgentError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AgentConfig::from_lookup(&move |k: &str| map.get(k).cloned())
    }

    #[test]
    fn defaults_with_only_api_key() {
        let cfg = load(&[("OPENAI_API_KEY", "sk-test")]).unwrap();

        assert!(cfg.use_rag);
        assert!(!cfg.retrieve_for_answers);
        assert_eq!(cfg.log_path, PathBuf::from("app.log"));
        assert_eq!(cfg.rag.corpus_path, PathBuf::from("textbook.txt"));
        assert_eq!(cfg.rag.chunk_size, 1000);
        assert_eq!(cfg.rag.chunk_overlap, 150);
        assert_eq!(cfg.rag.top_k, 4);
        assert_eq!(cfg.rag.embed_batch, 128);
        assert_eq!(cfg.chat.model, "gpt-3.5-turbo");
        assert_eq!(cfg.embedding.model, "text-embedding-ada-002");
    }

    #[test]
    fn missing_api_key_fails_immediately() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(
            err,
            AgentError::Llm(AiLlmError::Config(ConfigError::MissingVar("OPENAI_API_KEY")))
        ));
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = load(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("MCQA_USE_RAG", "false"),
            ("RETRIEVE_CONTEXT_FOR_ANSWERS", "True"),
            ("REFERENCE_CORPUS_PATH", "/data/biology.txt"),
            ("RAG_CHUNK_SIZE", "500"),
            ("RAG_CHUNK_OVERLAP", "50"),
            ("RAG_TOP_K", "2"),
            ("ANSWER_LOG_PATH", "/tmp/answers.log"),
        ])
        .unwrap();

        assert!(!cfg.use_rag);
        assert!(cfg.retrieve_for_answers);
        assert_eq!(cfg.rag.corpus_path, PathBuf::from("/data/biology.txt"));
        assert_eq!((cfg.rag.chunk_size, cfg.rag.chunk_overlap, cfg.rag.top_k), (500, 50, 2));
        assert_eq!(cfg.log_path, PathBuf::from("/tmp/answers.log"));
    }

    #[test]
    fn malformed_values_are_rejected() {
        let bad_bool = load(&[("OPENAI_API_KEY", "k"), ("MCQA_USE_RAG", "maybe")]).unwrap_err();
        assert!(matches!(bad_bool, AgentError::Config(_)));

        let bad_num = load(&[("OPENAI_API_KEY", "k"), ("RAG_TOP_K", "-1")]).unwrap_err();
        assert!(matches!(bad_num, AgentError::Config(_)));

        let overlap = load(&[("OPENAI_API_KEY", "k"), ("RAG_CHUNK_OVERLAP", "1000")]).unwrap_err();
        assert!(matches!(overlap, AgentError::Rag(_)));
    }
}
