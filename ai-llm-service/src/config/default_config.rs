//! Default OpenAI model configs loaded from environment variables.
//!
//! Two roles are provided, both pointing at the same OpenAI-compatible API:
//!
//! - **Chat**      → chat-completion model that answers questions
//! - **Embedding** → embedding model used to index and query the corpus
//!
//! # Environment variables
//!
//! - `OPENAI_API_KEY`         = bearer credential (mandatory)
//! - `OPENAI_BASE_URL`        = API base URL (default `https://api.openai.com`)
//! - `OPENAI_CHAT_MODEL`      = chat model (default `gpt-3.5-turbo`)
//! - `OPENAI_EMBEDDING_MODEL` = embedding model (default `text-embedding-ada-002`)
//! - `LLM_MAX_TOKENS`         = optional max tokens (u32)
//! - `LLM_TIMEOUT_SECS`       = optional request timeout (u64)

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{
        EnvLookup, Result, must_var, validate_http_endpoint, var_opt_u32, var_opt_u64, var_or,
    },
};

/// Public OpenAI API base URL.
pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com";

/// Chat model used when `OPENAI_CHAT_MODEL` is unset.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";

/// Embedding model used when `OPENAI_EMBEDDING_MODEL` is unset.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";

/// Resolves and validates the API base URL.
fn openai_endpoint(lookup: EnvLookup<'_>) -> Result<String> {
    let url = var_or(lookup, "OPENAI_BASE_URL", DEFAULT_OPENAI_ENDPOINT);
    validate_http_endpoint("OPENAI_BASE_URL", &url)?;
    Ok(url)
}

/// Constructs the **chat** model config.
///
/// Sampling parameters are left unset so the API defaults apply.
///
/// # Errors
/// - [`crate::ConfigError::MissingVar`] when `OPENAI_API_KEY` is missing
/// - [`crate::ConfigError::InvalidFormat`] for a non-HTTP base URL
/// - [`crate::ConfigError::InvalidNumber`] for malformed numeric knobs
pub fn config_openai_chat(lookup: EnvLookup<'_>) -> Result<LlmModelConfig> {
    let api_key = must_var(lookup, "OPENAI_API_KEY")?;
    let endpoint = openai_endpoint(lookup)?;
    let model = var_or(lookup, "OPENAI_CHAT_MODEL", DEFAULT_CHAT_MODEL);

    Ok(LlmModelConfig {
        model,
        endpoint,
        api_key,
        max_tokens: var_opt_u32(lookup, "LLM_MAX_TOKENS")?,
        temperature: None,
        top_p: None,
        timeout_secs: var_opt_u64(lookup, "LLM_TIMEOUT_SECS")?,
    })
}

/// Constructs the **embedding** model config.
///
/// # Errors
/// Same as [`config_openai_chat`].
pub fn config_openai_embedding(lookup: EnvLookup<'_>) -> Result<LlmModelConfig> {
    let api_key = must_var(lookup, "OPENAI_API_KEY")?;
    let endpoint = openai_endpoint(lookup)?;
    let model = var_or(lookup, "OPENAI_EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL);

    Ok(LlmModelConfig {
        model,
        endpoint,
        api_key,
        max_tokens: None,
        temperature: None,
        top_p: None,
        timeout_secs: var_opt_u64(lookup, "LLM_TIMEOUT_SECS")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handler::{AiLlmError, ConfigError};

    #[test]
    fn chat_config_uses_defaults() {
        let lookup = |k: &str| (k == "OPENAI_API_KEY").then(|| "sk-test".to_string());
        let cfg = config_openai_chat(&lookup).unwrap();

        assert_eq!(cfg.model, DEFAULT_CHAT_MODEL);
        assert_eq!(cfg.endpoint, DEFAULT_OPENAI_ENDPOINT);
        assert_eq!(cfg.api_key, "sk-test");
        assert_eq!(cfg.temperature, None);
        assert_eq!(cfg.timeout_secs, None);
    }

    #[test]
    fn embedding_config_reads_overrides() {
        let lookup = |k: &str| match k {
            "OPENAI_API_KEY" => Some("sk-test".to_string()),
            "OPENAI_BASE_URL" => Some("http://localhost:8080".to_string()),
            "OPENAI_EMBEDDING_MODEL" => Some("text-embedding-3-small".to_string()),
            "LLM_TIMEOUT_SECS" => Some("30".to_string()),
            _ => None,
        };
        let cfg = config_openai_embedding(&lookup).unwrap();

        assert_eq!(cfg.model, "text-embedding-3-small");
        assert_eq!(cfg.endpoint, "http://localhost:8080");
        assert_eq!(cfg.timeout_secs, Some(30));
    }

    #[test]
    fn missing_key_fails_immediately() {
        let lookup = |_: &str| -> Option<String> { None };
        let err = config_openai_chat(&lookup).unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::MissingVar("OPENAI_API_KEY"))
        ));
    }
}
