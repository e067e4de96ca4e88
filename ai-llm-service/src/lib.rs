//! OpenAI-compatible LLM client shared by the workspace.
//!
//! - [`OpenAiService`] performs non-streaming chat completions and embeddings.
//! - [`config`] builds [`LlmModelConfig`] values from environment variables.
//! - [`error_handler`] holds the unified [`AiLlmError`] and env parsing helpers.
//! - [`telemetry`] provides the timestamp format and a console layer for binaries.

pub mod config;
pub mod error_handler;
pub mod services;
pub mod telemetry;

pub use config::llm_model_config::LlmModelConfig;
pub use error_handler::{AiLlmError, ConfigError, ProviderError};
pub use services::open_ai_service::OpenAiService;
