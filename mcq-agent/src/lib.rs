//! Multiple-choice answering over an LLM chat API.
//!
//! Public entry point: [`McqAgent::get_response`]. For each question it
//! optionally retrieves background passages from `rag-store`, renders the
//! choices as `Option A: ...` lines under a fixed few-shot system prompt,
//! calls the chat model and maps the free-text reply back to a choice index
//! ([`ResolvedIndex`], `-1` when nothing matches).
//!
//! # Example
//! ```no_run
//! # use mcq_agent::{AgentConfig, McqAgent};
//! # #[tokio::main] async fn main() -> Result<(), mcq_agent::AgentError> {
//! let agent = McqAgent::from_config(AgentConfig::from_env()?).await?;
//! let choices = vec!["haploid".to_string(), "diploid".to_string()];
//! let idx = agent.get_response("How many chromosome sets do gametes carry?", &choices).await?;
//! println!("{}", idx.as_sentinel());
//! # Ok(()) }
//! ```

pub mod agent;
pub mod cfg;
pub mod error;
pub mod eval;
pub mod llm;
pub mod progress;
pub mod prompt;
pub mod resolve;
pub mod retrieve;
pub mod telemetry;

pub use agent::McqAgent;
pub use cfg::AgentConfig;
pub use error::AgentError;
pub use eval::{EvalCase, EvalSummary, evaluate, load_dataset};
pub use llm::ChatModel;
pub use progress::{IndicatifProgress, NoopProgress, Progress};
pub use resolve::{ResolvedIndex, resolve_index};
pub use retrieve::{ContextRetriever, NoopRetriever, StoreRetriever};
pub use telemetry::AnswerLog;
