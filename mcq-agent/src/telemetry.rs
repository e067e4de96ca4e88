//! Append-only answer log owned by the agent.
//!
//! The log is a standalone [`Dispatch`]; it is never installed globally.
//! Callers run work under it with `WithSubscriber::with_subscriber` or
//! `tracing::dispatcher::with_default`.

use std::fmt;
use std::fs::OpenOptions;
use std::path::Path;

use ai_llm_service::telemetry::{ChronoRfc3339Utc, TARGET_PREFIX};
use tracing::Dispatch;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{Layer, Registry, fmt as tfmt};

use crate::error::AgentError;

/// File-backed log for question/answer records and unmatched replies.
///
/// Dropping it flushes pending lines.
pub struct AnswerLog {
    dispatch: Dispatch,
    _guard: Option<WorkerGuard>,
}

impl AnswerLog {
    /// Opens (or creates) `path` in append mode.
    ///
    /// Each record is one line: RFC3339 UTC timestamp, level, message and fields.
    ///
    /// # Errors
    /// [`AgentError::File`] when the file cannot be opened for appending.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AgentError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| AgentError::File {
                path: path.to_path_buf(),
                source,
            })?;

        let (writer, guard) = tracing_appender::non_blocking(file);
        let layer = tfmt::layer()
            .with_timer(ChronoRfc3339Utc)
            .with_ansi(false)
            .with_target(false)
            .with_level(true)
            .with_writer(writer)
            .with_filter(answer_targets());

        Ok(Self {
            dispatch: Dispatch::new(Registry::default().with(layer)),
            _guard: Some(guard),
        })
    }

    /// A log that drops every record.
    pub fn disabled() -> Self {
        Self {
            dispatch: Dispatch::none(),
            _guard: None,
        }
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }
}

impl fmt::Debug for AnswerLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnswerLog")
            .field("file_backed", &self._guard.is_some())
            .finish()
    }
}

/// Debug for the answering crates, info for the HTTP client.
fn answer_targets() -> Targets {
    Targets::new()
        .with_target("mcq_agent", LevelFilter::DEBUG)
        .with_target("rag_store", LevelFilter::DEBUG)
        .with_target(TARGET_PREFIX, LevelFilter::INFO)
}
