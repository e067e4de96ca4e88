//! Accuracy evaluation over a JSONL set of questions.
//!
//! One case per line:
//! `{"question": "...", "choices": ["...", "..."], "answer": 0}`
//! where `answer` is the 0-based index of the correct choice. Blank lines are skipped.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::agent::McqAgent;
use crate::error::AgentError;
use crate::progress::Progress;
use crate::resolve::ResolvedIndex;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalCase {
    pub question: String,
    pub choices: Vec<String>,
    pub answer: usize,
}

/// Tally of an evaluation run.
///
/// `unmatched` replies and `failed` calls both count as incorrect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvalSummary {
    pub total: usize,
    pub correct: usize,
    pub unmatched: usize,
    pub failed: usize,
}

impl EvalSummary {
    /// `correct / total`, or `0.0` for an empty run.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

impl fmt::Display for EvalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} correct ({:.1}%), {} unmatched, {} failed",
            self.correct,
            self.total,
            self.accuracy() * 100.0,
            self.unmatched,
            self.failed
        )
    }
}

/// Reads and validates a JSONL dataset.
///
/// # Errors
/// [`AgentError::File`] if unreadable, [`AgentError::Dataset`] for a bad row.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Vec<EvalCase>, AgentError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| AgentError::File {
        path: path.to_path_buf(),
        source,
    })?;
    parse_dataset(&text)
}

/// Parses JSONL text; line numbers in errors are 1-based.
pub fn parse_dataset(text: &str) -> Result<Vec<EvalCase>, AgentError> {
    let mut cases = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let case: EvalCase = serde_json::from_str(line).map_err(|e| AgentError::Dataset {
            line: i + 1,
            reason: e.to_string(),
        })?;
        if case.answer >= case.choices.len() {
            return Err(AgentError::Dataset {
                line: i + 1,
                reason: format!(
                    "answer {} out of range for {} choices",
                    case.answer,
                    case.choices.len()
                ),
            });
        }
        cases.push(case);
    }
    Ok(cases)
}

/// Answers every case in order and tallies the results.
///
/// A failing call is counted and logged; the run continues with the next case.
pub async fn evaluate(agent: &McqAgent, cases: &[EvalCase], progress: &dyn Progress) -> EvalSummary {
    progress.set_total(cases.len() as u64);
    let mut summary = EvalSummary::default();

    for (i, case) in cases.iter().enumerate() {
        summary.total += 1;
        match agent.get_response(&case.question, &case.choices).await {
            Ok(ResolvedIndex::Choice(idx)) if idx == case.answer => summary.correct += 1,
            Ok(ResolvedIndex::Choice(_)) => {}
            Ok(ResolvedIndex::NoMatch) => summary.unmatched += 1,
            Err(e) => {
                summary.failed += 1;
                warn!(case = i + 1, error = %e, "question failed");
            }
        }
        progress.step(&format!("{}/{} correct", summary.correct, summary.total));
    }

    progress.finish(&summary.to_string());
    info!(
        total = summary.total,
        correct = summary.correct,
        unmatched = summary.unmatched,
        failed = summary.failed,
        accuracy = summary.accuracy(),
        "evaluation finished"
    );
    summary
}
