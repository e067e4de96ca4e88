//! Maps a free-text model reply back to a position in the answer choices.
//!
//! Rules, first match wins:
//! 1. strip a leading `"Answer: "`, then a leading `"Option "` (literal prefixes)
//! 2. a single uppercase letter before the first `:` selects that option
//! 3. the first choice whose text occurs in the reply
//! 4. otherwise [`ResolvedIndex::NoMatch`], logged at error level

use std::fmt;

use tracing::{debug, error};

/// Outcome of resolving a reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolvedIndex {
    /// 0-based index into the answer choices.
    Choice(usize),
    /// The reply matched no choice.
    NoMatch,
}

impl ResolvedIndex {
    /// Integer used for [`ResolvedIndex::NoMatch`] by integer-only consumers.
    pub const NO_MATCH_SENTINEL: i64 = -1;

    pub fn index(self) -> Option<usize> {
        match self {
            Self::Choice(i) => Some(i),
            Self::NoMatch => None,
        }
    }

    /// The index as an integer, `-1` for no match.
    pub fn as_sentinel(self) -> i64 {
        match self {
            Self::Choice(i) => i as i64,
            Self::NoMatch => Self::NO_MATCH_SENTINEL,
        }
    }
}

impl fmt::Display for ResolvedIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_sentinel())
    }
}

/// Removes surrounding whitespace, then the literal prefixes `"Answer: "` and
/// `"Option "` (each at most once, in that order).
pub fn strip_reply_prefixes(reply: &str) -> &str {
    let s = reply.trim();
    let s = s.strip_prefix("Answer: ").unwrap_or(s);
    s.strip_prefix("Option ").unwrap_or(s)
}

/// Index for a one-character uppercase option letter within `len` choices.
fn letter_index(option: &str, len: usize) -> Option<usize> {
    let mut chars = option.chars();
    let c = chars.next()?;
    if chars.next().is_some() || !c.is_ascii_uppercase() {
        return None;
    }
    let idx = usize::from(c as u8 - b'A');
    (idx < len).then_some(idx)
}

/// Resolves `reply` against `answer_choices`.
///
/// # Example
/// ```
/// # use mcq_agent::resolve::{resolve_index, ResolvedIndex};
/// let choices = vec!["haploid".to_string(), "diploid".to_string()];
/// assert_eq!(resolve_index("Answer: Option B", &choices), ResolvedIndex::Choice(1));
/// assert_eq!(resolve_index("triploid", &choices).as_sentinel(), -1);
/// ```
pub fn resolve_index(reply: &str, answer_choices: &[String]) -> ResolvedIndex {
    let stripped = strip_reply_prefixes(reply);

    let option = stripped
        .split_once(':')
        .map_or(stripped, |(head, _)| head)
        .trim();
    if let Some(idx) = letter_index(option, answer_choices.len()) {
        debug!(idx, "reply resolved by option letter");
        return ResolvedIndex::Choice(idx);
    }

    if let Some(idx) = answer_choices
        .iter()
        .position(|choice| stripped.contains(choice.as_str()))
    {
        debug!(idx, "reply resolved by choice text");
        return ResolvedIndex::Choice(idx);
    }

    error!(
        reply = %reply,
        choices = ?answer_choices,
        "Cannot find match for reply among answer choices"
    );
    ResolvedIndex::NoMatch
}
