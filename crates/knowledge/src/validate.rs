//! Post-generation answer validation.
//!
//! Removes an echoed prompt and replaces refusals or under-supported
//! answers with [`FALLBACK_LINE`]. The validator never returns an empty
//! string.

use medask_core::{Intent, FALLBACK_LINE};
use regex::Regex;
use std::sync::LazyLock;

/// Answers starting with one of these (case-insensitive) are refusals.
pub const REFUSAL_PREFIXES: &[&str] = &["the context does not"];

/// Answers containing one of these (case-insensitive) are refusals.
pub const REFUSAL_PHRASES: &[&str] = &["cannot answer"];

/// Causal cue pattern a `causes` answer is checked against.
pub const CAUSAL_CUE_PATTERN: &str = r"\b(caused by|due to|results? from|because)\b";

/// A `causes` answer without a causal cue must be at least this many characters.
pub const MIN_UNCUED_CAUSAL_CHARS: usize = 30;

static CAUSAL_CUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("(?i){}", CAUSAL_CUE_PATTERN)).expect("causal cue pattern is valid")
});

/// Why an answer was replaced by the fallback line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Empty,
    Refusal,
    UnsupportedCause,
}

impl Rejection {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty answer",
            Self::Refusal => "model refused",
            Self::UnsupportedCause => "causal answer without cue",
        }
    }
}

/// Check a cleaned answer, returning the reason it must be rejected.
pub fn check(answer: &str, intent: Intent) -> Option<Rejection> {
    if answer.is_empty() {
        return Some(Rejection::Empty);
    }

    let lowered = answer.to_lowercase();
    if REFUSAL_PREFIXES.iter().any(|p| lowered.starts_with(p))
        || REFUSAL_PHRASES.iter().any(|p| lowered.contains(p))
    {
        return Some(Rejection::Refusal);
    }

    if intent == Intent::Causes
        && !CAUSAL_CUE.is_match(answer)
        && answer.chars().count() < MIN_UNCUED_CAUSAL_CHARS
    {
        return Some(Rejection::UnsupportedCause);
    }

    None
}

/// Clean and validate raw model output for `intent`.
///
/// The prompt is stripped only when `raw` starts with it; the remainder is
/// trimmed and checked. Rejected answers become [`FALLBACK_LINE`].
pub fn validate(raw: &str, prompt: &str, intent: Intent) -> String {
    let answer = raw.strip_prefix(prompt).unwrap_or(raw).trim();

    match check(answer, intent) {
        Some(rejection) => {
            tracing::info!(
                intent = %intent,
                reason = rejection.as_str(),
                "Replacing answer with fallback line"
            );
            FALLBACK_LINE.to_string()
        }
        None => answer.to_string(),
    }
}
