//! Question intents and the fallback answer line.
//!
//! Every behaviour keyed by intent (classification patterns, context cues,
//! prompt templates) matches exhaustively on [`Intent`], so adding a variant
//! fails to compile until every table covers it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The exact line returned when no grounded answer can be produced.
///
/// Callers pattern-match on this string to detect "no answer found", so it
/// must stay byte-for-byte stable.
pub const FALLBACK_LINE: &str =
    "I'm sorry, I cannot answer that question based on the provided information.";

/// Informational goal of a biomedical question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Symptoms,
    Causes,
    Treatments,
    Risks,
    Mechanisms,
    Definition,
    General,
}

impl Intent {
    /// The six specific intents in classification priority order.
    ///
    /// A question matching several intents resolves to the earliest one.
    pub const PRIORITY: [Intent; 6] = [
        Intent::Symptoms,
        Intent::Causes,
        Intent::Treatments,
        Intent::Risks,
        Intent::Mechanisms,
        Intent::Definition,
    ];

    /// All seven intents, `General` last.
    pub const ALL: [Intent; 7] = [
        Intent::Symptoms,
        Intent::Causes,
        Intent::Treatments,
        Intent::Risks,
        Intent::Mechanisms,
        Intent::Definition,
        Intent::General,
    ];

    /// Get the canonical intent name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Symptoms => "symptoms",
            Self::Causes => "causes",
            Self::Treatments => "treatments",
            Self::Risks => "risks",
            Self::Mechanisms => "mechanisms",
            Self::Definition => "definition",
            Self::General => "general",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
