//! Rule-based question intent classification.
//!
//! Two passes, both in [`Intent::PRIORITY`] order:
//! 1. Strict: word-bounded regular expressions over curated phrases.
//! 2. Loose: plain substring checks over broader keyword lists.
//!
//! The first intent to match wins; `General` is returned when nothing does.
//! A question mentioning both symptoms and causes is therefore classified as
//! `Symptoms`. That ordering is part of the contract.

use medask_core::Intent;
use regex::Regex;
use std::sync::LazyLock;

/// How a loose-pass keyword list is matched against the question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LooseMatch {
    /// Any keyword appears anywhere in the question
    Anywhere(&'static [&'static str]),
    /// The question starts with one of the keywords
    Leading(&'static [&'static str]),
}

impl LooseMatch {
    fn matches(&self, lowered: &str) -> bool {
        match self {
            Self::Anywhere(words) => words.iter().any(|w| lowered.contains(w)),
            Self::Leading(words) => words.iter().any(|w| lowered.starts_with(w)),
        }
    }
}

/// Strict-pass pattern source for an intent (`None` for `General`).
pub fn strict_pattern(intent: Intent) -> Option<&'static str> {
    match intent {
        Intent::Symptoms => Some(r"\b(symptom|sign|clinical presentation|manifestation)\b"),
        Intent::Causes => Some(r"\b(cause|etiolog|due to|result[s]? from|lead[s]? to|because)\b"),
        Intent::Treatments => {
            Some(r"\b(treat|therapy|management|intervention|drug|medication)\b")
        }
        Intent::Risks => Some(r"\b(risk factor|risk|predispos|associated with|correlate)\b"),
        Intent::Mechanisms => Some(r"\b(pathophysiolog|mechanism|how.*work|underlying process)\b"),
        Intent::Definition => Some(r"\b(what is|define|definition)\b"),
        Intent::General => None,
    }
}

/// Loose-pass keywords for an intent (`None` for `General`).
pub fn loose_keywords(intent: Intent) -> Option<LooseMatch> {
    match intent {
        Intent::Symptoms => Some(LooseMatch::Anywhere(&["symptom", "sign", "presentation"])),
        Intent::Causes => Some(LooseMatch::Anywhere(&["cause", "etiology", "why"])),
        Intent::Treatments => Some(LooseMatch::Anywhere(&[
            "treat", "therapy", "manage", "medicat",
        ])),
        Intent::Risks => Some(LooseMatch::Anywhere(&["risk", "predispos"])),
        Intent::Mechanisms => Some(LooseMatch::Anywhere(&[
            "mechanism",
            "how does it work",
            "pathophys",
        ])),
        Intent::Definition => Some(LooseMatch::Leading(&["what is", "define"])),
        Intent::General => None,
    }
}

static STRICT_PATTERNS: LazyLock<Vec<(Intent, Regex)>> = LazyLock::new(|| {
    Intent::PRIORITY
        .iter()
        .filter_map(|intent| strict_pattern(*intent).map(|p| (*intent, p)))
        .map(|(intent, pattern)| {
            let regex = Regex::new(&format!("(?i){}", pattern))
                .expect("strict intent pattern is valid");
            (intent, regex)
        })
        .collect()
});

/// Classify a question into exactly one intent.
///
/// Pure and total: the same question always yields the same intent.
///
/// # Example
/// ```
/// use medask_core::Intent;
/// use medask_knowledge::intent::classify;
///
/// assert_eq!(classify("What causes diabetes?"), Intent::Causes);
/// assert_eq!(classify("Tell me about diabetes"), Intent::General);
/// ```
pub fn classify(question: &str) -> Intent {
    let lowered = question.to_lowercase();

    if let Some((intent, _)) = STRICT_PATTERNS
        .iter()
        .find(|(_, regex)| regex.is_match(&lowered))
    {
        tracing::debug!(intent = %intent, "Intent matched strict pattern");
        return *intent;
    }

    let loose = Intent::PRIORITY.into_iter().find(|intent| {
        loose_keywords(*intent)
            .map(|keywords| keywords.matches(&lowered))
            .unwrap_or(false)
    });

    match loose {
        Some(intent) => {
            tracing::debug!(intent = %intent, "Intent matched loose keywords");
            intent
        }
        None => Intent::General,
    }
}
