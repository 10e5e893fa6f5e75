//! Intent-focused context selection.
//!
//! Retrieved passages are split into sentences, scored against the
//! intent's cue patterns, and the best sentences are joined back into a
//! focused context for the prompt. The output only ever contains sentences
//! taken verbatim from the input, joined by single spaces in ranked order.

use medask_core::Intent;
use regex::Regex;
use std::cmp::Reverse;
use std::sync::LazyLock;

/// Sentence cap on the cue-matched and `General` paths.
pub const DEFAULT_MAX_SENTENCES: usize = 15;

/// Tighter cap used when no sentence matches any cue.
pub const UNMATCHED_MAX_SENTENCES: usize = 8;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.?!]\s+").expect("sentence boundary regex is valid"));

/// Relevance cue patterns for an intent. `General` has none.
pub fn cue_patterns(intent: Intent) -> &'static [&'static str] {
    match intent {
        Intent::Causes => &[
            r"\b(cause|caused by|etiolog\w*|due to|because|results? from|triggered by|lead[s]? to)\b",
        ],
        Intent::Symptoms => &[r"\b(symptom|signs?|presents? with|manifestation)\b"],
        Intent::Treatments => &[
            r"\b(treat|therapy|therapies|management|intervention|drug|medication|dose|dosing)\b",
        ],
        Intent::Risks => &[r"\b(risk factor|risk|predispos|associated with|correlat)\b"],
        Intent::Mechanisms => &[
            r"\b(pathophysiolog\w*|mechanism|biologic\w* process|immune|inflammation|autoimmun\w*)\b",
        ],
        Intent::Definition => &[r"\b(is defined as|refers to|is a|means)\b"],
        Intent::General => &[],
    }
}

static CUES: LazyLock<Vec<(Intent, Vec<Regex>)>> = LazyLock::new(|| {
    Intent::ALL
        .iter()
        .map(|intent| {
            let compiled = cue_patterns(*intent)
                .iter()
                .map(|p| Regex::new(&format!("(?i){}", p)).expect("cue pattern is valid"))
                .collect();
            (*intent, compiled)
        })
        .collect()
});

fn compiled_cues(intent: Intent) -> &'static [Regex] {
    CUES.iter()
        .find(|(i, _)| *i == intent)
        .map(|(_, cues)| cues.as_slice())
        .unwrap_or(&[])
}

/// A sentence with its ranking keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredSentence {
    pub text: String,
    /// Number of distinct cue patterns matching the sentence
    pub score: usize,
    /// Length in characters
    pub length: usize,
}

/// Split text into sentences.
///
/// Whitespace is collapsed first, then the text is cut after every `.`,
/// `?` or `!` that is followed by whitespace. This is a heuristic: an
/// abbreviation such as "e.g. " also ends a sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let normalized = WHITESPACE.replace_all(text, " ");
    let normalized = normalized.trim();

    let mut sentences = Vec::new();
    let mut start = 0;
    for boundary in SENTENCE_END.find_iter(normalized) {
        // Keep the terminal punctuation (always one ASCII byte)
        sentences.push(&normalized[start..boundary.start() + 1]);
        start = boundary.end();
    }
    sentences.push(&normalized[start..]);

    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Count how many of the intent's cue patterns match a sentence.
pub fn score_sentence(sentence: &str, intent: Intent) -> usize {
    compiled_cues(intent)
        .iter()
        .filter(|cue| cue.is_match(sentence))
        .count()
}

/// Select the sentences of `raw_context` most relevant to `intent`.
///
/// Returns an empty string when the context has no sentences. See the
/// module docs for the ranking rules.
///
/// # Example
/// ```
/// use medask_core::Intent;
/// use medask_knowledge::context::select_context;
///
/// let ctx = "Diabetes is common worldwide. Diabetes is caused by insulin resistance.";
/// let focused = select_context(ctx, Intent::Causes, 15);
/// assert_eq!(focused, "Diabetes is caused by insulin resistance.");
/// ```
pub fn select_context(raw_context: &str, intent: Intent, max_sentences: usize) -> String {
    let sentences = split_sentences(raw_context);
    if sentences.is_empty() {
        tracing::debug!("No sentences in retrieved context");
        return String::new();
    }

    if compiled_cues(intent).is_empty() {
        return longest_first(sentences, max_sentences);
    }

    let mut scored: Vec<ScoredSentence> = sentences
        .iter()
        .filter_map(|sentence| {
            let score = score_sentence(sentence, intent);
            (score > 0).then(|| ScoredSentence {
                text: sentence.clone(),
                score,
                length: sentence.chars().count(),
            })
        })
        .collect();

    if scored.is_empty() {
        tracing::debug!(
            intent = %intent,
            sentences = sentences.len(),
            "No sentence matched intent cues; falling back to longest sentences"
        );
        return longest_first(sentences, max_sentences.min(UNMATCHED_MAX_SENTENCES));
    }

    // Stable sort: equal keys keep document order
    scored.sort_by(|a, b| b.score.cmp(&a.score).then(b.length.cmp(&a.length)));
    scored.truncate(max_sentences);

    tracing::debug!(
        intent = %intent,
        sentences = sentences.len(),
        selected = scored.len(),
        "Selected cue-matched sentences"
    );

    scored
        .into_iter()
        .map(|s| s.text)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Rank sentences by character length (longest first) and keep `cap`.
fn longest_first(mut sentences: Vec<String>, cap: usize) -> String {
    sentences.sort_by_key(|s| Reverse(s.chars().count()));
    sentences.truncate(cap);
    sentences.join(" ")
}
