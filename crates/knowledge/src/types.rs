//! Knowledge system type definitions.

use medask_core::Intent;
use serde::{Deserialize, Serialize};

/// A retrieved text passage from the corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    /// Source document identifier
    pub doc_id: i64,

    /// Passage text
    pub passage: String,
}

impl Passage {
    pub fn new(doc_id: i64, passage: impl Into<String>) -> Self {
        Self {
            doc_id,
            passage: passage.into(),
        }
    }
}

/// A passage stored in the vector index with its embedding.
#[derive(Debug, Clone)]
pub struct IndexedPassage {
    pub passage: Passage,

    /// Embedding vector (normalized)
    pub embedding: Vec<f32>,
}

/// Options for the ask operation.
#[derive(Debug, Clone, Default)]
pub struct AskOptions {
    /// Question as typed by the user
    pub question: String,

    /// Number of passages to retrieve (defaults to `top_k_default`)
    pub k: Option<usize>,

    /// Rewrite option label to prefer (defaults to `preferred_option`)
    pub preferred_option: Option<String>,
}

impl AskOptions {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Default::default()
        }
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = Some(k);
        self
    }

    pub fn with_preferred_option(mut self, label: impl Into<String>) -> Self {
        self.preferred_option = Some(label.into());
        self
    }
}

/// Result of the ask operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundedAnswer {
    /// The original (trimmed) question
    pub question: String,

    /// Retrieval query produced by the rewriter; `None` when rewriting is off
    pub rewritten: Option<String>,

    /// Grounded answer or the fallback line
    pub answer: String,

    /// Passages the answer was grounded on, in relevance order
    pub sources: Vec<Passage>,

    pub intent: Intent,
}

/// Statistics for a vector index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub passages: usize,
    pub dimensions: usize,
}
