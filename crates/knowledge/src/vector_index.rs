//! Vector index abstraction for corpus passages.
//!
//! Defines a trait for backend-agnostic vector storage and retrieval, and
//! the in-memory cosine-similarity index the CLI rebuilds on each run.

use crate::types::{IndexStats, IndexedPassage, Passage};
use medask_core::{AppError, AppResult};

/// Trait for vector index backends.
///
/// Implementations must support:
/// - Inserting passages with embeddings
/// - Searching for similar vectors (top-k)
/// - Collecting statistics
/// - Resetting/clearing the index
pub trait VectorIndex: Send + Sync {
    /// Add a passage with its embedding to the index.
    fn insert(&mut self, entry: IndexedPassage) -> AppResult<()>;

    /// Search for the top-k most similar passages to the query embedding.
    ///
    /// Returns passages ordered by descending similarity score. Equal
    /// scores keep insertion order.
    fn search(&self, query_embedding: &[f32], top_k: usize) -> AppResult<Vec<(Passage, f32)>>;

    /// Get statistics about the index.
    fn stats(&self) -> IndexStats;
}

/// In-memory index with brute-force cosine similarity search.
#[derive(Debug, Default)]
pub struct MemoryIndex {
    dimensions: usize,
    entries: Vec<IndexedPassage>,
}

impl MemoryIndex {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl VectorIndex for MemoryIndex {
    fn insert(&mut self, entry: IndexedPassage) -> AppResult<()> {
        if entry.embedding.len() != self.dimensions {
            return Err(AppError::Knowledge(format!(
                "Embedding for doc {} has {} dimensions, index expects {}",
                entry.passage.doc_id,
                entry.embedding.len(),
                self.dimensions
            )));
        }
        self.entries.push(entry);
        Ok(())
    }

    fn search(&self, query_embedding: &[f32], top_k: usize) -> AppResult<Vec<(Passage, f32)>> {
        if query_embedding.len() != self.dimensions {
            return Err(AppError::Knowledge(format!(
                "Query embedding has {} dimensions, index expects {}",
                query_embedding.len(),
                self.dimensions
            )));
        }

        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (i, cosine_similarity(query_embedding, &entry.embedding)))
            .collect();

        // Stable: ties keep insertion order
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(top_k);

        Ok(scored
            .into_iter()
            .map(|(i, score)| (self.entries[i].passage.clone(), score))
            .collect())
    }

    fn stats(&self) -> IndexStats {
        IndexStats {
            passages: self.entries.len(),
            dimensions: self.dimensions,
        }
    }
}

/// Calculate cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}
