//! Passage retrieval over an embedded corpus.

use crate::corpus;
use crate::embeddings::{provider_from_config, EmbeddingProvider};
use crate::types::{IndexStats, IndexedPassage, Passage};
use crate::vector_index::{MemoryIndex, VectorIndex};
use async_trait::async_trait;
use medask_core::{AppConfig, AppError, AppResult};
use std::sync::Arc;

/// Retrieval collaborator used by the ask flow.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Return at most `k` passages for `query`, most relevant first.
    async fn retrieve(&self, query: &str, k: usize) -> AppResult<Vec<Passage>>;

    /// Statistics about the underlying index.
    fn stats(&self) -> IndexStats;
}

/// Retriever backed by an embedding provider and a vector index.
pub struct IndexRetriever {
    provider: Arc<dyn EmbeddingProvider>,
    index: MemoryIndex,
}

impl IndexRetriever {
    /// Embed `passages` and build an in-memory index over them.
    pub async fn build(
        provider: Arc<dyn EmbeddingProvider>,
        passages: Vec<Passage>,
    ) -> AppResult<Self> {
        let mut index = MemoryIndex::new(provider.dimensions());

        let texts: Vec<String> = passages.iter().map(|p| p.passage.clone()).collect();
        let embeddings = provider.embed_batch(&texts).await?;
        if embeddings.len() != passages.len() {
            return Err(AppError::Knowledge(format!(
                "Embedding provider returned {} vectors for {} passages",
                embeddings.len(),
                passages.len()
            )));
        }

        for (passage, embedding) in passages.into_iter().zip(embeddings) {
            index.insert(IndexedPassage { passage, embedding })?;
        }

        tracing::info!(
            "Built index with {} passages using provider '{}' (model: {})",
            index.len(),
            provider.provider_name(),
            provider.model_name()
        );

        Ok(Self { provider, index })
    }

    /// Load the configured corpus and build the index.
    pub async fn from_config(config: &AppConfig) -> AppResult<Self> {
        let passages = corpus::load_corpus(&config.corpus_path())?;
        let provider = provider_from_config(config)?;
        Self::build(provider, passages).await
    }
}

#[async_trait]
impl Retriever for IndexRetriever {
    async fn retrieve(&self, query: &str, k: usize) -> AppResult<Vec<Passage>> {
        let query_embedding = self.provider.embed(query).await?;
        let results = self.index.search(&query_embedding, k)?;

        if let Some((_, top)) = results.first() {
            tracing::debug!(
                "Retrieved {} passages (top score: {:.3})",
                results.len(),
                top
            );
        }

        Ok(results.into_iter().map(|(passage, _)| passage).collect())
    }

    fn stats(&self) -> IndexStats {
        self.index.stats()
    }
}
