//! Embedding provider trait and factory.

use medask_core::{AppConfig, AppError, AppResult};
use std::sync::Arc;

use super::trigram::TrigramProvider;

/// Trait for embedding providers.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync + std::fmt::Debug {
    /// Get provider name (e.g., "trigram")
    fn provider_name(&self) -> &str;

    /// Get model identifier
    fn model_name(&self) -> &str;

    /// Get embedding dimensions
    fn dimensions(&self) -> usize;

    /// Generate embeddings for multiple texts in a batch.
    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>>;

    /// Generate embedding for a single text (convenience method).
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        let mut results = self.embed_batch(&[text.to_string()]).await?;
        results
            .pop()
            .ok_or_else(|| AppError::Knowledge("No embedding returned".to_string()))
    }
}

/// Create an embedding provider of the given dimensionality.
pub fn create_provider(dimensions: usize) -> AppResult<Arc<dyn EmbeddingProvider>> {
    if dimensions == 0 {
        return Err(AppError::Knowledge(
            "Embedding dimensions must be at least 1".to_string(),
        ));
    }
    Ok(Arc::new(TrigramProvider::new(dimensions)))
}

/// Create the embedding provider described by the application config.
pub fn provider_from_config(config: &AppConfig) -> AppResult<Arc<dyn EmbeddingProvider>> {
    create_provider(config.embedding_dimensions)
}
