//! Embedding providers for passage retrieval.

pub mod provider;
pub mod trigram;

pub use provider::{create_provider, provider_from_config, EmbeddingProvider};
pub use trigram::TrigramProvider;
