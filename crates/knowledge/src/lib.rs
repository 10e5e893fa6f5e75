//! Intent-aware grounded answering over a biomedical passage corpus.
//!
//! - [`intent`]: rule-based question classification
//! - [`context`]: intent-focused sentence selection
//! - [`validate`]: post-generation answer checks
//! - [`rewrite`]: query rewriting for retrieval
//! - [`retrieval`]: JSONL corpus, trigram embeddings and an in-memory index
//! - [`rag`]: the answer pipeline and the end-to-end ask flow

pub mod context;
pub mod corpus;
pub mod embeddings;
pub mod intent;
pub mod rag;
pub mod retrieval;
pub mod rewrite;
pub mod types;
pub mod validate;
pub mod vector_index;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use context::select_context;
pub use intent::classify;
pub use rag::{AnswerPipeline, AskService};
pub use retrieval::{IndexRetriever, Retriever};
pub use rewrite::{IdentityRewriter, LlmRewriter, QueryRewriter};
pub use types::{AskOptions, GroundedAnswer, IndexStats, Passage};
pub use validate::validate;
