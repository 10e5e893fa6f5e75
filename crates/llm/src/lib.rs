//! Generation backend integration for medask.
//!
//! Provides a provider-agnostic `LlmClient` trait and an Ollama
//! implementation. Requests carry deterministic decoding parameters taken
//! from `GenerationConfig`.
//!
//! # Example
//! ```no_run
//! use medask_llm::{LlmClient, LlmRequest, OllamaClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OllamaClient::new();
//! let request = LlmRequest::new("What is anemia?", "gemma2:2b");
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;

// Re-export main types
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::{client_from_config, create_client};
pub use providers::OllamaClient;
