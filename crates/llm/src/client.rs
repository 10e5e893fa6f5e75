//! LLM client abstraction and request/response types.
//!
//! The generation backend is a black box: given a prompt and decoding
//! parameters it returns generated text. Some backends echo the prompt in
//! front of the completion; callers strip it.

use medask_core::{AppResult, GenerationConfig};
use serde::{Deserialize, Serialize};

/// LLM completion request with deterministic decoding parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    /// The prompt text to send to the LLM
    pub prompt: String,

    /// Model identifier (e.g., "gemma2:2b")
    pub model: String,

    /// Maximum tokens to generate
    pub max_new_tokens: u32,

    /// Beam-search width
    pub num_beams: u32,

    /// Forbid repeating n-grams of this size (0 disables)
    pub no_repeat_ngram_size: u32,

    /// Penalty applied to repeated tokens
    pub repetition_penalty: f32,

    /// Beam length penalty
    pub length_penalty: f32,

    /// Sampling switch; always false, decoding is deterministic
    #[serde(default)]
    pub do_sample: bool,
}

impl LlmRequest {
    /// Create a new LLM request with default decoding parameters.
    pub fn new(prompt: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_generation(prompt, model, &GenerationConfig::default())
    }

    /// Create a request carrying the given decoding parameters.
    pub fn with_generation(
        prompt: impl Into<String>,
        model: impl Into<String>,
        config: &GenerationConfig,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            model: model.into(),
            max_new_tokens: config.max_new_tokens,
            num_beams: config.num_beams,
            no_repeat_ngram_size: config.no_repeat_ngram_size,
            repetition_penalty: config.repetition_penalty,
            length_penalty: config.length_penalty,
            do_sample: false,
        }
    }
}

/// LLM completion response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    /// The generated text, possibly prefixed with the prompt
    pub content: String,

    /// Model that generated the response
    pub model: String,

    /// Usage statistics
    pub usage: LlmUsage,

    /// Whether the response was complete
    #[serde(default = "default_true")]
    pub done: bool,
}

fn default_true() -> bool {
    true
}

impl LlmResponse {
    /// Build a complete response without usage data.
    pub fn text(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: model.into(),
            usage: LlmUsage::default(),
            done: true,
        }
    }
}

/// Token usage statistics.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LlmUsage {
    /// Tokens in the prompt
    #[serde(default)]
    pub prompt_tokens: u32,

    /// Tokens in the completion
    #[serde(default)]
    pub completion_tokens: u32,

    /// Total tokens used
    #[serde(default)]
    pub total_tokens: u32,
}

impl LlmUsage {
    /// Create usage stats from prompt and completion token counts.
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Trait for generation backends.
///
/// The answer pipeline and the query rewriter receive an implementation of
/// this trait instead of reaching for a process-wide model handle, so tests
/// can substitute scripted clients.
#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    /// Get the provider name (e.g., "ollama").
    fn provider_name(&self) -> &str;

    /// Perform a completion.
    ///
    /// Failures are returned as-is; no retry is attempted.
    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse>;
}
