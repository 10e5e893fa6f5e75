//! Query rewriting for retrieval.
//!
//! The rewriter asks the model for several `Option N: ...` reformulations
//! of a question and keeps one of them as the retrieval query. When no
//! rewriting backend is configured, [`IdentityRewriter`] returns the
//! question unchanged.

use async_trait::async_trait;
use medask_core::{AppResult, GenerationConfig};
use medask_llm::{LlmClient, LlmRequest};
use medask_prompt::build_rewrite_prompt;
use std::sync::Arc;

/// Label of the option used when the preferred one is missing.
pub const FIRST_OPTION: &str = "Option 1";

/// Turns a question into a retrieval query.
#[async_trait]
pub trait QueryRewriter: Send + Sync {
    /// Rewrite `question`, preferring the option labelled `preferred`.
    async fn rewrite(&self, question: &str, preferred: &str) -> AppResult<String>;
}

/// Rewriter that returns the question unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityRewriter;

#[async_trait]
impl QueryRewriter for IdentityRewriter {
    async fn rewrite(&self, question: &str, _preferred: &str) -> AppResult<String> {
        Ok(question.to_string())
    }
}

/// Rewriter backed by a generation model.
pub struct LlmRewriter {
    client: Arc<dyn LlmClient>,
    model: String,
    generation: GenerationConfig,
}

impl LlmRewriter {
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            generation: GenerationConfig::rewriter(),
        }
    }
}

#[async_trait]
impl QueryRewriter for LlmRewriter {
    async fn rewrite(&self, question: &str, preferred: &str) -> AppResult<String> {
        let prompt = build_rewrite_prompt(question)?;
        let request = LlmRequest::with_generation(prompt.text.as_str(), &self.model, &self.generation);

        let response = self.client.complete(&request).await?;
        let output = response
            .content
            .strip_prefix(prompt.text.as_str())
            .unwrap_or(&response.content);

        let rewritten = extract_option(output, question, preferred);
        tracing::debug!(preferred = preferred, "Rewrote query: {}", rewritten);

        Ok(rewritten)
    }
}

/// Pick a rewritten query out of model output.
///
/// Takes the first trimmed line starting with `preferred`, else the first
/// starting with `Option 1`. The text after the line's first colon is used
/// (the whole line when it has no colon). Falls back to `question` when no
/// line matches or the extracted text is empty.
pub fn extract_option(output: &str, question: &str, preferred: &str) -> String {
    let lines: Vec<&str> = output
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let chosen = lines
        .iter()
        .find(|l| l.starts_with(preferred))
        .or_else(|| lines.iter().find(|l| l.starts_with(FIRST_OPTION)));

    let Some(line) = chosen else {
        return question.to_string();
    };

    let text = line.split_once(':').map_or(*line, |(_, rest)| rest).trim();
    if text.is_empty() {
        question.to_string()
    } else {
        text.to_string()
    }
}
