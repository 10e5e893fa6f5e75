//! Grounded answering orchestration.
//!
//! [`AnswerPipeline`] turns a question plus retrieved passages into a
//! validated answer: classify, focus the context, build the prompt,
//! generate, validate. [`AskService`] wraps it with query rewriting and
//! retrieval.

use crate::context::{select_context, DEFAULT_MAX_SENTENCES};
use crate::intent::classify;
use crate::retrieval::Retriever;
use crate::rewrite::{IdentityRewriter, QueryRewriter};
use crate::types::{AskOptions, GroundedAnswer, Passage};
use crate::validate::validate;
use medask_core::{AppConfig, AppError, AppResult, GenerationConfig, Intent, FALLBACK_LINE};
use medask_llm::{LlmClient, LlmRequest};
use medask_prompt::build_prompt;
use std::sync::Arc;

/// Separator placed between passages before sentence selection.
const PASSAGE_SEPARATOR: &str = "\n";

/// Answer generation over already-retrieved passages.
pub struct AnswerPipeline {
    client: Arc<dyn LlmClient>,
    model: String,
    generation: GenerationConfig,
}

impl AnswerPipeline {
    pub fn new(
        client: Arc<dyn LlmClient>,
        model: impl Into<String>,
        generation: GenerationConfig,
    ) -> Self {
        Self {
            client,
            model: model.into(),
            generation,
        }
    }

    pub fn from_config(client: Arc<dyn LlmClient>, config: &AppConfig) -> Self {
        Self::new(client, config.model.clone(), config.generation.clone())
    }

    /// Answer `question` from `passages`, returning the fallback line when
    /// no grounded answer can be produced.
    pub async fn answer(&self, question: &str, passages: &[Passage]) -> AppResult<String> {
        self.answer_with_intent(question, passages)
            .await
            .map(|(_, answer)| answer)
    }

    /// Like [`answer`](Self::answer), also returning the classified intent.
    pub async fn answer_with_intent(
        &self,
        question: &str,
        passages: &[Passage],
    ) -> AppResult<(Intent, String)> {
        let intent = classify(question);

        let raw_context = passages
            .iter()
            .map(|p| p.passage.as_str())
            .collect::<Vec<_>>()
            .join(PASSAGE_SEPARATOR);
        let focused = select_context(&raw_context, intent, DEFAULT_MAX_SENTENCES);

        if focused.trim().is_empty() {
            tracing::info!(intent = %intent, "Empty focused context; skipping generation");
            return Ok((intent, FALLBACK_LINE.to_string()));
        }

        let prompt = build_prompt(intent, &focused, question)?;
        tracing::debug!(
            intent = %intent,
            template = prompt.template_id,
            prompt_chars = prompt.len(),
            "Built answer prompt"
        );

        let request = LlmRequest::with_generation(prompt.text.as_str(), &self.model, &self.generation);
        let response = self.client.complete(&request).await?;

        Ok((intent, validate(&response.content, &prompt.text, intent)))
    }
}

/// The full ask flow: rewrite, retrieve, answer.
pub struct AskService {
    pipeline: AnswerPipeline,
    retriever: Arc<dyn Retriever>,
    rewriter: Arc<dyn QueryRewriter>,
    rewriting: bool,
    top_k_default: usize,
    preferred_option: String,
}

impl AskService {
    /// Create a service without query rewriting.
    pub fn new(pipeline: AnswerPipeline, retriever: Arc<dyn Retriever>, config: &AppConfig) -> Self {
        Self {
            pipeline,
            retriever,
            rewriter: Arc::new(IdentityRewriter),
            rewriting: false,
            top_k_default: config.top_k_default,
            preferred_option: config.preferred_option.clone(),
        }
    }

    /// Enable query rewriting with the given rewriter.
    pub fn with_rewriter(mut self, rewriter: Arc<dyn QueryRewriter>) -> Self {
        self.rewriter = rewriter;
        self.rewriting = true;
        self
    }

    /// Answer a question end to end.
    ///
    /// Retrieval uses the rewritten query; the answer pipeline always sees
    /// the original question.
    pub async fn ask(&self, options: AskOptions) -> AppResult<GroundedAnswer> {
        let question = options.question.trim();
        if question.is_empty() {
            return Err(AppError::Input("Question must not be empty".to_string()));
        }

        let k = options.k.unwrap_or(self.top_k_default);
        let preferred = options
            .preferred_option
            .as_deref()
            .unwrap_or(&self.preferred_option);

        tracing::info!(k = k, rewriting = self.rewriting, "Answering question: {}", question);

        let rewritten = if self.rewriting {
            Some(self.rewriter.rewrite(question, preferred).await?)
        } else {
            None
        };

        let query = rewritten.as_deref().unwrap_or(question);
        let sources = self.retriever.retrieve(query, k).await?;
        tracing::debug!("Retrieved {} passages for query: {}", sources.len(), query);

        let (intent, answer) = self.pipeline.answer_with_intent(question, &sources).await?;

        tracing::info!(
            intent = %intent,
            fallback = answer == FALLBACK_LINE,
            "Answer ready"
        );

        Ok(GroundedAnswer {
            question: question.to_string(),
            rewritten,
            answer,
            sources,
            intent,
        })
    }
}
