//! End-to-end answer pipeline scenarios with scripted collaborators.

use super::{ScriptedClient, StaticRetriever};
use crate::rag::{AnswerPipeline, AskService};
use crate::rewrite::{LlmRewriter, QueryRewriter};
use crate::types::{AskOptions, Passage};
use medask_core::{AppConfig, AppError, GenerationConfig, Intent, FALLBACK_LINE};
use medask_llm::LlmClient;
use std::sync::Arc;

const MODEL: &str = "test-model";

fn diabetes_passages() -> Vec<Passage> {
    vec![
        Passage::new(1, "Diabetes is caused by insulin resistance."),
        Passage::new(2, "Diabetes is common worldwide."),
    ]
}

fn pipeline(client: Arc<ScriptedClient>) -> AnswerPipeline {
    AnswerPipeline::new(client, MODEL, GenerationConfig::default())
}

#[tokio::test]
async fn test_causes_question_uses_focused_context() {
    let client = Arc::new(
        ScriptedClient::new(&["Diabetes is caused by insulin resistance."]).echoing(),
    );
    let pipeline = pipeline(client.clone());

    let (intent, answer) = pipeline
        .answer_with_intent("What causes diabetes?", &diabetes_passages())
        .await
        .unwrap();

    assert_eq!(intent, Intent::Causes);
    assert_eq!(answer, "Diabetes is caused by insulin resistance.");

    let requests = client.requests();
    assert_eq!(requests.len(), 1);
    let prompt = &requests[0].prompt;
    assert!(prompt.contains("Context:\nDiabetes is caused by insulin resistance.\n"));
    assert!(!prompt.contains("common worldwide"));
    assert!(prompt.contains("Question:\nWhat causes diabetes?\n"));
}

#[tokio::test]
async fn test_request_carries_generation_config() {
    let client = Arc::new(ScriptedClient::new(&["Gout is an inflammatory arthritis."]));
    let pipeline = pipeline(client.clone());

    pipeline
        .answer("Define gout", &[Passage::new(3, "Gout is an inflammatory arthritis.")])
        .await
        .unwrap();

    let request = &client.requests()[0];
    assert_eq!(request.model, MODEL);
    assert_eq!(request.max_new_tokens, 320);
    assert_eq!(request.num_beams, 4);
    assert_eq!(request.no_repeat_ngram_size, 3);
    assert!(!request.do_sample);
}

#[tokio::test]
async fn test_empty_context_skips_generation() {
    let client = Arc::new(ScriptedClient::new(&["should not be used"]));
    let pipeline = pipeline(client.clone());

    for passages in [vec![], vec![Passage::new(1, "  \n\t ")]] {
        let answer = pipeline.answer("What causes gout?", &passages).await.unwrap();
        assert_eq!(answer, FALLBACK_LINE);
    }
    assert!(client.requests().is_empty());
}

#[tokio::test]
async fn test_refusal_becomes_fallback() {
    let client = Arc::new(
        ScriptedClient::new(&["The context does not mention this."]).echoing(),
    );
    let answer = pipeline(client)
        .answer("What causes diabetes?", &diabetes_passages())
        .await
        .unwrap();
    assert_eq!(answer, FALLBACK_LINE);
}

#[tokio::test]
async fn test_short_uncued_cause_becomes_fallback() {
    let client = Arc::new(ScriptedClient::new(&["Yes."]));
    let answer = pipeline(client)
        .answer("What causes diabetes?", &diabetes_passages())
        .await
        .unwrap();
    assert_eq!(answer, FALLBACK_LINE);
}

#[tokio::test]
async fn test_llm_error_propagates() {
    let client = Arc::new(ScriptedClient::failing("connection refused"));
    let err = pipeline(client)
        .answer("What causes diabetes?", &diabetes_passages())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Llm(_)));
}

#[tokio::test]
async fn test_ask_rewrites_for_retrieval_only() {
    let client = Arc::new(ScriptedClient::new(&[
        "Option 1: diabetes etiology\nOption 2: insulin resistance diabetes",
        "Diabetes is caused by insulin resistance.",
    ]));
    let retriever = Arc::new(StaticRetriever::new(diabetes_passages()));
    let config = AppConfig::default();

    let llm: Arc<dyn LlmClient> = client.clone();
    let service = AskService::new(pipeline(client.clone()), retriever.clone(), &config)
        .with_rewriter(Arc::new(LlmRewriter::new(llm, MODEL)));

    let result = service
        .ask(AskOptions::new("  What causes diabetes?  "))
        .await
        .unwrap();

    assert_eq!(result.question, "What causes diabetes?");
    assert_eq!(result.rewritten.as_deref(), Some("insulin resistance diabetes"));
    assert_eq!(result.intent, Intent::Causes);
    assert_eq!(result.answer, "Diabetes is caused by insulin resistance.");
    assert_eq!(result.sources, diabetes_passages());

    assert_eq!(
        retriever.queries(),
        vec![("insulin resistance diabetes".to_string(), config.top_k_default)]
    );

    let requests = client.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].max_new_tokens, 128);
    assert!(requests[0].prompt.ends_with("Question: What causes diabetes?\nRewritten:"));
    assert!(requests[1].prompt.contains("Question:\nWhat causes diabetes?\n"));
}

#[tokio::test]
async fn test_ask_without_rewriter() {
    let client = Arc::new(ScriptedClient::new(&["Diabetes is caused by insulin resistance."]));
    let retriever = Arc::new(StaticRetriever::new(diabetes_passages()));
    let service = AskService::new(pipeline(client), retriever.clone(), &AppConfig::default());

    let result = service
        .ask(AskOptions::new("What causes diabetes?").with_k(1))
        .await
        .unwrap();

    assert!(result.rewritten.is_none());
    assert_eq!(result.sources.len(), 1);
    assert_eq!(retriever.queries(), vec![("What causes diabetes?".to_string(), 1)]);
}

#[tokio::test]
async fn test_ask_rejects_empty_question() {
    let client = Arc::new(ScriptedClient::new(&[]));
    let retriever = Arc::new(StaticRetriever::new(diabetes_passages()));
    let service = AskService::new(pipeline(client.clone()), retriever.clone(), &AppConfig::default());

    let err = service.ask(AskOptions::new("   ")).await.unwrap_err();
    assert!(matches!(err, AppError::Input(_)));
    assert!(client.requests().is_empty());
    assert!(retriever.queries().is_empty());
}

#[tokio::test]
async fn test_rewriter_falls_back_to_first_option() {
    let client = Arc::new(ScriptedClient::new(&[
        "Option 1: What is the definition of X?",
    ]));
    let rewriter = LlmRewriter::new(client, MODEL);

    let rewritten = rewriter.rewrite("define X", "Option 2").await.unwrap();
    assert_eq!(rewritten, "What is the definition of X?");
}

#[tokio::test]
async fn test_rewriter_strips_echoed_prompt() {
    let client = Arc::new(
        ScriptedClient::new(&["\nOption 1: broad\nOption 2: precise query"]).echoing(),
    );
    let rewriter = LlmRewriter::new(client, MODEL);

    let rewritten = rewriter.rewrite("What is X?", "Option 2").await.unwrap();
    assert_eq!(rewritten, "precise query");
}
