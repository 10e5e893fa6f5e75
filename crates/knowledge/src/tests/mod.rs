//! Scenario tests and shared test doubles.

mod pipeline;
mod rag_ranking;

use crate::retrieval::Retriever;
use crate::types::{IndexStats, Passage};
use async_trait::async_trait;
use medask_core::{AppError, AppResult};
use medask_llm::{LlmClient, LlmRequest, LlmResponse};
use std::collections::VecDeque;
use std::sync::Mutex;

/// LLM double replying with scripted outputs in order and recording requests.
pub(crate) struct ScriptedClient {
    replies: Mutex<VecDeque<AppResult<String>>>,
    requests: Mutex<Vec<LlmRequest>>,
    echo_prompt: bool,
}

impl ScriptedClient {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| Ok(r.to_string())).collect()),
            requests: Mutex::new(Vec::new()),
            echo_prompt: false,
        }
    }

    /// Prefix every reply with the request prompt, like a causal LM would.
    pub fn echoing(mut self) -> Self {
        self.echo_prompt = true;
        self
    }

    pub fn failing(message: &str) -> Self {
        let client = Self::new(&[]);
        client
            .replies
            .lock()
            .unwrap()
            .push_back(Err(AppError::Llm(message.to_string())));
        client
    }

    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        self.requests.lock().unwrap().push(request.clone());

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::Llm("no scripted reply left".to_string())))?;

        let content = if self.echo_prompt {
            format!("{}{}", request.prompt, reply)
        } else {
            reply
        };
        Ok(LlmResponse::text(content, request.model.clone()))
    }
}

/// Retriever double returning fixed passages and recording queries.
pub(crate) struct StaticRetriever {
    passages: Vec<Passage>,
    queries: Mutex<Vec<(String, usize)>>,
}

impl StaticRetriever {
    pub fn new(passages: Vec<Passage>) -> Self {
        Self {
            passages,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<(String, usize)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Retriever for StaticRetriever {
    async fn retrieve(&self, query: &str, k: usize) -> AppResult<Vec<Passage>> {
        self.queries.lock().unwrap().push((query.to_string(), k));
        Ok(self.passages.iter().take(k).cloned().collect())
    }

    fn stats(&self) -> IndexStats {
        IndexStats {
            passages: self.passages.len(),
            dimensions: 0,
        }
    }
}
