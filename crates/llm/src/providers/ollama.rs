//! Ollama LLM provider implementation.
//!
//! Ollama API: https://github.com/ollama/ollama/blob/main/docs/api.md
//!
//! Prompts are sent in raw mode so the model's chat template does not wrap
//! the intent template. Ollama decodes greedily at temperature 0; beam width,
//! n-gram blocking and length penalty have no Ollama counterpart and are
//! only logged.

use crate::client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use medask_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Ollama endpoint.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Ollama API request format.
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    raw: bool,
    stream: bool,
    options: OllamaOptions,
}

/// Model options understood by Ollama.
#[derive(Debug, Serialize)]
struct OllamaOptions {
    num_predict: u32,
    repeat_penalty: f32,
    temperature: f32,
}

/// Ollama API response format.
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    model: String,
    response: String,
    done: bool,
    #[serde(default)]
    prompt_eval_count: Option<u32>,
    #[serde(default)]
    eval_count: Option<u32>,
}

/// Ollama LLM client.
pub struct OllamaClient {
    /// Base URL for Ollama API
    base_url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl OllamaClient {
    /// Create a new Ollama client against the default local endpoint.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a new Ollama client with a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Replace the HTTP client with one that enforces a request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> AppResult<Self> {
        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Llm(format!("Failed to build HTTP client: {}", e)))?;
        Ok(self)
    }

    /// Convert LlmRequest to Ollama format.
    fn to_ollama_request(&self, request: &LlmRequest) -> OllamaRequest {
        OllamaRequest {
            model: request.model.clone(),
            prompt: request.prompt.clone(),
            raw: true,
            stream: false,
            options: OllamaOptions {
                num_predict: request.max_new_tokens,
                repeat_penalty: request.repetition_penalty,
                temperature: 0.0,
            },
        }
    }

    /// Convert Ollama response to LlmResponse.
    fn convert_response(&self, response: OllamaResponse) -> LlmResponse {
        let usage = LlmUsage::new(
            response.prompt_eval_count.unwrap_or(0),
            response.eval_count.unwrap_or(0),
        );

        LlmResponse {
            content: response.response,
            model: response.model,
            usage,
            done: response.done,
        }
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl LlmClient for OllamaClient {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        tracing::info!(model = %request.model, "Sending completion request to Ollama");
        tracing::debug!(
            num_beams = request.num_beams,
            no_repeat_ngram_size = request.no_repeat_ngram_size,
            length_penalty = request.length_penalty,
            "Beam-search parameters not supported by Ollama; decoding greedily"
        );

        let ollama_request = self.to_ollama_request(request);
        let url = format!("{}/api/generate", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&ollama_request)
            .send()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to send request to Ollama: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Llm(format!(
                "Ollama API error ({}): {}",
                status, error_text
            )));
        }

        let ollama_response: OllamaResponse = response
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to parse Ollama response: {}", e)))?;

        tracing::info!("Received completion from Ollama");
        tracing::debug!("Response: {:?}", ollama_response);

        Ok(self.convert_response(ollama_response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medask_core::GenerationConfig;

    #[test]
    fn test_ollama_client_creation() {
        let client = OllamaClient::new();
        assert_eq!(client.provider_name(), "ollama");
        assert_eq!(client.base_url, "http://localhost:11434");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = OllamaClient::with_base_url("http://gpu-box:11434/");
        assert_eq!(client.base_url, "http://gpu-box:11434");
    }

    #[test]
    fn test_ollama_request_conversion() {
        let client = OllamaClient::new();
        let config = GenerationConfig {
            max_new_tokens: 100,
            repetition_penalty: 1.1,
            ..GenerationConfig::default()
        };
        let request = LlmRequest::with_generation("Hello", "gemma2:2b", &config);

        let ollama_req = client.to_ollama_request(&request);
        assert_eq!(ollama_req.model, "gemma2:2b");
        assert_eq!(ollama_req.prompt, "Hello");
        assert!(ollama_req.raw);
        assert!(!ollama_req.stream);
        assert_eq!(ollama_req.options.num_predict, 100);
        assert!((ollama_req.options.repeat_penalty - 1.1).abs() < f32::EPSILON);
        assert_eq!(ollama_req.options.temperature, 0.0);
    }

    #[test]
    fn test_request_serialization_shape() {
        let client = OllamaClient::new();
        let request = LlmRequest::new("Hi", "gemma2:2b");
        let json = serde_json::to_value(client.to_ollama_request(&request)).unwrap();

        assert_eq!(json["raw"], serde_json::json!(true));
        assert_eq!(json["options"]["num_predict"], serde_json::json!(320));
    }

    #[test]
    fn test_response_conversion() {
        let client = OllamaClient::new();
        let raw = r#"{"model":"gemma2:2b","response":"Insulin resistance.","done":true,"prompt_eval_count":40,"eval_count":5}"#;
        let parsed: OllamaResponse = serde_json::from_str(raw).unwrap();
        let response = client.convert_response(parsed);

        assert_eq!(response.content, "Insulin resistance.");
        assert_eq!(response.usage.total_tokens, 45);
        assert!(response.done);
    }

    #[test]
    fn test_with_timeout() {
        let client = OllamaClient::new().with_timeout(Duration::from_secs(5));
        assert!(client.is_ok());
    }
}
