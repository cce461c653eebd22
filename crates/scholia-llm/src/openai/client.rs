// OpenAI-compatible client implementation (OpenAI, OpenRouter)

use crate::error::GenerationError;
use crate::traits::{ChatClient, ChatOptions, ChatRequest, ChatResponse, TokenUsage};
use crate::types::Message;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub const OPENROUTER_API_BASE: &str = "https://openrouter.ai/api/v1";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// OpenAI client (HTTP direct, no SDK)
pub struct OpenAIClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl OpenAIClient {
    /// Create new client with API key
    pub fn new(api_key: impl Into<String>) -> Result<Self, GenerationError> {
        Self::with_settings(api_key, OPENAI_API_BASE, DEFAULT_TIMEOUT)
    }

    /// Create a client against any OpenAI-compatible endpoint
    pub fn with_settings(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let api_key = api_key.into();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|_| GenerationError::Config("Invalid API key format".to_string()))?,
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| GenerationError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build chat completion request payload
    fn build_chat_request(&self, model: &str, messages: &[Message], options: &ChatOptions) -> Value {
        let mut request = serde_json::json!({
            "model": model,
            "messages": messages,
            "stream": false,
        });

        if let Some(obj) = request.as_object_mut() {
            if let Some(temp) = options.temperature {
                obj.insert("temperature".to_string(), serde_json::json!(temp));
            }
            if let Some(max_tokens) = options.max_tokens {
                obj.insert("max_tokens".to_string(), serde_json::json!(max_tokens));
            }
        }

        request
    }
}

#[async_trait]
impl ChatClient for OpenAIClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, GenerationError> {
        let payload = self.build_chat_request(&request.model, &request.messages, &request.options);

        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            "Sending chat completion request"
        );

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs);
            let error_text = response.text().await.unwrap_or_default();
            return Err(GenerationError::from_status(status, error_text, retry_after));
        }

        let raw: OpenAIChatResponse = response.json().await?;

        let choice = raw.choices.first();
        let content = choice
            .and_then(|c| c.message.content.clone())
            .filter(|c| !c.trim().is_empty())
            .ok_or(GenerationError::EmptyResponse)?;

        let usage = raw.usage.as_ref().map(|u| TokenUsage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });
        if let Some(usage) = &usage {
            tracing::info!(
                input = usage.input_tokens,
                output = usage.output_tokens,
                total = usage.total_tokens,
                "Token usage"
            );
        }

        Ok(ChatResponse {
            content,
            usage,
            finish_reason: choice.and_then(|c| c.finish_reason.clone()),
            raw: serde_json::to_value(&raw).map_err(|e| GenerationError::Decode(e.to_string()))?,
        })
    }
}

// ============================================================================
// OPENAI-SPECIFIC RESPONSE TYPES (for Chat Completions)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAIChatResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Choice {
    pub index: u32,
    pub message: ResponseMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResponseMessage {
    pub role: String,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}
