// Configuration layer for provider-agnostic LLM client creation
// This module provides a factory pattern for creating LLM clients from configuration

use crate::error::GenerationError;
use crate::openai::{OpenAIClient, OPENAI_API_BASE, OPENROUTER_API_BASE};
use crate::traits::ChatClient;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Type of LLM provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    OpenAI,
    #[default]
    OpenRouter,
}

/// Complete provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub provider: ProviderType,
    pub api_key: String,
    /// Overrides the provider's default endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
}

fn default_timeout() -> Duration {
    Duration::from_secs(300)
}

impl ProviderConfig {
    /// Create OpenAI provider config
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self {
            provider: ProviderType::OpenAI,
            api_key: api_key.into(),
            base_url: None,
            timeout: default_timeout(),
        }
    }

    /// Create OpenRouter provider config (OpenAI-compatible wire format)
    pub fn openrouter(api_key: impl Into<String>) -> Self {
        Self {
            provider: ProviderType::OpenRouter,
            ..Self::openai(api_key)
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the provider type
    pub fn provider_type(&self) -> ProviderType {
        self.provider
    }

    /// Endpoint requests will be sent to
    pub fn endpoint(&self) -> &str {
        match (&self.base_url, self.provider) {
            (Some(url), _) => url,
            (None, ProviderType::OpenAI) => OPENAI_API_BASE,
            (None, ProviderType::OpenRouter) => OPENROUTER_API_BASE,
        }
    }
}

/// Factory for creating LLM clients from configuration
pub struct ClientFactory;

impl ClientFactory {
    /// Create a chat client from provider configuration
    pub fn create_chat_client(config: &ProviderConfig) -> Result<Arc<dyn ChatClient>, GenerationError> {
        tracing::info!(
            provider = ?config.provider,
            endpoint = config.endpoint(),
            api_key = %mask_api_key(&config.api_key),
            "Initializing chat client"
        );
        let client = OpenAIClient::with_settings(&config.api_key, config.endpoint(), config.timeout)?;
        Ok(Arc::new(client))
    }
}

/// Keep the first 8 and last 4 characters of a key for logs
pub fn mask_api_key(api_key: &str) -> String {
    let chars: Vec<char> = api_key.chars().collect();
    if chars.len() < 12 {
        return "****".to_string();
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openrouter_config() {
        let config = ProviderConfig::openrouter("sk-or-v1-test");
        assert_eq!(config.provider_type(), ProviderType::OpenRouter);
        assert_eq!(config.endpoint(), OPENROUTER_API_BASE);
    }

    #[test]
    fn test_base_url_override() {
        let config = ProviderConfig::openai("test-key").with_base_url("http://127.0.0.1:9999/v1");
        assert_eq!(config.provider_type(), ProviderType::OpenAI);
        assert_eq!(config.endpoint(), "http://127.0.0.1:9999/v1");
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = ProviderConfig::openrouter("sk-or-v1-test").with_timeout(Duration::from_secs(30));

        let json = serde_json::to_string(&config).unwrap();
        let deserialized: ProviderConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config.provider_type(), deserialized.provider_type());
        assert_eq!(deserialized.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_mask_api_key() {
        assert_eq!(mask_api_key("sk-or-v1-0123456789abcdef"), "sk-or-v1...cdef");
        assert_eq!(mask_api_key("short"), "****");
    }

    #[test]
    fn test_factory_builds_client() {
        assert!(ClientFactory::create_chat_client(&ProviderConfig::openrouter("sk-or-v1-test")).is_ok());
    }
}
