use crate::error::PipelineError;
use crate::summarizer::Summarizer;
use scholia_extract::{DocumentExtractor, PdfExtractor};
use scholia_llm::{ChatClient, ClientFactory, ProviderConfig, RetryPolicy, RetryingClient};
use scholia_types::SummarizerConfig;
use std::sync::Arc;

pub struct SummarizerBuilder {
    config: SummarizerConfig,
    extractor: Option<Arc<dyn DocumentExtractor>>,
    client: Option<Arc<dyn ChatClient>>,
    provider: Option<ProviderConfig>,
}

impl SummarizerBuilder {
    pub fn new() -> Self {
        Self {
            config: SummarizerConfig::default(),
            extractor: None,
            client: None,
            provider: None,
        }
    }

    pub fn config(mut self, config: SummarizerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn extractor(mut self, extractor: Arc<dyn DocumentExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Use this client as-is; no retry layer is added
    pub fn client(mut self, client: Arc<dyn ChatClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Build an HTTP client for `provider`, wrapped in the configured retry policy
    pub fn provider(mut self, provider: ProviderConfig) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn build(self) -> Result<Summarizer, PipelineError> {
        let client = match (self.client, self.provider) {
            (Some(client), _) => client,
            (None, Some(provider)) => {
                let provider = provider.with_timeout(self.config.llm.request_timeout);
                let http = ClientFactory::create_chat_client(&provider)?;
                let policy = RetryPolicy::new(self.config.llm.max_attempts);
                Arc::new(RetryingClient::new(http, policy)) as Arc<dyn ChatClient>
            }
            (None, None) => {
                return Err(PipelineError::Config(
                    "either a chat client or a provider is required".to_string(),
                ))
            }
        };

        let extractor = self
            .extractor
            .unwrap_or_else(|| {
                Arc::new(PdfExtractor::new(self.config.extraction.max_pages)) as Arc<dyn DocumentExtractor>
            });

        Ok(Summarizer::new(Arc::new(self.config), extractor, client))
    }
}

impl Default for SummarizerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
