use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Everything a summarization run needs to know, built once and shared
/// by reference with each component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummarizerConfig {
    pub llm: LLMConfig,
    pub history: HistoryConfig,
    pub extraction: ExtractionConfig,
    pub tracking: TrackingConfig,
}

impl SummarizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_llm(mut self, llm: LLMConfig) -> Self {
        self.llm = llm;
        self
    }

    pub fn with_history(mut self, history: HistoryConfig) -> Self {
        self.history = history;
        self
    }

    pub fn with_extraction(mut self, extraction: ExtractionConfig) -> Self {
        self.extraction = extraction;
        self
    }

    pub fn with_tracking(mut self, tracking: TrackingConfig) -> Self {
        self.tracking = tracking;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMConfig {
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub request_timeout: Duration,
    /// Total attempts for transient failures (1 = no retry)
    pub max_attempts: usize,
}

impl LLMConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn with_max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = Some(tokens);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            model: "x-ai/grok-4.1-fast".to_string(),
            temperature: Some(0.7),
            max_tokens: Some(5000),
            request_timeout: Duration::from_secs(300),
            max_attempts: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    pub enabled: bool,
    pub max_previous_summaries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_previous_summaries: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Hard cap on reading text sent to the model, in characters
    pub max_chars: usize,
    pub max_pages: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_chars: 30_000,
            max_pages: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    pub auto_update: bool,
    pub global_document_path: PathBuf,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            auto_update: true,
            global_document_path: PathBuf::from(".scholia").join("_global_master.md"),
        }
    }
}

impl TrackingConfig {
    pub fn new(global_document_path: impl Into<PathBuf>) -> Self {
        Self {
            auto_update: true,
            global_document_path: global_document_path.into(),
        }
    }

    pub fn with_auto_update(mut self, enabled: bool) -> Self {
        self.auto_update = enabled;
        self
    }
}
