use config::{Config as ConfigLoader, ConfigError, Environment, File, FileFormat};
use scholia_types::{ExtractionConfig, HistoryConfig, LLMConfig, SummarizerConfig, TrackingConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULTS: &str = include_str!("../config/default.toml");
const LOCAL_CONFIG: &str = "scholia.toml";
const ENV_PREFIX: &str = "SCHOLIA";
pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";
const API_KEY_PREFIX: &str = "sk-or-";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub llm: LlmSettings,
    pub history: HistorySettings,
    pub extraction: ExtractionSettings,
    pub tracking: TrackingSettings,
    pub logging: LoggingConfig,

    // Secret (from ENV only)
    #[serde(skip)]
    pub openrouter_api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub model: String,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    pub timeout_secs: u64,
    pub max_attempts: usize,
    /// Alternative OpenAI-compatible endpoint
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistorySettings {
    pub enabled: bool,
    pub max_previous_summaries: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionSettings {
    pub max_chars: usize,
    pub max_pages: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackingSettings {
    pub auto_update: bool,
    pub global_document_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
}

impl LoggingConfig {
    pub fn file_path(&self) -> Option<PathBuf> {
        self.file
            .as_deref()
            .filter(|f| !f.trim().is_empty())
            .map(expand_tilde)
    }
}

impl AppConfig {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. built-in defaults (config/default.toml)
    /// 2. ~/.config/scholia/config.toml
    /// 3. ./scholia.toml
    /// 4. `explicit` (--config), which must exist
    /// 5. SCHOLIA_<SECTION>__<KEY> environment variables
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut files: Vec<(PathBuf, bool)> = Vec::new();
        if let Some(home) = dirs::home_dir() {
            files.push((home.join(".config").join("scholia").join("config.toml"), false));
        }
        files.push((PathBuf::from(LOCAL_CONFIG), false));
        if let Some(path) = explicit {
            files.push((path.to_path_buf(), true));
        }

        let mut cfg = Self::layered(&files)?;

        cfg.openrouter_api_key = std::env::var(API_KEY_VAR).map_err(|_| {
            ConfigError::Message(format!("{} environment variable is required", API_KEY_VAR))
        })?;
        validate_api_key(&cfg.openrouter_api_key)?;

        Ok(cfg)
    }

    /// Defaults, then each `(path, required)` file in order, then the environment.
    pub fn layered(files: &[(PathBuf, bool)]) -> Result<Self, ConfigError> {
        let mut builder = ConfigLoader::builder().add_source(File::from_str(DEFAULTS, FileFormat::Toml));

        for (path, required) in files {
            builder = builder.add_source(File::from(path.as_path()).required(*required));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn global_document_path(&self) -> PathBuf {
        expand_tilde(&self.tracking.global_document_path)
    }
}

impl From<&AppConfig> for SummarizerConfig {
    fn from(config: &AppConfig) -> Self {
        let llm = &config.llm;
        SummarizerConfig {
            llm: LLMConfig {
                model: llm.model.clone(),
                temperature: llm.temperature,
                max_tokens: llm.max_tokens,
                request_timeout: Duration::from_secs(llm.timeout_secs),
                max_attempts: llm.max_attempts,
            },
            history: HistoryConfig {
                enabled: config.history.enabled,
                max_previous_summaries: config.history.max_previous_summaries,
            },
            extraction: ExtractionConfig {
                max_chars: config.extraction.max_chars,
                max_pages: config.extraction.max_pages,
            },
            tracking: TrackingConfig::new(config.global_document_path())
                .with_auto_update(config.tracking.auto_update),
        }
    }
}

impl From<AppConfig> for SummarizerConfig {
    fn from(config: AppConfig) -> Self {
        Self::from(&config)
    }
}

pub fn validate_api_key(key: &str) -> Result<(), ConfigError> {
    if key.trim().is_empty() {
        return Err(ConfigError::Message(format!("{} is empty", API_KEY_VAR)));
    }
    if !key.starts_with(API_KEY_PREFIX) {
        return Err(ConfigError::Message(format!(
            "{} must start with '{}'",
            API_KEY_VAR, API_KEY_PREFIX
        )));
    }
    Ok(())
}

/// `~/notes` → `$HOME/notes`; anything else is returned unchanged
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (path, home) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}
