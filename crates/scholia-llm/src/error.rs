use std::time::Duration;
use thiserror::Error;

/// Public failure classes of the generation collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Auth,
    RateLimit,
    Timeout,
    Generic,
}

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Authentication failed ({status}): check OPENROUTER_API_KEY")]
    Auth { status: u16 },

    #[error("Rate limit exceeded, wait and try again")]
    RateLimited { retry_after: Option<Duration> },

    #[error("Request timed out: {message}")]
    Timeout { message: String },

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to send request: {0}")]
    Transport(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("API returned an empty response")]
    EmptyResponse,

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl GenerationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Auth { .. } => FailureKind::Auth,
            Self::RateLimited { .. } => FailureKind::RateLimit,
            Self::Timeout { .. } => FailureKind::Timeout,
            _ => FailureKind::Generic,
        }
    }

    /// Rate limits, timeouts, dropped connections and 5xx responses.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::Timeout { .. } | Self::Transport(_) => true,
            Self::Api { status, .. } => *status >= 500,
            Self::Auth { .. } | Self::Decode(_) | Self::EmptyResponse | Self::Config(_) => false,
        }
    }

    /// HTTP status behind the failure, if there was one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Auth { status } | Self::Api { status, .. } => Some(*status),
            Self::RateLimited { .. } => Some(429),
            _ => None,
        }
    }

    /// Classify a non-success HTTP status
    pub fn from_status(status: u16, body: String, retry_after: Option<Duration>) -> Self {
        match status {
            401 | 403 => Self::Auth { status },
            429 => Self::RateLimited { retry_after },
            408 | 504 => Self::Timeout { message: format!("server returned {}", status) },
            _ => Self::Api { status, message: body },
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout { message: err.to_string() }
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::from_status(status.as_u16(), err.to_string(), None)
        } else {
            Self::Transport(err.to_string())
        }
    }
}
