pub mod types;
pub mod traits;
pub mod error;
pub mod config;
pub mod openai;
pub mod retry;
pub mod tokens;

pub use traits::{ChatClient, ChatRequest, ChatResponse, ChatOptions, TokenUsage};
pub use error::{GenerationError, FailureKind};
pub use config::{ClientFactory, ProviderConfig, ProviderType, mask_api_key};
pub use openai::OpenAIClient;
pub use retry::{RetryPolicy, RetryingClient};
pub use tokens::estimate_tokens;
pub use types::Message;
