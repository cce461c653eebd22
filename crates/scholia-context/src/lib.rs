mod detector;
mod error;
mod history;
mod request;
mod templates;

pub use detector::ContextDetector;
pub use error::HistoryError;
pub use history::{extract_key_concepts, extract_thesis, parse_summary, SummaryHistory, SUMMARY_SUFFIX};
pub use request::{truncate_chars, GenerationRequest};
pub use templates::{build_summary_prompt, SYSTEM_PROMPT};
