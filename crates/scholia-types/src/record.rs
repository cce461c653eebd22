use serde::{Deserialize, Serialize};

/// Placeholder for metadata that could not be recovered
pub const UNKNOWN: &str = "Unknown";

/// Reusable context recovered from one previously generated summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub week: String,
    pub title: String,
    pub author: String,
    pub thesis: String,
    pub key_concepts: Vec<String>,
}

impl SummaryRecord {
    pub const MAX_KEY_CONCEPTS: usize = 7;

    pub fn new(title: impl Into<String>) -> Self {
        Self {
            week: UNKNOWN.to_string(),
            title: title.into(),
            author: UNKNOWN.to_string(),
            thesis: String::new(),
            key_concepts: Vec::new(),
        }
    }
}
