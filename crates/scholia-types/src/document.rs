use serde::{Deserialize, Serialize};

/// Plain text pulled out of a reading, plus whatever metadata the file carried.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub text: String,
    pub metadata: DocumentMetadata,
    pub page_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: String,
    pub author: String,
    pub subject: String,
    pub creator: String,
}

impl DocumentMetadata {
    pub fn author_or_unknown(&self) -> &str {
        if self.author.trim().is_empty() {
            crate::UNKNOWN
        } else {
            self.author.trim()
        }
    }
}
