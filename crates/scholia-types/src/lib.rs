pub mod config;
pub mod context;
pub mod document;
pub mod record;
pub mod schema;

pub use config::{
    ExtractionConfig, HistoryConfig, LLMConfig, SummarizerConfig, TrackingConfig,
};
pub use context::CourseContext;
pub use document::{DocumentMetadata, ExtractedDocument};
pub use record::{SummaryRecord, UNKNOWN};
pub use schema::{FrontMatter, SectionSpec, SCHEMA_VERSION, SECTIONS};
