mod builder;
mod error;
mod events;
mod stage;
mod summarizer;
mod types;

pub use builder::SummarizerBuilder;
pub use error::PipelineError;
pub use events::{EventSender, StageEvent};
pub use stage::Stage;
pub use summarizer::Summarizer;
pub use types::{SummarizeInput, SummaryOutcome, TrackingStatus};

pub use scholia_types::SummarizerConfig;
