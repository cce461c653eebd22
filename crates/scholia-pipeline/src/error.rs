use scholia_context::HistoryError;
use scholia_extract::ExtractError;
use scholia_llm::GenerationError;
use scholia_persist::{PersistError, ValidationError};
use thiserror::Error;

/// Failures that abort a run. Tracking failures are not among them; see
/// [`TrackingStatus::Failed`](crate::TrackingStatus::Failed).
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Extraction(#[from] ExtractError),

    #[error(transparent)]
    HistoryScan(#[from] HistoryError),

    #[error("Summary generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to save summary: {0}")]
    Persist(#[from] PersistError),

    #[error("Invalid pipeline configuration: {0}")]
    Config(String),
}
