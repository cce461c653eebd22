use scholia_persist::{TrackingError, TrackingReport};
use scholia_types::{CourseContext, SummaryRecord};
use std::path::PathBuf;

/// One reading to summarize
#[derive(Debug, Clone, Default)]
pub struct SummarizeInput {
    pub pdf_path: PathBuf,
    /// Defaults to `<pdf dir>/<stem>_summary.md`
    pub output_path: Option<PathBuf>,
    pub course_override: Option<String>,
    pub week_override: Option<String>,
    /// Overrides `history.enabled` for this run
    pub enable_history: Option<bool>,
    /// Course detection never looks at this directory or above it
    pub search_root: Option<PathBuf>,
}

impl SummarizeInput {
    pub fn new(pdf_path: impl Into<PathBuf>) -> Self {
        Self {
            pdf_path: pdf_path.into(),
            ..Default::default()
        }
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    pub fn with_course(mut self, course: impl Into<String>) -> Self {
        self.course_override = Some(course.into());
        self
    }

    pub fn with_week(mut self, week: impl Into<String>) -> Self {
        self.week_override = Some(week.into());
        self
    }

    pub fn with_history(mut self, enabled: bool) -> Self {
        self.enable_history = Some(enabled);
        self
    }

    pub fn with_search_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.search_root = Some(root.into());
        self
    }
}

#[derive(Debug)]
pub enum TrackingStatus {
    Updated(TrackingReport),
    Skipped(String),
    /// The summary was written; only the bookkeeping failed
    Failed(TrackingError),
}

#[derive(Debug)]
pub struct SummaryOutcome {
    pub run_id: String,
    pub summary_path: PathBuf,
    pub context: CourseContext,
    pub previous_summaries: Vec<SummaryRecord>,
    pub tracking: TrackingStatus,
}
