use serde::{Deserialize, Serialize};
use std::fmt;

/// The nine steps of a run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Extract,
    DetectContext,
    FindHistory,
    ExtractHistory,
    BuildRequest,
    Generate,
    Format,
    Persist,
    UpdateTracking,
}

impl Stage {
    pub const ALL: [Stage; 9] = [
        Stage::Extract,
        Stage::DetectContext,
        Stage::FindHistory,
        Stage::ExtractHistory,
        Stage::BuildRequest,
        Stage::Generate,
        Stage::Format,
        Stage::Persist,
        Stage::UpdateTracking,
    ];

    /// 1-based position
    pub fn number(self) -> usize {
        self as usize + 1
    }

    pub fn description(self) -> &'static str {
        match self {
            Stage::Extract => "Extracting text from PDF",
            Stage::DetectContext => "Detecting course context",
            Stage::FindHistory => "Searching for previous summaries",
            Stage::ExtractHistory => "Extracting context from previous summaries",
            Stage::BuildRequest => "Building generation request",
            Stage::Generate => "Generating summary",
            Stage::Format => "Formatting and validating output",
            Stage::Persist => "Saving summary",
            Stage::UpdateTracking => "Updating tracking documents",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {}/{}: {}", self.number(), Self::ALL.len(), self.description())
    }
}
