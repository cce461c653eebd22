use crate::stage::Stage;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

pub type EventSender = mpsc::UnboundedSender<StageEvent>;

/// Progress of a run, for progress bars and logs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StageEvent {
    Started {
        stage: Stage,
    },

    /// Optional stage whose enabling condition did not hold
    Skipped {
        stage: Stage,
        reason: String,
    },

    Completed {
        stage: Stage,
        duration_ms: u64,
    },
}

impl StageEvent {
    pub fn stage(&self) -> Stage {
        match self {
            Self::Started { stage } | Self::Skipped { stage, .. } | Self::Completed { stage, .. } => *stage,
        }
    }
}
