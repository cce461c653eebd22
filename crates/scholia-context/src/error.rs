use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Failed to scan {} for previous summaries: {source}", .path.display())]
    Scan {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("Failed to read summary {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}
