use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Why a single backend gave up on a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendFailure {
    pub backend: &'static str,
    pub message: String,
}

impl fmt::Display for BackendFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.backend, self.message)
    }
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("PDF file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Path is not a file: {}", .path.display())]
    NotAFile { path: PathBuf },

    #[error("Failed to extract {} with every backend ({})", .path.display(), join_failures(.errors))]
    AllBackendsFailed {
        path: PathBuf,
        errors: Vec<BackendFailure>,
    },

    #[error("No text layer in {} and OCR is not available", .path.display())]
    OcrUnavailable { path: PathBuf },

    #[error("OCR failed for {}: {message}", .path.display())]
    Ocr { path: PathBuf, message: String },
}

impl ExtractError {
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::NotFound { path }
            | Self::NotAFile { path }
            | Self::AllBackendsFailed { path, .. }
            | Self::OcrUnavailable { path }
            | Self::Ocr { path, .. } => path,
        }
    }
}

fn join_failures(errors: &[BackendFailure]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
