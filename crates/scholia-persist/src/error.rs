use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Generated text that does not have the five required sections
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Generated summary is missing required sections: {}", .missing_sections.join(", "))]
pub struct ValidationError {
    pub missing_sections: Vec<String>,
}

#[derive(Error, Debug)]
pub enum PersistError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to render front matter: {0}")]
    FrontMatter(#[from] serde_yaml::Error),

    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PersistError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Course,
    Global,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Course => write!(f, "course"),
            Self::Global => write!(f, "global"),
        }
    }
}

#[derive(Error, Debug)]
pub enum TrackingError {
    #[error("Failed to create directory for {kind} tracking document {}: {source}", .path.display())]
    CreateDir {
        kind: DocumentKind,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read {kind} tracking document {}: {source}", .path.display())]
    Read {
        kind: DocumentKind,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {kind} tracking document {}: {source}", .path.display())]
    Write {
        kind: DocumentKind,
        path: PathBuf,
        source: std::io::Error,
    },
}

impl TrackingError {
    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::CreateDir { kind, .. } | Self::Read { kind, .. } | Self::Write { kind, .. } => *kind,
        }
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            Self::CreateDir { path, .. } | Self::Read { path, .. } | Self::Write { path, .. } => path,
        }
    }
}
