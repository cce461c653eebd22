//! Text extraction for course readings.
//!
//! [`PdfExtractor`] walks a chain of [`TextBackend`]s until one yields text.
//! Scanned documents with no text layer are handed to an [`OcrEngine`] when
//! one is configured.

pub mod error;
pub mod ocr;
pub mod pdf;
pub mod text;

pub use error::{BackendFailure, ExtractError};
pub use ocr::OcrEngine;
pub use pdf::{LopdfBackend, PdfExtractBackend, PdfExtractor, RawDocument, TextBackend};

use scholia_types::ExtractedDocument;
use std::path::Path;

/// Turns a file on disk into plain text plus metadata.
pub trait DocumentExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<ExtractedDocument, ExtractError>;
}
