use std::path::Path;

/// Optical character recognition for pages without a text layer.
///
/// No engine ships with this crate; callers that have one (a tesseract
/// binding, a remote service) plug it into
/// [`PdfExtractor::with_ocr`](crate::PdfExtractor::with_ocr).
pub trait OcrEngine: Send + Sync {
    fn name(&self) -> &str;

    /// Recognised text, one entry per page, for at most `max_pages` pages
    fn recognize(&self, path: &Path, max_pages: usize) -> Result<Vec<String>, String>;
}
