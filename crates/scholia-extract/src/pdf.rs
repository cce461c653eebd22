use crate::error::{BackendFailure, ExtractError};
use crate::ocr::OcrEngine;
use crate::text::{clean_text, decode_pdf_string, guess_title};
use crate::DocumentExtractor;
use lopdf::{Document, Object};
use scholia_types::{DocumentMetadata, ExtractedDocument};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

/// Raw output of a backend: per-page text as the backend produced it.
#[derive(Debug, Clone, Default)]
pub struct RawDocument {
    pub pages: Vec<String>,
    pub metadata: DocumentMetadata,
}

/// One way of pulling text out of a PDF.
pub trait TextBackend: Send + Sync {
    fn name(&self) -> &'static str;

    fn extract(&self, path: &Path, max_pages: usize) -> Result<RawDocument, String>;
}

/// Primary backend: page-by-page text and the trailer `Info` dictionary.
pub struct LopdfBackend;

impl TextBackend for LopdfBackend {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn extract(&self, path: &Path, max_pages: usize) -> Result<RawDocument, String> {
        let doc = Document::load(path).map_err(|e| e.to_string())?;
        let metadata = info_metadata(&doc);

        let mut pages = Vec::new();
        for page_number in doc.get_pages().keys().take(max_pages) {
            match doc.extract_text(&[*page_number]) {
                Ok(text) => pages.push(text),
                Err(e) => tracing::warn!(page = page_number, "Failed to extract page: {}", e),
            }
        }

        Ok(RawDocument { pages, metadata })
    }
}

fn info_metadata(doc: &Document) -> DocumentMetadata {
    let info = match doc.trailer.get(b"Info") {
        Ok(Object::Reference(id)) => doc.get_object(*id).ok(),
        Ok(object) => Some(object),
        Err(_) => None,
    };
    let Some(Ok(dict)) = info.map(Object::as_dict) else {
        return DocumentMetadata::default();
    };

    let field = |key: &[u8]| match dict.get(key) {
        Ok(Object::String(bytes, _)) => decode_pdf_string(bytes).trim().to_string(),
        _ => String::new(),
    };

    DocumentMetadata {
        title: field(b"Title"),
        author: field(b"Author"),
        subject: field(b"Subject"),
        creator: field(b"Creator"),
    }
}

/// Fallback backend for files `lopdf` cannot decode.
///
/// Yields the whole document as form-feed separated pages and no metadata.
pub struct PdfExtractBackend;

impl TextBackend for PdfExtractBackend {
    fn name(&self) -> &'static str {
        "pdf-extract"
    }

    fn extract(&self, path: &Path, max_pages: usize) -> Result<RawDocument, String> {
        // pdf-extract panics on some malformed inputs
        let text = panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text(path)))
            .map_err(|_| "backend panicked while decoding".to_string())?
            .map_err(|e| e.to_string())?;

        let pages = text
            .split('\u{c}')
            .take(max_pages)
            .map(str::to_string)
            .collect();

        Ok(RawDocument {
            pages,
            metadata: DocumentMetadata::default(),
        })
    }
}

/// Extracts PDFs through a fallback chain of backends.
pub struct PdfExtractor {
    max_pages: usize,
    backends: Vec<Box<dyn TextBackend>>,
    ocr: Option<Box<dyn OcrEngine>>,
}

impl PdfExtractor {
    pub fn new(max_pages: usize) -> Self {
        Self {
            max_pages,
            backends: vec![Box::new(LopdfBackend), Box::new(PdfExtractBackend)],
            ocr: None,
        }
    }

    /// Replace the backend chain; backends are tried in order
    pub fn with_backends(mut self, backends: Vec<Box<dyn TextBackend>>) -> Self {
        self.backends = backends;
        self
    }

    pub fn with_ocr(mut self, engine: impl OcrEngine + 'static) -> Self {
        self.ocr = Some(Box::new(engine));
        self
    }

    pub fn has_ocr(&self) -> bool {
        self.ocr.is_some()
    }

    fn validate(path: &Path) -> Result<(), ExtractError> {
        if !path.exists() {
            return Err(ExtractError::NotFound { path: path.to_path_buf() });
        }
        if !path.is_file() {
            return Err(ExtractError::NotAFile { path: path.to_path_buf() });
        }
        Ok(())
    }

    fn recognize(&self, path: &Path, metadata: DocumentMetadata) -> Result<ExtractedDocument, ExtractError> {
        let Some(engine) = &self.ocr else {
            return Err(ExtractError::OcrUnavailable { path: path.to_path_buf() });
        };

        tracing::info!(engine = engine.name(), "No text layer found, running OCR");
        let pages = engine
            .recognize(path, self.max_pages)
            .map_err(|message| ExtractError::Ocr { path: path.to_path_buf(), message })?;

        assemble(path, RawDocument { pages, metadata }).ok_or_else(|| ExtractError::Ocr {
            path: path.to_path_buf(),
            message: "no text recognised".to_string(),
        })
    }
}

impl DocumentExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<ExtractedDocument, ExtractError> {
        Self::validate(path)?;
        tracing::info!(file = %path.display(), "Extracting text");

        let mut errors = Vec::new();
        let mut textless = None;

        for backend in &self.backends {
            tracing::debug!(backend = backend.name(), "Trying extraction backend");
            match backend.extract(path, self.max_pages) {
                Ok(raw) => {
                    let metadata = raw.metadata.clone();
                    match assemble(path, raw) {
                        Some(document) => {
                            tracing::info!(
                                backend = backend.name(),
                                pages = document.page_count,
                                chars = document.text.chars().count(),
                                "Extraction complete"
                            );
                            return Ok(document);
                        }
                        None => {
                            tracing::warn!(backend = backend.name(), "Backend found no text");
                            textless.get_or_insert(metadata);
                        }
                    }
                }
                Err(message) => {
                    tracing::warn!(backend = backend.name(), "Extraction backend failed: {}", message);
                    errors.push(BackendFailure { backend: backend.name(), message });
                }
            }
        }

        match textless {
            Some(metadata) => self.recognize(path, metadata),
            None => Err(ExtractError::AllBackendsFailed { path: path.to_path_buf(), errors }),
        }
    }
}

/// Clean the pages and settle the title; `None` when no page has text.
fn assemble(path: &Path, raw: RawDocument) -> Option<ExtractedDocument> {
    let guessed = raw.pages.iter().find_map(|page| guess_title(page));
    let pages: Vec<String> = raw
        .pages
        .iter()
        .map(|page| clean_text(page))
        .filter(|page| !page.is_empty())
        .collect();
    if pages.is_empty() {
        return None;
    }

    let mut metadata = raw.metadata;
    if metadata.title.trim().is_empty() {
        metadata.title = guessed.unwrap_or_else(|| file_stem(path));
    }

    Some(ExtractedDocument {
        text: pages.join("\n\n"),
        page_count: pages.len(),
        metadata,
    })
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
