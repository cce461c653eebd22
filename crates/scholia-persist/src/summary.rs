//! Final summary document: front matter, title block and the validated body.

use crate::error::{PersistError, Result, ValidationError};
use scholia_types::{FrontMatter, SECTIONS};
use std::fs;
use std::path::{Path, PathBuf};

/// Remove a ```` ```markdown ```` fence the model sometimes wraps its answer in.
pub fn strip_code_fence(raw: &str) -> &str {
    let text = raw.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    // Drop the opening fence line, including any language tag
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => return "",
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Check that every numbered section heading is present.
pub fn validate_sections(body: &str) -> std::result::Result<(), ValidationError> {
    let missing_sections: Vec<String> = SECTIONS
        .iter()
        .filter(|section| !body.lines().any(|line| section.matches_heading(line)))
        .map(|section| section.label())
        .collect();

    if missing_sections.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { missing_sections })
    }
}

#[derive(Debug, Clone)]
pub struct SummaryDocument {
    pub front_matter: FrontMatter,
    pub body: String,
}

impl SummaryDocument {
    /// Accept generated markdown, rejecting it when a section is missing.
    pub fn new(front_matter: FrontMatter, generated: &str) -> std::result::Result<Self, ValidationError> {
        let body = strip_code_fence(generated);
        validate_sections(body)?;
        Ok(Self {
            front_matter,
            body: body.to_string(),
        })
    }

    pub fn render(&self) -> Result<String> {
        let fm = &self.front_matter;
        Ok(format!(
            "{}\n# {}\n\n*{} | {} | Week {}*\n\n{}\n",
            fm.render()?,
            fm.title,
            fm.author,
            fm.course,
            fm.week,
            self.body
        ))
    }

    /// Write to `path`, creating parent directories.
    pub fn write(&self, path: &Path) -> Result<PathBuf> {
        let content = self.render()?;
        let io_err = |source| PersistError::Io { path: path.to_path_buf(), source };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, content).map_err(io_err)?;

        tracing::info!(path = %path.display(), "Summary saved");
        Ok(path.to_path_buf())
    }
}

/// `readings/week3/turner.pdf` → `readings/week3/turner_summary.md`
pub fn default_output_path(pdf_path: &Path) -> PathBuf {
    let stem = pdf_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "reading".to_string());
    pdf_path.with_file_name(format!("{}_summary.md", stem))
}
