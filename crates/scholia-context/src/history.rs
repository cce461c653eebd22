//! Previously generated summaries, read back as context for the next reading.
//!
//! Summaries are found by name (`*_summary.md`) anywhere under the course
//! folder and parsed with the grammar in [`scholia_types::schema`], the same
//! one the formatter writes with.

use crate::error::HistoryError;
use scholia_types::schema::{
    field_value, parse_front_matter, scalar, thesis_section, CENTRAL_ARGUMENT, KEY_TERMS,
};
use scholia_types::{SummaryRecord, UNKNOWN};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

pub const SUMMARY_SUFFIX: &str = "_summary.md";

/// Longest string still accepted as a key term
const MAX_TERM_CHARS: usize = 50;

pub struct SummaryHistory {
    course_folder: PathBuf,
    max_summaries: usize,
    exclude: Option<PathBuf>,
}

impl SummaryHistory {
    pub fn new(course_folder: impl Into<PathBuf>, max_summaries: usize) -> Self {
        Self {
            course_folder: course_folder.into(),
            max_summaries,
            exclude: None,
        }
    }

    /// Leave this file out of the results (the summary the current run will overwrite)
    pub fn excluding(mut self, path: impl AsRef<Path>) -> Self {
        self.exclude = Some(normalize(path.as_ref()));
        self
    }

    /// Summary files under the course folder, oldest first, at most `max_summaries`.
    pub fn find_previous_summaries(&self) -> Result<Vec<PathBuf>, HistoryError> {
        let folder = &self.course_folder;
        if !folder.is_dir() {
            tracing::warn!(folder = %folder.display(), "Course folder doesn't exist, no history available");
            return Ok(Vec::new());
        }

        tracing::info!(folder = %folder.display(), "Searching for previous summaries");

        let mut found: Vec<(SystemTime, PathBuf)> = Vec::new();
        for entry in WalkDir::new(folder) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(HistoryError::Scan { path: folder.clone(), source: e });
                }
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry while scanning for summaries: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() || !is_summary_file(entry.path()) {
                continue;
            }
            if self.exclude.as_deref() == Some(normalize(entry.path()).as_path()) {
                tracing::debug!(path = %entry.path().display(), "Skipping summary for the current reading");
                continue;
            }

            let modified = entry
                .metadata()
                .ok()
                .and_then(|meta| meta.modified().ok())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            found.push((modified, entry.into_path()));
        }

        found.sort();
        tracing::info!(count = found.len(), "Found previous summaries");

        if found.len() > self.max_summaries {
            tracing::info!(max = self.max_summaries, "Limiting to most recent summaries");
            found.drain(..found.len() - self.max_summaries);
        }

        Ok(found.into_iter().map(|(_, path)| path).collect())
    }

    /// Parse each summary independently; unreadable files are logged and skipped.
    pub fn extract_context(&self, paths: &[PathBuf]) -> Vec<SummaryRecord> {
        if paths.is_empty() {
            return Vec::new();
        }

        let records: Vec<SummaryRecord> = paths
            .iter()
            .filter_map(|path| match parse_summary(path) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("{}", e);
                    None
                }
            })
            .collect();

        tracing::info!(
            parsed = records.len(),
            total = paths.len(),
            "Extracted context from previous summaries"
        );
        records
    }
}

fn is_summary_file(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(SUMMARY_SUFFIX))
}

fn normalize(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Read one summary file back into a [`SummaryRecord`].
pub fn parse_summary(path: &Path) -> Result<SummaryRecord, HistoryError> {
    let content = fs::read_to_string(path).map_err(|source| HistoryError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let front_matter = parse_front_matter(&content).unwrap_or_else(|e| {
        tracing::debug!(path = %path.display(), "Malformed front matter: {}", e);
        Default::default()
    });

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(SummaryRecord {
        week: scalar(&front_matter, "week").unwrap_or_else(|| UNKNOWN.to_string()),
        title: scalar(&front_matter, "title").unwrap_or(stem),
        author: scalar(&front_matter, "author").unwrap_or_else(|| UNKNOWN.to_string()),
        thesis: extract_thesis(&content),
        key_concepts: extract_key_concepts(&content),
    })
}

/// The `Central Argument` of the core-thesis section, emphasis removed.
///
/// A label left bare takes its value from the next non-empty line, unless
/// that line is another labelled field.
pub fn extract_thesis(document: &str) -> String {
    let Some(body) = thesis_section().body(document) else {
        return String::new();
    };

    let mut lines = body.lines();
    let Some(value) = lines.by_ref().find_map(|line| field_value(line, CENTRAL_ARGUMENT)) else {
        return String::new();
    };
    if !value.is_empty() {
        return strip_emphasis(value);
    }

    lines
        .map(str::trim)
        .find(|line| !line.is_empty())
        .filter(|line| !is_labelled_field(line))
        .map(strip_emphasis)
        .unwrap_or_default()
}

/// Bare term names from the `Key Terms` block of the core-thesis section.
///
/// The block runs until the section's next labelled field. Each item is cut
/// at its term/definition separator; items without one are not terms.
pub fn extract_key_concepts(document: &str) -> Vec<String> {
    let Some(body) = thesis_section().body(document) else {
        return Vec::new();
    };

    let mut lines = body.lines();
    let Some(first) = lines.by_ref().find_map(|line| field_value(line, KEY_TERMS)) else {
        return Vec::new();
    };

    let block = std::iter::once(first).chain(lines.take_while(|line| !is_labelled_field(line)));

    block
        .flat_map(split_items)
        .filter_map(term_of)
        .take(SummaryRecord::MAX_KEY_CONCEPTS)
        .collect()
}

fn is_labelled_field(line: &str) -> bool {
    thesis_section()
        .fields
        .iter()
        .any(|label| field_value(line, label).is_some())
}

/// `;` always separates items. `,` does only when more than one piece
/// carries its own `term:` pair, so commas inside a definition survive.
fn split_items(line: &str) -> Vec<&str> {
    line.split(';')
        .flat_map(|item| {
            let pieces: Vec<&str> = item.split(',').collect();
            if pieces.iter().filter(|piece| piece.contains(':')).count() > 1 {
                pieces
            } else {
                vec![item]
            }
        })
        .collect()
}

fn term_of(item: &str) -> Option<String> {
    let item = item
        .trim()
        .trim_start_matches(|c: char| c == '-' || c == '*' || c == '+' || c.is_whitespace());
    let item = strip_numbering(item);

    let cut = [":", "–", "—", " - "]
        .iter()
        .filter_map(|sep| item.find(sep))
        .min()
        .or_else(|| item.find('-'))?;

    let term = strip_emphasis(&item[..cut]);
    let term = term.trim_matches(|c: char| c == '"' || c == '\'' || c.is_whitespace());

    let starts_with_letter = term.chars().next().is_some_and(char::is_alphabetic);
    (starts_with_letter && term.chars().count() < MAX_TERM_CHARS).then(|| term.to_string())
}

/// `"3. ritual"` / `"3) ritual"` → `"ritual"`
fn strip_numbering(item: &str) -> &str {
    let digits = item.trim_start_matches(|c: char| c.is_ascii_digit());
    if digits.len() == item.len() {
        return item;
    }
    digits
        .strip_prefix('.')
        .or_else(|| digits.strip_prefix(')'))
        .map(str::trim_start)
        .unwrap_or(item)
}

fn strip_emphasis(text: &str) -> String {
    text.chars()
        .filter(|c| *c != '*' && *c != '_')
        .collect::<String>()
        .trim()
        .to_string()
}
