//! Course and global tracking documents.
//!
//! Both are plain markdown ledgers rewritten in full on every update. The
//! footer counters are recomputed from the body each time, so a document that
//! was edited by hand heals on the next run.

mod course;
mod document;
mod global;

use crate::error::TrackingError;
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};

/// One processed reading, as recorded in the tracking documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingEntry {
    pub week: String,
    pub title: String,
    pub author: String,
    pub thesis: String,
    pub key_concepts: Vec<String>,
    pub summary_path: PathBuf,
    pub generated_on: NaiveDate,
}

impl TrackingEntry {
    pub fn new(title: impl Into<String>, summary_path: impl Into<PathBuf>) -> Self {
        Self {
            week: scholia_types::UNKNOWN.to_string(),
            title: title.into(),
            author: scholia_types::UNKNOWN.to_string(),
            thesis: String::new(),
            key_concepts: Vec::new(),
            summary_path: summary_path.into(),
            generated_on: Local::now().date_naive(),
        }
    }

    /// `YYYY-MM-DD`
    pub fn date(&self) -> String {
        self.generated_on.format("%Y-%m-%d").to_string()
    }
}

/// Collapse every whitespace run, newlines included, into one space so a
/// field can never split a heading or list line.
pub(crate) fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// What an update left behind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingReport {
    pub course_document: PathBuf,
    pub global_document: PathBuf,
    pub course_readings: usize,
    pub total_courses: usize,
    pub total_readings: usize,
}

/// Updates the course document (`<course_folder>/<CODE>_master.md`) and the
/// global index for one course.
pub struct Tracker {
    course_code: String,
    course_folder: PathBuf,
    global_document: PathBuf,
}

impl Tracker {
    pub fn new(
        course_code: impl Into<String>,
        course_folder: impl Into<PathBuf>,
        global_document: impl Into<PathBuf>,
    ) -> Self {
        Self {
            course_code: course_code.into(),
            course_folder: course_folder.into(),
            global_document: global_document.into(),
        }
    }

    pub fn course_document(&self) -> PathBuf {
        self.course_folder.join(format!("{}_master.md", self.course_code))
    }

    pub fn global_document(&self) -> &Path {
        &self.global_document
    }

    /// Record `entry` in both documents, creating them on first use.
    pub fn update(&self, entry: &TrackingEntry) -> Result<TrackingReport, TrackingError> {
        tracing::info!(course = %self.course_code, "Updating tracking documents");

        let course_document = self.course_document();
        let course_readings = course::update(&course_document, &self.course_code, &self.course_folder, entry)?;
        let counts = global::update(&self.global_document, &self.course_code, entry)?;

        tracing::info!(
            course_readings,
            total_courses = counts.courses,
            total_readings = counts.readings,
            "Tracking documents updated"
        );

        Ok(TrackingReport {
            course_document,
            global_document: self.global_document.clone(),
            course_readings,
            total_courses: counts.courses,
            total_readings: counts.readings,
        })
    }
}
