use super::document::{is_week_heading, load_or_template, save, TrackingDocument};
use super::{single_line, TrackingEntry};
use crate::error::{DocumentKind, TrackingError};
use scholia_types::schema::field_line;
use std::path::Path;

const KIND: DocumentKind = DocumentKind::Course;

fn template(code: &str) -> String {
    format!(
        "# {code} - Course Learning History\n\n*This file tracks all readings for {code}*\n"
    )
}

fn entry_block(entry: &TrackingEntry, course_folder: &Path) -> Vec<String> {
    let link = entry
        .summary_path
        .strip_prefix(course_folder)
        .ok()
        .filter(|relative| !relative.as_os_str().is_empty())
        .map(|relative| relative.display().to_string())
        .or_else(|| {
            entry
                .summary_path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_default();

    let title = single_line(&entry.title);
    let thesis = match single_line(&entry.thesis) {
        thesis if thesis.is_empty() => "See full summary".to_string(),
        thesis => thesis,
    };
    let concepts = if entry.key_concepts.is_empty() {
        "None extracted".to_string()
    } else {
        single_line(&entry.key_concepts.join(", "))
    };

    vec![
        format!("### Week {}: {}", single_line(&entry.week), title),
        field_line("Author", &single_line(&entry.author)),
        field_line("Core Thesis", &thesis),
        field_line("Key Concepts", &concepts),
        field_line("Link", &format!("[{}]({})", title, link)),
        field_line("Date Generated", &entry.date()),
    ]
}

/// Append the entry before the footer and recount readings. Returns the count.
pub(crate) fn update(
    path: &Path,
    code: &str,
    course_folder: &Path,
    entry: &TrackingEntry,
) -> Result<usize, TrackingError> {
    tracing::debug!(path = %path.display(), "Updating course tracking document");

    let content = load_or_template(KIND, path, || template(code))?;
    let mut doc = TrackingDocument::parse(&content);
    doc.push_block(entry_block(entry, course_folder));

    let readings = doc.count(is_week_heading);
    save(KIND, path, &doc.render(&entry.date(), &[("Total Readings", readings)]))?;
    Ok(readings)
}
