use super::document::{
    is_course_heading, is_week_line, load_or_template, save, TrackingDocument,
};
use super::{single_line, TrackingEntry};
use crate::error::{DocumentKind, TrackingError};
use std::path::Path;

const KIND: DocumentKind = DocumentKind::Global;

const TEMPLATE: &str = "# Academic Reading Master Index\n\n*All courses and readings tracked here*\n";

/// Counts after an update of the global document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GlobalCounts {
    pub courses: usize,
    pub readings: usize,
}

/// `- Week 3: [title](/full/path_summary.md) - author`
fn entry_line(entry: &TrackingEntry) -> String {
    format!(
        "- Week {}: [{}]({}) - {}",
        single_line(&entry.week),
        single_line(&entry.title),
        entry.summary_path.display(),
        single_line(&entry.author)
    )
}

/// Put `line` at the end of the `## code` section, creating the section if needed.
fn insert_into_section(doc: &mut TrackingDocument, code: &str, line: String) {
    let heading = format!("## {}", code);
    let Some(start) = doc.body.iter().position(|l| l.trim_end() == heading) else {
        doc.push_block(vec![heading, line]);
        return;
    };

    let end = doc.body[start + 1..]
        .iter()
        .position(|l| is_course_heading(l))
        .map_or(doc.body.len(), |offset| start + 1 + offset);

    let mut at = end;
    while at > start + 1 && doc.body[at - 1].trim().is_empty() {
        at -= 1;
    }
    doc.body.insert(at, line);
}

pub(crate) fn update(path: &Path, code: &str, entry: &TrackingEntry) -> Result<GlobalCounts, TrackingError> {
    tracing::debug!(path = %path.display(), "Updating global tracking document");

    let content = load_or_template(KIND, path, || TEMPLATE.to_string())?;
    let mut doc = TrackingDocument::parse(&content);
    insert_into_section(&mut doc, code, entry_line(entry));

    let counts = GlobalCounts {
        courses: doc.count(is_course_heading),
        readings: doc.count(is_week_line),
    };
    let rendered = doc.render(
        &entry.date(),
        &[("Total Courses", counts.courses), ("Total Readings", counts.readings)],
    );
    save(KIND, path, &rendered)?;
    Ok(counts)
}
