use crate::error::{DocumentKind, TrackingError};
use std::fs;
use std::path::Path;

const FOOTER_DELIMITER: &str = "---";
const LAST_UPDATED: &str = "*Last Updated*";

/// A tracking document split into its body lines; the footer is never kept.
///
/// The footer is rebuilt from the body on every write, so counters always
/// reflect what the body actually contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TrackingDocument {
    pub(crate) body: Vec<String>,
}

impl TrackingDocument {
    /// Split `content` at the footer (`---` followed by `*Last Updated*`).
    ///
    /// Lines after the footer's own `*...*` statistics (e.g. entries pasted
    /// below it by hand) are moved back into the body rather than lost.
    pub(crate) fn parse(content: &str) -> Self {
        let lines: Vec<&str> = content.lines().collect();
        let footer = lines
            .windows(2)
            .position(|pair| pair[0].trim() == FOOTER_DELIMITER && pair[1].trim_start().starts_with(LAST_UPDATED));

        let Some(index) = footer else {
            return Self { body: lines.iter().map(|l| l.to_string()).collect() };
        };

        let mut body: Vec<String> = lines[..index].iter().map(|l| l.to_string()).collect();
        let trailing: Vec<String> = lines[index + 1..]
            .iter()
            .skip_while(|line| line.trim_start().starts_with('*'))
            .skip_while(|line| line.trim().is_empty())
            .map(|l| l.to_string())
            .collect();
        if !trailing.is_empty() {
            tracing::warn!(lines = trailing.len(), "Content found after tracking footer, keeping it in the body");
            push_separated(&mut body, trailing);
        }

        Self { body }
    }

    /// Append a block after the body, separated by one blank line.
    pub(crate) fn push_block(&mut self, block: Vec<String>) {
        push_separated(&mut self.body, block);
    }

    pub(crate) fn count(&self, marker: impl Fn(&str) -> bool) -> usize {
        self.body.iter().filter(|line| marker(line.as_str())).count()
    }

    /// Body, a blank line, then `stats` under a fresh footer delimiter.
    pub(crate) fn render(&self, last_updated: &str, stats: &[(&str, usize)]) -> String {
        let mut out: Vec<String> = self.body.clone();
        trim_trailing_blank(&mut out);
        out.push(String::new());
        out.push(FOOTER_DELIMITER.to_string());
        out.push(format!("{}: {}", LAST_UPDATED, last_updated));
        for (label, value) in stats {
            out.push(format!("*{}*: {}", label, value));
        }
        let mut text = out.join("\n");
        text.push('\n');
        text
    }
}

fn trim_trailing_blank(lines: &mut Vec<String>) {
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
}

fn push_separated(lines: &mut Vec<String>, block: Vec<String>) {
    trim_trailing_blank(lines);
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.extend(block);
}

/// `### Week 3: ...`
pub(crate) fn is_week_heading(line: &str) -> bool {
    line.strip_prefix("###")
        .is_some_and(|rest| rest.starts_with(char::is_whitespace) && rest.trim_start().starts_with("Week"))
}

/// `## CODE` (but not `###`)
pub(crate) fn is_course_heading(line: &str) -> bool {
    line.strip_prefix("##")
        .is_some_and(|rest| rest.starts_with(char::is_whitespace) && !rest.trim().is_empty())
}

/// `- Week 3: [...](...) - author`
pub(crate) fn is_week_line(line: &str) -> bool {
    line.strip_prefix('-')
        .is_some_and(|rest| rest.starts_with(char::is_whitespace) && rest.trim_start().starts_with("Week"))
}

/// Existing content of `path`, or `template` when the file does not exist yet.
pub(crate) fn load_or_template(
    kind: DocumentKind,
    path: &Path,
    template: impl FnOnce() -> String,
) -> Result<String, TrackingError> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "Creating new {} tracking document", kind);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| TrackingError::CreateDir {
                kind,
                path: path.to_path_buf(),
                source,
            })?;
        }
        return Ok(template());
    }

    fs::read_to_string(path).map_err(|source| TrackingError::Read {
        kind,
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn save(kind: DocumentKind, path: &Path, content: &str) -> Result<(), TrackingError> {
    fs::write(path, content).map_err(|source| TrackingError::Write {
        kind,
        path: path.to_path_buf(),
        source,
    })
}
