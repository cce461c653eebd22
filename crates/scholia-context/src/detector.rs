//! Course context inferred from folder naming conventions.
//!
//! A reading stored at `.../PSYCH101/Week3/article.pdf` belongs to course
//! `PSYCH101`, week `3`. Each ancestor directory is tested, closest first, and
//! every slot keeps the first match it sees.

use regex::Regex;
use scholia_types::CourseContext;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

// A 3-5 letter run bounded by a non-letter, then 3-4 digits
static COURSE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^A-Za-z])([A-Za-z]{3,5})\s?(\d{3,4})(?:\D|$)").unwrap()
});
static WEEK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)week[-_\s]?(\d+)").unwrap());
static MODULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(module|unit|section)[-_\s]?(\d+)").unwrap());

/// How far up the secondary course-folder scan looks
const COURSE_FOLDER_SCAN_DEPTH: usize = 5;

pub struct ContextDetector {
    pdf_path: PathBuf,
    course_override: Option<String>,
    week_override: Option<String>,
    ceiling: Option<PathBuf>,
}

impl ContextDetector {
    pub fn new(pdf_path: impl Into<PathBuf>) -> Self {
        let pdf_path = pdf_path.into();
        let pdf_path = fs::canonicalize(&pdf_path).unwrap_or(pdf_path);
        Self {
            pdf_path,
            course_override: None,
            week_override: None,
            ceiling: None,
        }
    }

    /// Stop the folder scan below `root`: neither it nor its ancestors are
    /// read as course or week folders. Ignored when the reading lies outside it.
    pub fn with_ceiling(mut self, root: Option<PathBuf>) -> Self {
        self.ceiling = root.map(|root| fs::canonicalize(&root).unwrap_or(root));
        self
    }

    /// Use this course code verbatim instead of detecting one
    pub fn with_course(mut self, course: Option<String>) -> Self {
        self.course_override = course.filter(|c| !c.trim().is_empty());
        self
    }

    /// Use this week verbatim instead of detecting one
    pub fn with_week(mut self, week: Option<String>) -> Self {
        self.week_override = week.filter(|w| !w.trim().is_empty());
        self
    }

    /// Infer the reading's course context. Never fails; missing pieces stay `None`.
    pub fn detect(&self) -> CourseContext {
        let path = &self.pdf_path;
        tracing::info!(file = %path.display(), "Detecting course context");

        let mut course_code = self.course_override.clone();
        let mut course_name = self.course_override.clone();
        let mut week = self.week_override.clone();
        let mut module = None;
        let mut course_folder = None;

        if let Some(code) = &self.course_override {
            tracing::info!(course = %code, "Using manual course override");
        }
        if let Some(week) = &self.week_override {
            tracing::info!(week = %week, "Using manual week override");
        }

        for dir in self.scanned_ancestors() {
            let Some(name) = dir.file_name().map(|n| n.to_string_lossy()) else {
                continue;
            };

            if course_code.is_none() {
                if let Some(code) = match_course_code(&name) {
                    tracing::debug!(course = %code, folder = %dir.display(), "Detected course");
                    course_code = Some(code);
                    course_name = Some(name.to_string());
                    course_folder = Some(dir.to_path_buf());
                }
            }
            if week.is_none() {
                week = match_week(&name);
            }
            if module.is_none() {
                module = match_module(&name);
            }

            if course_code.is_some() && week.is_some() {
                break;
            }
        }

        if course_folder.is_none() {
            if let Some(code) = &course_code {
                course_folder = self.find_course_folder(code);
            }
        }
        let course_folder = course_folder.unwrap_or_else(|| self.fallback_folder());

        if course_code.is_none() {
            tracing::warn!("Could not detect course code from folder structure; use --course to set it");
        }
        if week.is_none() {
            tracing::warn!("Could not detect week from folder structure; use --week to set it");
        }

        let context = CourseContext {
            course_code,
            course_name,
            course_folder,
            week,
            module,
            other_readings: self.sibling_readings(),
        };

        tracing::info!(
            course = context.course_code.as_deref().unwrap_or("-"),
            week = context.week.as_deref().unwrap_or("-"),
            folder = %context.course_folder.display(),
            "Context detected"
        );
        context
    }

    /// Closest ancestor whose name contains the code, ignoring case
    fn find_course_folder(&self, code: &str) -> Option<PathBuf> {
        let code = code.to_uppercase();
        self.scanned_ancestors()
            .take(COURSE_FOLDER_SCAN_DEPTH)
            .find(|dir| {
                dir.file_name()
                    .is_some_and(|name| name.to_string_lossy().to_uppercase().contains(&code))
            })
            .map(Path::to_path_buf)
    }

    /// Directories above the reading, closest first, up to the ceiling
    fn scanned_ancestors(&self) -> impl Iterator<Item = &Path> {
        let ceiling = self
            .ceiling
            .as_deref()
            .filter(|root| self.pdf_path.starts_with(root));
        self.pdf_path
            .ancestors()
            .skip(1)
            .take_while(move |dir| ceiling.map_or(true, |root| dir.starts_with(root) && *dir != root))
    }

    fn fallback_folder(&self) -> PathBuf {
        let parent = self.pdf_path.parent();
        let folder = if self.pdf_path.components().count() >= 3 {
            parent.and_then(Path::parent)
        } else {
            parent
        };

        match folder {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Other PDFs next to the reading, as file stems
    fn sibling_readings(&self) -> Vec<String> {
        let dir = match self.pdf_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), "Failed to scan for sibling PDFs: {}", e);
                return Vec::new();
            }
        };

        let siblings: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_pdf(path))
            .filter(|path| path.file_name() != self.pdf_path.file_name())
            .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .collect();

        if !siblings.is_empty() {
            tracing::debug!(count = siblings.len(), "Found other readings in folder");
        }
        siblings
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// `"psych 101 - Fall"` → `"PSYCH101"`
fn match_course_code(segment: &str) -> Option<String> {
    let caps = COURSE_CODE.captures(segment)?;
    Some(format!("{}{}", &caps[1], &caps[2]).to_uppercase())
}

fn match_week(segment: &str) -> Option<String> {
    WEEK.captures(segment).map(|caps| caps[1].to_string())
}

/// `"unit_4"` → `"Unit 4"`
fn match_module(segment: &str) -> Option<String> {
    let caps = MODULE.captures(segment)?;
    let kind = caps[1].to_lowercase();
    let mut chars = kind.chars();
    let kind = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => kind,
    };
    Some(format!("{} {}", kind, &caps[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_code_patterns() {
        assert_eq!(match_course_code("PSYCH101").as_deref(), Some("PSYCH101"));
        assert_eq!(match_course_code("hist 2010 - Spring").as_deref(), Some("HIST2010"));
        assert_eq!(match_course_code("Intro_ANTH210").as_deref(), Some("ANTH210"));
        assert_eq!(match_course_code("Week3"), None);
        assert_eq!(match_course_code("Module12"), None);
        assert_eq!(match_course_code("readings"), None);
        assert_eq!(match_course_code("ABC12345"), None);
    }

    #[test]
    fn test_week_and_module_patterns() {
        assert_eq!(match_week("Week3").as_deref(), Some("3"));
        assert_eq!(match_week("week_12 readings").as_deref(), Some("12"));
        assert_eq!(match_week("weekly"), None);

        assert_eq!(match_module("unit_4").as_deref(), Some("Unit 4"));
        assert_eq!(match_module("MODULE-2").as_deref(), Some("Module 2"));
        assert_eq!(match_module("Section 10").as_deref(), Some("Section 10"));
        assert_eq!(match_module("modules"), None);
    }
}
