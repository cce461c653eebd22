use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where a reading sits inside a course, as inferred from its path.
///
/// `course_folder` is always resolved to some directory even when no course
/// code or week could be detected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseContext {
    pub course_code: Option<String>,
    pub course_name: Option<String>,
    pub course_folder: PathBuf,
    pub week: Option<String>,
    pub module: Option<String>,
    pub other_readings: Vec<String>,
}

impl CourseContext {
    pub fn new(course_folder: impl Into<PathBuf>) -> Self {
        Self {
            course_code: None,
            course_name: None,
            course_folder: course_folder.into(),
            week: None,
            module: None,
            other_readings: Vec::new(),
        }
    }

    /// "Week 3" / "Week 3 - Module 2" / "Week ?"
    pub fn week_label(&self) -> String {
        let week = self.week.as_deref().unwrap_or("?");
        match &self.module {
            Some(module) => format!("Week {} - {}", week, module),
            None => format!("Week {}", week),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_label() {
        let mut ctx = CourseContext::new("/courses/PSYCH101");
        assert_eq!(ctx.week_label(), "Week ?");

        ctx.week = Some("3".into());
        assert_eq!(ctx.week_label(), "Week 3");

        ctx.module = Some("Module 2".into());
        assert_eq!(ctx.week_label(), "Week 3 - Module 2");
    }
}
