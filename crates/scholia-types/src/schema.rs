//! Layout of a generated summary document.
//!
//! Summaries are produced by one run and read back by later runs, so the
//! prompt template, the output validator and the history parser all work from
//! the definitions in this module. Any change to the section layout goes here
//! and bumps [`SCHEMA_VERSION`].

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

pub const SCHEMA_VERSION: u32 = 1;

pub const CENTRAL_ARGUMENT: &str = "Central Argument";
pub const KEY_TERMS: &str = "Key Terms";

/// One numbered `##` section and the labelled fields it carries, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpec {
    pub numeral: &'static str,
    pub title: &'static str,
    pub reading_time: &'static str,
    pub fields: &'static [&'static str],
}

pub const SECTIONS: [SectionSpec; 5] = [
    SectionSpec {
        numeral: "I",
        title: "Syllabus Contextualization",
        reading_time: "1-2 min read",
        fields: &[
            "Course",
            "Week/Module",
            "Theme",
            "Paired Readings",
            "Course Objective",
            "Discussion Questions",
        ],
    },
    SectionSpec {
        numeral: "II",
        title: "Core Thesis & Architecture",
        reading_time: "3-4 min read",
        fields: &[
            CENTRAL_ARGUMENT,
            KEY_TERMS,
            "Framework/Method",
            "Evidence Base",
            "Critical Quotes",
        ],
    },
    SectionSpec {
        numeral: "III",
        title: "Critical Tensions",
        reading_time: "2 min read",
        fields: &[
            "Internal Contradictions",
            "Counter-Positions",
            "Assumptions Under Scrutiny",
            "Unresolved Questions",
            "Most Contested Claim",
        ],
    },
    // Fields depend on whether earlier weeks are available
    SectionSpec {
        numeral: "IV",
        title: "Cross-Reading Synthesis",
        reading_time: "3-4 min read",
        fields: &[],
    },
    SectionSpec {
        numeral: "V",
        title: "Critical Questions",
        reading_time: "1-2 min read",
        fields: &[],
    },
];

/// Section II, home of the thesis and key terms
pub fn thesis_section() -> &'static SectionSpec {
    &SECTIONS[1]
}

impl SectionSpec {
    /// `## II. Core Thesis & Architecture (3-4 min read)`
    pub fn heading(&self) -> String {
        format!("## {}. {} ({})", self.numeral, self.title, self.reading_time)
    }

    /// `II. Core Thesis & Architecture`
    pub fn label(&self) -> String {
        format!("{}. {}", self.numeral, self.title)
    }

    /// Whether `line` is this section's heading.
    ///
    /// Matches on the numeral and the first two words of the title, ignoring
    /// case, so "## ii. core thesis and architecture" still counts.
    pub fn matches_heading(&self, line: &str) -> bool {
        let Some(rest) = line.trim_start().strip_prefix("##") else {
            return false;
        };
        if rest.starts_with('#') {
            return false;
        }
        let rest = rest.trim_start();
        match rest.get(..self.numeral.len()) {
            Some(numeral) if numeral.eq_ignore_ascii_case(self.numeral) => {}
            _ => return false,
        }
        let Some(rest) = rest[self.numeral.len()..].strip_prefix('.') else {
            return false;
        };

        let found = rest.split_whitespace().map(str::to_lowercase);
        let expected = self.title.split_whitespace().take(2).map(str::to_lowercase);
        let mut found = found.take(2);
        for word in expected {
            if found.next().as_deref() != Some(word.as_str()) {
                return false;
            }
        }
        true
    }

    /// Text between this section's heading and the next `##` heading.
    pub fn body<'a>(&self, document: &'a str) -> Option<&'a str> {
        let mut offset = 0;
        let mut start = None;

        for line in document.split_inclusive('\n') {
            match start {
                None if self.matches_heading(line) => start = Some(offset + line.len()),
                Some(begin) if is_level_two_heading(line) => return Some(&document[begin..offset]),
                _ => {}
            }
            offset += line.len();
        }

        start.map(|begin| &document[begin..])
    }
}

fn is_level_two_heading(line: &str) -> bool {
    line.trim_start()
        .strip_prefix("##")
        .is_some_and(|rest| !rest.starts_with('#'))
}

/// `- **Label**: value`
pub fn field_line(label: &str, value: &str) -> String {
    format!("- **{}**: {}", label, value)
}

/// Value of a labelled bullet (`- **Label**: value`), if `line` is one.
///
/// Tolerates `*` bullets, the colon inside or outside the emphasis and any
/// letter case in the label.
pub fn field_value<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let rest = line.trim_start();
    let rest = rest.strip_prefix('-').or_else(|| rest.strip_prefix('*'))?;
    let rest = rest.trim_start().trim_start_matches(['*', '_']);

    let head = rest.get(..label.len())?;
    if !head.eq_ignore_ascii_case(label) {
        return None;
    }
    let rest = &rest[label.len()..];
    if rest.chars().next().is_some_and(char::is_alphanumeric) {
        return None;
    }

    Some(rest.trim_start_matches(['*', '_', ':']).trim())
}

/// Metadata block written at the top of every summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontMatter {
    pub schema_version: u32,
    pub week: String,
    pub title: String,
    pub author: String,
    pub course: String,
    pub date: String,
    pub previous_summaries: usize,
}

impl FrontMatter {
    pub fn render(&self) -> Result<String, serde_yaml::Error> {
        Ok(format!("---\n{}---\n", serde_yaml::to_string(self)?))
    }
}

/// Split a document into its front matter (without delimiters) and the rest.
pub fn split_front_matter(document: &str) -> Option<(&str, &str)> {
    let mut lines = document.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != "---" {
        return None;
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == "---" {
            return Some((&document[start..offset], &document[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Parse the front matter into a key/value mapping.
///
/// A document without front matter yields an empty mapping; malformed YAML
/// is returned as an error so the caller can decide how loudly to complain.
pub fn parse_front_matter(document: &str) -> Result<Mapping, serde_yaml::Error> {
    let Some((yaml, _)) = split_front_matter(document) else {
        return Ok(Mapping::new());
    };

    match serde_yaml::from_str::<Value>(yaml)? {
        Value::Mapping(map) => Ok(map),
        _ => Ok(Mapping::new()),
    }
}

/// A scalar front-matter value rendered as text (`week: 3` → `"3"`).
pub fn scalar(map: &Mapping, key: &str) -> Option<String> {
    let text = match map.get(key)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_matching() {
        let section = thesis_section();
        assert!(section.matches_heading("## II. Core Thesis & Architecture (3-4 min read)"));
        assert!(section.matches_heading("##  ii. core thesis and architecture"));
        assert!(!section.matches_heading("### II. Core Thesis"));
        assert!(!section.matches_heading("## III. Critical Tensions"));
        assert!(!SECTIONS[0].matches_heading("## II. Core Thesis"));
        assert!(!SECTIONS[0].matches_heading("## IV. Cross-Reading Synthesis"));
    }

    #[test]
    fn test_section_body_stops_at_next_section() {
        let doc = "## I. Syllabus Contextualization\nintro\n## II. Core Thesis & Architecture\n- **Central Argument**: x\n### detail\nmore\n## III. Critical Tensions\nother\n";
        let body = thesis_section().body(doc).unwrap();
        assert_eq!(body, "- **Central Argument**: x\n### detail\nmore\n");
        assert_eq!(SECTIONS[2].body(doc).unwrap(), "other\n");
        assert!(SECTIONS[4].body(doc).is_none());
    }

    #[test]
    fn test_field_value_variants() {
        assert_eq!(field_value("- **Central Argument**: Rituals bind", CENTRAL_ARGUMENT), Some("Rituals bind"));
        assert_eq!(field_value("* **Central argument:** Rituals bind", CENTRAL_ARGUMENT), Some("Rituals bind"));
        assert_eq!(field_value("  - Central Argument: plain", CENTRAL_ARGUMENT), Some("plain"));
        assert_eq!(field_value("- **Key Terms**:", KEY_TERMS), Some(""));
        assert_eq!(field_value("- **Key Termsheet**: no", KEY_TERMS), None);
        assert_eq!(field_value("Central Argument: no bullet", CENTRAL_ARGUMENT), None);
    }

    #[test]
    fn test_front_matter_round_trip() {
        let fm = FrontMatter {
            schema_version: SCHEMA_VERSION,
            week: "3".into(),
            title: "Ritual: A Reader's \"Guide\"".into(),
            author: "Catherine Bell".into(),
            course: "RELG210".into(),
            date: "2026-10-19".into(),
            previous_summaries: 2,
        };
        let rendered = fm.render().unwrap();
        assert!(rendered.starts_with("---\n"));

        let doc = format!("{}\n# body\n", rendered);
        let map = parse_front_matter(&doc).unwrap();
        assert_eq!(scalar(&map, "week").as_deref(), Some("3"));
        assert_eq!(scalar(&map, "title").as_deref(), Some("Ritual: A Reader's \"Guide\""));
        assert_eq!(scalar(&map, "previous_summaries").as_deref(), Some("2"));
    }

    #[test]
    fn test_front_matter_tolerance() {
        let map = parse_front_matter("---\nweek: 4\n---\nbody").unwrap();
        assert_eq!(scalar(&map, "week").as_deref(), Some("4"));

        assert!(parse_front_matter("no front matter").unwrap().is_empty());
        assert!(parse_front_matter("---\nweek: [unclosed\n---\n").is_err());
        assert!(parse_front_matter("---\njust a string\n---\n").unwrap().is_empty());
    }
}
