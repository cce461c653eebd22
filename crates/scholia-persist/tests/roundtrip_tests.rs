use scholia_context::parse_summary;
use scholia_persist::{default_output_path, SummaryDocument};
use scholia_types::{FrontMatter, SCHEMA_VERSION, SECTIONS};
use tempfile::TempDir;

fn generated_body() -> String {
    format!(
        "{}\n- **Course**: RELG210\n\n{}\n- **Central Argument**: Ritual *produces* the social body it claims to express.\n- **Key Terms**:\n  - ritualization: strategic mode of practice\n  - redemptive hegemony: lived sense of order\n- **Framework/Method**: Practice theory\n\n{}\n- **Counter-Positions**: Durkheim\n\n{}\n- **Building on Previous Weeks**: Turner\n\n{}\n1. Why?\n",
        SECTIONS[0].heading(),
        SECTIONS[1].heading(),
        SECTIONS[2].heading(),
        SECTIONS[3].heading(),
        SECTIONS[4].heading()
    )
}

#[test]
fn test_written_summary_parses_back() {
    let dir = TempDir::new().unwrap();
    let output = default_output_path(&dir.path().join("Week4/bell_ritual.pdf"));

    let front_matter = FrontMatter {
        schema_version: SCHEMA_VERSION,
        week: "4".into(),
        title: "Ritual Theory: Ritual Practice".into(),
        author: "Catherine Bell".into(),
        course: "RELG210".into(),
        date: "2026-10-19".into(),
        previous_summaries: 3,
    };
    let doc = SummaryDocument::new(front_matter, &format!("```markdown\n{}```", generated_body())).unwrap();
    let written = doc.write(&output).unwrap();
    assert!(written.ends_with("Week4/bell_ritual_summary.md"));

    let record = parse_summary(&written).unwrap();

    assert_eq!(record.week, "4");
    assert_eq!(record.title, "Ritual Theory: Ritual Practice");
    assert_eq!(record.author, "Catherine Bell");
    assert_eq!(record.thesis, "Ritual produces the social body it claims to express.");
    assert_eq!(record.key_concepts, vec!["ritualization", "redemptive hegemony"]);
}

#[test]
fn test_invalid_body_is_rejected() {
    let front_matter = FrontMatter::default();
    let err = SummaryDocument::new(front_matter, "## I. Syllabus Contextualization\nonly one").unwrap_err();
    assert_eq!(err.missing_sections.len(), 4);
}
