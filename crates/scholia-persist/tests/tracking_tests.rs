use chrono::NaiveDate;
use scholia_persist::{DocumentKind, Tracker, TrackingEntry, TrackingError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn entry(week: &str, title: &str, summary_path: PathBuf) -> TrackingEntry {
    TrackingEntry {
        week: week.to_string(),
        title: title.to_string(),
        author: "Victor Turner".to_string(),
        thesis: "Liminality is generative".to_string(),
        key_concepts: vec!["liminality".into(), "communitas".into()],
        summary_path,
        generated_on: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
    }
}

fn setup() -> (TempDir, PathBuf, PathBuf) {
    let root = TempDir::new().unwrap();
    let course = root.path().join("RELG210");
    fs::create_dir_all(&course).unwrap();
    let global = root.path().join("home/.scholia/_global_master.md");
    (root, course, global)
}

fn count_lines(text: &str, line: &str) -> usize {
    text.lines().filter(|l| *l == line).count()
}

#[test]
fn test_first_update_creates_both_documents() {
    let (_root, course, global) = setup();
    let tracker = Tracker::new("RELG210", &course, &global);

    let report = tracker
        .update(&entry("3", "The Ritual Process", course.join("Week3/turner_summary.md")))
        .unwrap();

    assert_eq!(report.course_readings, 1);
    assert_eq!(report.total_courses, 1);
    assert_eq!(report.total_readings, 1);
    assert_eq!(report.course_document, course.join("RELG210_master.md"));

    let course_doc = fs::read_to_string(course.join("RELG210_master.md")).unwrap();
    assert_eq!(
        course_doc,
        "# RELG210 - Course Learning History\n\
         \n\
         *This file tracks all readings for RELG210*\n\
         \n\
         ### Week 3: The Ritual Process\n\
         - **Author**: Victor Turner\n\
         - **Core Thesis**: Liminality is generative\n\
         - **Key Concepts**: liminality, communitas\n\
         - **Link**: [The Ritual Process](Week3/turner_summary.md)\n\
         - **Date Generated**: 2026-10-19\n\
         \n\
         ---\n\
         *Last Updated*: 2026-10-19\n\
         *Total Readings*: 1\n"
    );

    let global_doc = fs::read_to_string(&global).unwrap();
    assert!(global_doc.starts_with("# Academic Reading Master Index\n"));
    assert!(global_doc.contains(&format!(
        "## RELG210\n- Week 3: [The Ritual Process]({}) - Victor Turner\n",
        course.join("Week3/turner_summary.md").display()
    )));
    assert!(global_doc.ends_with("*Total Courses*: 1\n*Total Readings*: 1\n"));
}

#[test]
fn test_repeated_updates_keep_one_course_section() {
    let (_root, course, global) = setup();
    let tracker = Tracker::new("RELG210", &course, &global);

    for week in 1..=3 {
        tracker
            .update(&entry(&week.to_string(), "Reading", course.join(format!("w{week}_summary.md"))))
            .unwrap();
    }

    let global_doc = fs::read_to_string(&global).unwrap();
    assert_eq!(count_lines(&global_doc, "## RELG210"), 1);
    assert_eq!(count_lines(&global_doc, "---"), 1);
    assert!(global_doc.contains("*Total Readings*: 3"));

    let course_doc = fs::read_to_string(course.join("RELG210_master.md")).unwrap();
    assert_eq!(count_lines(&course_doc, "---"), 1);
    assert!(course_doc.contains("*Total Readings*: 3"));

    let weeks: Vec<&str> = course_doc.lines().filter(|l| l.starts_with("### Week")).collect();
    assert_eq!(weeks, vec!["### Week 1: Reading", "### Week 2: Reading", "### Week 3: Reading"]);
}

#[test]
fn test_second_course_gets_its_own_section() {
    let (root, course, global) = setup();
    Tracker::new("RELG210", &course, &global)
        .update(&entry("1", "A", course.join("a_summary.md")))
        .unwrap();

    let other = root.path().join("PSYCH101");
    let report = Tracker::new("PSYCH101", &other, &global)
        .update(&entry("1", "B", other.join("b_summary.md")))
        .unwrap();
    Tracker::new("RELG210", &course, &global)
        .update(&entry("2", "C", course.join("c_summary.md")))
        .unwrap();

    assert_eq!(report.total_courses, 2);
    let global_doc = fs::read_to_string(&global).unwrap();
    let relevant: Vec<&str> = global_doc
        .lines()
        .filter(|l| l.starts_with("## ") || l.starts_with("- Week"))
        .map(|l| l.split(':').next().unwrap_or(l))
        .collect();
    assert_eq!(relevant, vec!["## RELG210", "- Week 1", "- Week 2", "## PSYCH101", "- Week 1"]);
    assert!(global_doc.contains("*Total Courses*: 2\n*Total Readings*: 3\n"));
}

#[test]
fn test_footer_recounts_after_manual_deletion() {
    let (_root, course, global) = setup();
    let tracker = Tracker::new("RELG210", &course, &global);
    for week in 1..=3 {
        tracker
            .update(&entry(&week.to_string(), "Reading", course.join(format!("w{week}_summary.md"))))
            .unwrap();
    }

    // Delete the week 2 block by hand; the stale footer still says 3
    let path = course.join("RELG210_master.md");
    let text = fs::read_to_string(&path).unwrap();
    let start = text.find("### Week 2").unwrap();
    let end = text.find("### Week 3").unwrap();
    fs::write(&path, format!("{}{}", &text[..start], &text[end..])).unwrap();
    assert!(fs::read_to_string(&path).unwrap().contains("*Total Readings*: 3"));

    let report = tracker
        .update(&entry("4", "Reading", course.join("w4_summary.md")))
        .unwrap();

    assert_eq!(report.course_readings, 3);
    assert!(fs::read_to_string(&path).unwrap().contains("*Total Readings*: 3"));
}

#[test]
fn test_missing_footer_is_restored() {
    let (_root, course, global) = setup();
    let path = course.join("RELG210_master.md");
    fs::write(&path, "# RELG210 notes\n\n### Week 1: Old entry\n- **Author**: X\n").unwrap();

    Tracker::new("RELG210", &course, &global)
        .update(&entry("2", "New", course.join("n_summary.md")))
        .unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("# RELG210 notes\n\n### Week 1: Old entry\n"));
    assert!(text.ends_with("---\n*Last Updated*: 2026-10-19\n*Total Readings*: 2\n"));
}

#[test]
fn test_link_outside_course_folder_uses_file_name() {
    let (root, course, global) = setup();
    let elsewhere = root.path().join("exports/turner_summary.md");

    Tracker::new("RELG210", &course, &global)
        .update(&entry("3", "T", elsewhere))
        .unwrap();

    let text = fs::read_to_string(course.join("RELG210_master.md")).unwrap();
    assert!(text.contains("- **Link**: [T](turner_summary.md)"));
}

#[test]
fn test_empty_thesis_and_concepts_use_placeholders() {
    let (_root, course, global) = setup();
    let mut bare = entry("3", "T", course.join("t_summary.md"));
    bare.thesis.clear();
    bare.key_concepts.clear();

    Tracker::new("RELG210", &course, &global).update(&bare).unwrap();

    let text = fs::read_to_string(course.join("RELG210_master.md")).unwrap();
    assert!(text.contains("- **Core Thesis**: See full summary"));
    assert!(text.contains("- **Key Concepts**: None extracted"));
}

#[test]
fn test_unreadable_global_document_is_reported() {
    let (root, course, _global) = setup();
    let global: &Path = root.path();

    let err = Tracker::new("RELG210", &course, global)
        .update(&entry("3", "T", course.join("t_summary.md")))
        .unwrap_err();

    assert!(matches!(err, TrackingError::Read { .. }));
    assert_eq!(err.kind(), DocumentKind::Global);
    assert!(course.join("RELG210_master.md").exists());
}

#[test]
fn test_multiline_title_stays_on_one_line() {
    let (_root, course, global) = setup();
    let tracker = Tracker::new("RELG210", &course, &global);
    let mut reading = entry(
        "3",
        "The Ritual\nProcess:  Structure\r\nand Anti-Structure",
        course.join("turner_summary.md"),
    );
    reading.author = "Victor\nTurner".to_string();

    let report = tracker.update(&reading).unwrap();
    assert_eq!(report.course_readings, 1);
    assert_eq!(report.total_readings, 1);

    let course_doc = fs::read_to_string(course.join("RELG210_master.md")).unwrap();
    assert_eq!(
        count_lines(&course_doc, "### Week 3: The Ritual Process: Structure and Anti-Structure"),
        1
    );
    assert_eq!(count_lines(&course_doc, "- **Author**: Victor Turner"), 1);

    let global_doc = fs::read_to_string(&global).unwrap();
    assert!(global_doc.contains(&format!(
        "- Week 3: [The Ritual Process: Structure and Anti-Structure]({}) - Victor Turner\n",
        course.join("turner_summary.md").display()
    )));
}
