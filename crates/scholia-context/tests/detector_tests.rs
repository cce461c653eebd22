use scholia_context::ContextDetector;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn touch(root: &Path, relative: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, b"%PDF-1.4").unwrap();
    path
}

fn canonical(path: PathBuf) -> PathBuf {
    fs::canonicalize(path).unwrap()
}

#[test]
fn test_course_and_week_from_folders() {
    let root = TempDir::new().unwrap();
    let pdf = touch(root.path(), "PSYCH101/Week3/article.pdf");

    let ctx = ContextDetector::new(&pdf).detect();

    assert_eq!(ctx.course_code.as_deref(), Some("PSYCH101"));
    assert_eq!(ctx.course_name.as_deref(), Some("PSYCH101"));
    assert_eq!(ctx.week.as_deref(), Some("3"));
    assert_eq!(ctx.course_folder, canonical(root.path().join("PSYCH101")));
    assert!(ctx.other_readings.is_empty());
}

#[test]
fn test_course_found_through_intermediate_folders() {
    let root = TempDir::new().unwrap();
    let pdf = touch(root.path(), "anth 210 Ritual/readings/part-a/misc/week_5/file.pdf");

    let ctx = ContextDetector::new(&pdf).detect();

    assert_eq!(ctx.course_code.as_deref(), Some("ANTH210"));
    assert_eq!(ctx.course_name.as_deref(), Some("anth 210 Ritual"));
    assert_eq!(ctx.week.as_deref(), Some("5"));
    assert_eq!(ctx.course_folder, canonical(root.path().join("anth 210 Ritual")));
}

#[test]
fn test_closest_week_wins() {
    let root = TempDir::new().unwrap();
    let pdf = touch(root.path(), "Week1/Week2/file.pdf");

    let ctx = ContextDetector::new(&pdf).detect();
    assert_eq!(ctx.week.as_deref(), Some("2"));
}

#[test]
fn test_nothing_recognisable() {
    let root = TempDir::new().unwrap();
    let pdf = touch(root.path(), "stuff/misc/file.pdf");

    let ctx = ContextDetector::new(&pdf)
        .with_ceiling(Some(root.path().to_path_buf()))
        .detect();

    assert_eq!(ctx.course_code, None);
    assert_eq!(ctx.week, None);
    assert_eq!(ctx.module, None);
    assert_eq!(ctx.course_folder, canonical(root.path().join("stuff")));
}

#[test]
fn test_module_detected_on_the_way_up() {
    let root = TempDir::new().unwrap();
    let pdf = touch(root.path(), "PSYCH101/Unit 2/Week4/file.pdf");

    let ctx = ContextDetector::new(&pdf).detect();

    assert_eq!(ctx.week.as_deref(), Some("4"));
    assert_eq!(ctx.module.as_deref(), Some("Unit 2"));
    assert_eq!(ctx.week_label(), "Week 4 - Unit 2");
}

#[test]
fn test_overrides_and_secondary_folder_scan() {
    let root = TempDir::new().unwrap();
    let pdf = touch(root.path(), "intro-soc300-fall/wk/file.pdf");

    let ctx = ContextDetector::new(&pdf)
        .with_course(Some("SOC300".into()))
        .with_week(Some("7b".into()))
        .detect();

    assert_eq!(ctx.course_code.as_deref(), Some("SOC300"));
    assert_eq!(ctx.week.as_deref(), Some("7b"));
    assert_eq!(ctx.course_folder, canonical(root.path().join("intro-soc300-fall")));
}

#[test]
fn test_override_only_short_circuits_its_own_slot() {
    let root = TempDir::new().unwrap();
    let pdf = touch(root.path(), "HIST2010/Week9/file.pdf");

    let ctx = ContextDetector::new(&pdf).with_week(Some("10".into())).detect();

    assert_eq!(ctx.course_code.as_deref(), Some("HIST2010"));
    assert_eq!(ctx.week.as_deref(), Some("10"));
}

#[test]
fn test_blank_override_is_ignored() {
    let root = TempDir::new().unwrap();
    let pdf = touch(root.path(), "HIST2010/Week9/file.pdf");

    let ctx = ContextDetector::new(&pdf).with_course(Some("  ".into())).detect();
    assert_eq!(ctx.course_code.as_deref(), Some("HIST2010"));
}

#[test]
fn test_sibling_readings() {
    let root = TempDir::new().unwrap();
    let pdf = touch(root.path(), "PSYCH101/Week3/article.pdf");
    touch(root.path(), "PSYCH101/Week3/douglas.pdf");
    touch(root.path(), "PSYCH101/Week3/turner.PDF");
    touch(root.path(), "PSYCH101/Week3/notes.txt");
    touch(root.path(), "PSYCH101/Week3/nested/hidden.pdf");

    let ctx = ContextDetector::new(&pdf).detect();

    let mut siblings = ctx.other_readings.clone();
    siblings.sort();
    assert_eq!(siblings, vec!["douglas", "turner"]);
}

#[test]
fn test_ceiling_stops_the_scan() {
    let root = TempDir::new().unwrap();
    let pdf = touch(root.path(), "RELG210/Week2/archive/misc/file.pdf");

    let ctx = ContextDetector::new(&pdf)
        .with_ceiling(Some(root.path().join("RELG210/Week2")))
        .detect();

    assert_eq!(ctx.course_code, None);
    assert_eq!(ctx.week, None);
}

#[test]
fn test_ceiling_keeps_folders_below_it() {
    let root = TempDir::new().unwrap();
    let pdf = touch(root.path(), "RELG210/Week2/file.pdf");

    let ctx = ContextDetector::new(&pdf)
        .with_ceiling(Some(root.path().to_path_buf()))
        .detect();

    assert_eq!(ctx.course_code.as_deref(), Some("RELG210"));
    assert_eq!(ctx.week.as_deref(), Some("2"));
}

#[test]
fn test_ceiling_outside_the_reading_is_ignored() {
    let root = TempDir::new().unwrap();
    let pdf = touch(root.path(), "RELG210/Week2/file.pdf");
    let elsewhere = root.path().join("elsewhere");
    fs::create_dir_all(&elsewhere).unwrap();

    let ctx = ContextDetector::new(&pdf).with_ceiling(Some(elsewhere)).detect();

    assert_eq!(ctx.course_code.as_deref(), Some("RELG210"));
}
