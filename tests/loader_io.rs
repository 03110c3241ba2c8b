use dfd_rs::loader::{self, LoadError};
use std::fs;
use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;
use tempfile::tempdir;

const HEADER: &str = "Age Group,Occupation,Attention Rating,Distraction Rating,Screen TIme,\
Platforms used,Cleaned Strategies,Strategy Affectiveness,Tech Relationship";

fn fixture(rows: &[&str]) -> String {
    let mut s = String::from(HEADER);
    for row in rows {
        s.push('\n');
        s.push_str(row);
    }
    s
}

#[test]
fn load_trims_headers_and_canonicalizes_occupations() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("survey.csv");
    // Surrounding whitespace in header names must be stripped.
    let header = " Age Group , Occupation ,Attention Rating,Distraction Rating, Screen TIme ,\
Platforms used,Cleaned Strategies,Strategy Affectiveness,Tech Relationship";
    let body = format!(
        "{header}\n\
18-24,Working Profesional,4,2,Less than 3 hours,\"Instagram, YouTube\",\"Exercise, Meditation\",4,I feel fine\n\
25-34,\"Working Profesional, Freelancer / Self-Employed\",3,3,3–5 hours,Twitter,Na,2,stressful\n\
25-34,\"Student, Freelancer / Self-Employed\",2,4,9+ hours,Reddit,Exercise,3,addictive"
    );
    fs::write(&path, body).unwrap();

    let records = loader::load(&path).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].occupation, "Working Professional");
    assert_eq!(records[1].occupation, "Hybrid Professional");
    assert_eq!(records[2].occupation, "Student & Freelancer");
    assert_eq!(records[0].attention_rating, Some(4.0));
    assert_eq!(records[0].platforms_used, "Instagram, YouTube");
}

#[test]
fn missing_file_is_a_distinguished_error() {
    let err = loader::load("definitely/not/here.csv").unwrap_err();
    assert!(matches!(err, LoadError::NotFound(_)));
    let err = loader::load_cached("definitely/not/here.csv").unwrap_err();
    assert!(matches!(err, LoadError::NotFound(_)));
}

#[test]
fn missing_required_column_is_reported_by_name() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("survey.csv");
    fs::write(
        &path,
        "Age Group,Occupation,Attention Rating,Distraction Rating\n18-24,Student,4,2",
    )
    .unwrap();
    match loader::load(&path).unwrap_err() {
        LoadError::MissingColumn(col) => assert_eq!(col, "Screen TIme"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_rows_are_skipped_not_fatal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("survey.csv");
    let body = fixture(&[
        "18-24,Student,not-a-number,2,Less than 3 hours,Instagram,Exercise,4,fine",
        "25-34,Student,4,2,6–8 hours,YouTube,Meditation,5,good",
    ]);
    fs::write(&path, body).unwrap();

    let records = loader::load(&path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].age_group, "25-34");
}

#[test]
fn rows_without_filter_dimensions_are_dropped() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("survey.csv");
    let body = fixture(&[
        ",Student,4,2,Less than 3 hours,Instagram,Exercise,4,fine",
        "25-34,,4,2,6–8 hours,YouTube,Meditation,5,good",
        "25-34,Student,4,2,6–8 hours,YouTube,Meditation,5,good",
    ]);
    fs::write(&path, body).unwrap();

    let records = loader::load(&path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].occupation, "Student");
}

#[test]
fn optional_columns_are_none_when_absent_and_read_when_present() {
    let dir = tempdir().unwrap();
    let without = dir.path().join("without.csv");
    fs::write(
        &without,
        fixture(&["18-24,Student,4,2,Less than 3 hours,Instagram,Exercise,4,fine"]),
    )
    .unwrap();
    let records = loader::load(&without).unwrap();
    assert_eq!(records[0].focus_duration, None);
    assert_eq!(records[0].digital_guilt, None);
    assert_eq!(records[0].emotional_impact, None);

    let with = dir.path().join("with.csv");
    fs::write(
        &with,
        format!(
            "{HEADER},Focus Duration,Digital Guilt,Emotional Impact\n\
18-24,Student,4,2,Less than 3 hours,Instagram,Exercise,4,fine,30 minutes,Sometimes,Anxiety"
        ),
    )
    .unwrap();
    let records = loader::load(&with).unwrap();
    assert_eq!(records[0].focus_duration.as_deref(), Some("30 minutes"));
    assert_eq!(records[0].digital_guilt.as_deref(), Some("Sometimes"));
    assert_eq!(records[0].emotional_impact.as_deref(), Some("Anxiety"));
}

#[test]
fn cache_returns_the_same_dataset_for_an_unchanged_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("survey.csv");
    fs::write(
        &path,
        fixture(&["18-24,Student,4,2,Less than 3 hours,Instagram,Exercise,4,fine"]),
    )
    .unwrap();

    let first = loader::load_cached(&path).unwrap();
    let second = loader::load_cached(&path).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn cache_reloads_after_the_file_changes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("survey.csv");
    fs::write(
        &path,
        fixture(&["18-24,Student,4,2,Less than 3 hours,Instagram,Exercise,4,fine"]),
    )
    .unwrap();
    assert_eq!(loader::load_cached(&path).unwrap().len(), 1);

    // Ensure a distinct mtime before rewriting.
    sleep(Duration::from_millis(50));
    fs::write(
        &path,
        fixture(&[
            "18-24,Student,4,2,Less than 3 hours,Instagram,Exercise,4,fine",
            "25-34,Student,3,3,6–8 hours,YouTube,Meditation,5,good",
        ]),
    )
    .unwrap();
    assert_eq!(loader::load_cached(&path).unwrap().len(), 2);
}
