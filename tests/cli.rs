use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

const FIXTURE: &str = "\
Age Group,Occupation,Attention Rating,Distraction Rating,Screen TIme,Platforms used,Cleaned Strategies,Strategy Affectiveness,Tech Relationship
18-24,Student,5,1,Less than 3 hours,\"Instagram, YouTube\",\"Exercise, Meditation\",4,love it
18-24,Student,3,3,3–5 hours,Instagram,Exercise,3,complicated
25-34,Working Profesional,2,4,9+ hours,Reddit,Meditation,5,draining
";

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("dfd").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("dfd"));
}

#[test]
fn report_prints_kpis_and_insights() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("survey.csv");
    std::fs::write(&data, FIXTURE).unwrap();

    let mut cmd = Command::cargo_bin("dfd").unwrap();
    cmd.args(["report", "--data"]).arg(&data);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Respondents: 3 of 3"))
        .stdout(predicate::str::contains("Most common screen time:"))
        .stdout(predicate::str::contains("Most popular platform: Instagram (2 users)"));
}

#[test]
fn report_respects_filters_and_writes_outputs() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("survey.csv");
    std::fs::write(&data, FIXTURE).unwrap();
    let out = dir.path().join("report.json");
    let tables = dir.path().join("tables");
    let plots = dir.path().join("plots");

    let mut cmd = Command::cargo_bin("dfd").unwrap();
    cmd.args(["report", "--data"])
        .arg(&data)
        .args(["--ages", "18-24", "--occupations", "Student", "--stats"])
        .arg("--out")
        .arg(&out)
        .arg("--tables")
        .arg(&tables)
        .arg("--plot-dir")
        .arg(&plots);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Respondents: 2 of 3"))
        .stdout(predicate::str::contains("High average attention rating: 4.0/5."));

    assert!(out.exists());
    assert!(tables.join("platforms.csv").exists());
    assert!(tables.join("strategies.csv").exists());
    assert!(plots.join("platforms.svg").exists());
}

#[test]
fn missing_data_file_halts_with_an_error() {
    let mut cmd = Command::cargo_bin("dfd").unwrap();
    cmd.args(["report", "--data", "no-such-file.csv"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn empty_selection_prompts_instead_of_aggregating() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("survey.csv");
    std::fs::write(&data, FIXTURE).unwrap();

    let mut cmd = Command::cargo_bin("dfd").unwrap();
    cmd.args(["report", "--data"])
        .arg(&data)
        .args(["--ages", ""]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("at least one age group"));
}
