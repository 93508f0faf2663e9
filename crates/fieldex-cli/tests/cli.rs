//! End-to-end tests for the fieldex binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

const PERSON_PROFILE: &str = r#"{
    "name": "person",
    "separator": "\n",
    "patterns": [
        {"labels": ["name"], "value_key": "name", "value_type": "string"},
        {
            "labels": ["age"],
            "value_key": "age",
            "value_type": "int",
            "value_transform": {"match_method": 1, "replaces": {"years": ""}}
        },
        {
            "labels": ["my fun"],
            "value_key": "fun",
            "value_type": "array",
            "value_transform": {"separators": [",", "and"]}
        }
    ]
}"#;

const DUPLICATE_KEY_PROFILE: &str = r#"{
    "name": "broken",
    "patterns": [
        {"labels": ["name"], "value_key": "name", "value_type": "string"},
        {"labels": ["nickname"], "value_key": "NAME", "value_type": "string"}
    ]
}"#;

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn parse_emits_json_mapping() {
    let dir = tempfile::tempdir().unwrap();
    let profile = write_file(&dir, "profile.json", PERSON_PROFILE);
    let input = write_file(
        &dir,
        "input.txt",
        "name:John\nage: 12 years\nmy fun:Basketball,Football and Swimming",
    );

    let mut cmd = Command::cargo_bin("fieldex").unwrap();
    cmd.args([
        "parse",
        input.to_str().unwrap(),
        "--profile",
        profile.to_str().unwrap(),
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""name": "John""#))
        .stdout(predicate::str::contains(r#""age": 12"#))
        .stdout(predicate::str::contains("Basketball"));
}

#[test]
fn parse_reads_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let profile = write_file(&dir, "profile.json", PERSON_PROFILE);

    let mut cmd = Command::cargo_bin("fieldex").unwrap();
    cmd.args(["parse", "--profile", profile.to_str().unwrap()]);
    cmd.write_stdin("name: Ada");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""name": "Ada""#));
}

#[test]
fn parse_reports_cast_diagnostics_without_failing() {
    let dir = tempfile::tempdir().unwrap();
    let profile = write_file(&dir, "profile.json", PERSON_PROFILE);
    let input = write_file(&dir, "input.txt", "age: twelve");

    let mut cmd = Command::cargo_bin("fieldex").unwrap();
    cmd.args([
        "parse",
        input.to_str().unwrap(),
        "--profile",
        profile.to_str().unwrap(),
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""age": 0"#))
        .stderr(predicate::str::contains("cannot cast"));
}

#[test]
fn parse_writes_text_format_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let profile = write_file(&dir, "profile.json", PERSON_PROFILE);
    let input = write_file(&dir, "input.txt", "name: Ada");
    let output = dir.path().join("out.txt");

    let mut cmd = Command::cargo_bin("fieldex").unwrap();
    cmd.args([
        "parse",
        input.to_str().unwrap(),
        "--profile",
        profile.to_str().unwrap(),
        "--format",
        "text",
        "--output",
        output.to_str().unwrap(),
    ]);

    cmd.assert().success();

    let rendered = fs::read_to_string(&output).unwrap();
    assert!(rendered.contains("name: Ada"), "rendered: {rendered}");
}

#[test]
fn profile_validate_rejects_duplicate_keys() {
    let dir = tempfile::tempdir().unwrap();
    let profile = write_file(&dir, "broken.json", DUPLICATE_KEY_PROFILE);

    let mut cmd = Command::cargo_bin("fieldex").unwrap();
    cmd.args(["profile", "validate", profile.to_str().unwrap()]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("share the value key"));
}

#[test]
fn profile_validate_accepts_clean_profiles() {
    let dir = tempfile::tempdir().unwrap();
    let profile = write_file(&dir, "profile.json", PERSON_PROFILE);

    let mut cmd = Command::cargo_bin("fieldex").unwrap();
    cmd.args(["profile", "validate", profile.to_str().unwrap()]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("patterns are valid"));
}

#[test]
fn profile_init_writes_starter_profile() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("starter.json");

    let mut cmd = Command::cargo_bin("fieldex").unwrap();
    cmd.args(["profile", "init", "--output", target.to_str().unwrap()]);
    cmd.assert().success();

    let written = fs::read_to_string(&target).unwrap();
    assert!(written.contains("\"patterns\""), "written: {written}");

    // Refuses to overwrite without --force.
    let mut cmd = Command::cargo_bin("fieldex").unwrap();
    cmd.args(["profile", "init", "--output", target.to_str().unwrap()]);
    cmd.assert().failure();
}

#[test]
fn batch_writes_per_file_outputs_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let profile = write_file(&dir, "profile.json", PERSON_PROFILE);
    write_file(&dir, "a.txt", "name: Ada");
    write_file(&dir, "b.txt", "name: Grace\nage: 10 years");
    let out_dir = dir.path().join("out");

    let pattern = dir.path().join("*.txt");
    let mut cmd = Command::cargo_bin("fieldex").unwrap();
    cmd.args([
        "batch",
        pattern.to_str().unwrap(),
        "--profile",
        profile.to_str().unwrap(),
        "--output-dir",
        out_dir.to_str().unwrap(),
        "--summary",
    ]);

    cmd.assert().success();

    let a = fs::read_to_string(out_dir.join("a.json")).unwrap();
    assert!(a.contains(r#""name": "Ada""#), "a.json: {a}");
    let b = fs::read_to_string(out_dir.join("b.json")).unwrap();
    assert!(b.contains(r#""age": 10"#), "b.json: {b}");

    let summary = fs::read_to_string(out_dir.join("summary.csv")).unwrap();
    assert!(summary.contains("a.txt"), "summary: {summary}");
}
