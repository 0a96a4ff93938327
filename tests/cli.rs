//! End-to-end tests for the lcov-summary binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn lcov_summary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_lcov-summary"))
}

const SAMPLE: &str = include_str!("fixtures/sample.lcov");

#[test]
fn summarizes_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.lcov");
    std::fs::File::create(&path)
        .unwrap()
        .write_all(SAMPLE.as_bytes())
        .unwrap();

    lcov_summary().arg(&path).assert().success().stdout(
        "Summary coverage rate:\n\
         \x20 source files: 2\n\
         \x20 lines.......: 66.7% (6 of 9 lines)\n\
         \x20 functions...: no data found\n\
         \x20 branches....: no data found\n",
    );
}

#[test]
fn reads_from_stdin_with_dash() {
    lcov_summary()
        .arg("-")
        .write_stdin(SAMPLE)
        .assert()
        .success()
        .stdout(predicate::str::contains("lines.......: 66.7% (6 of 9 lines)"));
}

#[test]
fn reports_functions_and_branches_when_present() {
    lcov_summary()
        .arg("-")
        .write_stdin(include_str!("fixtures/with_functions_and_branches.lcov"))
        .assert()
        .success()
        .stdout(predicate::str::contains("functions...: 75.0% (3 of 4 functions)"))
        .stdout(predicate::str::contains("branches....: 100.0% (2 of 2 branches)"));
}

#[test]
fn emits_json_summary() {
    let output = lcov_summary()
        .args(["--json", "-"])
        .write_stdin(SAMPLE)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["total_files"], 2);
    assert_eq!(value["total_lines"], 9);
    assert_eq!(value["covered_lines"], 6);
    assert_eq!(value["files"][1]["source_file"], "/src/util.rs");
}

#[test]
fn requires_exactly_one_file_argument() {
    lcov_summary()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));

    lcov_summary()
        .args(["a.lcov", "b.lcov"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn fails_on_missing_file() {
    lcov_summary()
        .arg("/no/such/file.lcov")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open"));
}

#[test]
fn fails_on_malformed_input() {
    lcov_summary()
        .arg("-")
        .write_stdin("DA:1,5\nend_of_record\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("line data without source file"));
}
