//! Tests for the `paper-splitter` binary.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use common::{bookmark, write_pdf};

fn splitter() -> Command {
    Command::cargo_bin("paper-splitter").unwrap()
}

#[test]
fn test_split_prints_json_report() {
    let dir = TempDir::new().unwrap();
    write_pdf(
        &dir.path().join("paper.pdf"),
        30,
        &[
            bookmark("Introduction", 0),
            bookmark("Methods", 10),
            bookmark("Results", 25),
        ],
    );

    let output = splitter()
        .args(["split", "paper.pdf", "out", "--root"])
        .arg(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["method"], "outline");
    assert_eq!(report["section_count"], 3);
    assert_eq!(report["sections"][2]["title"], "Results");
    assert_eq!(report["sections"][2]["start_page"], 25);
    assert_eq!(report["sections"][2]["end_page"], 29);
    assert!(dir.path().join("out/002_Results.pdf").exists());
}

#[test]
fn test_split_yaml_dry_run() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("scan.pdf"), 40, &[]);

    splitter()
        .args(["split", "scan.pdf", "out", "--format", "yaml", "--dry-run"])
        .arg("--root")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("method: chunks"))
        .stdout(predicate::str::contains("title: Pages 31-40"));

    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_split_unreadable_source_prints_error_payload() {
    let dir = TempDir::new().unwrap();

    let output = splitter()
        .args(["split", "missing.pdf", "out", "--root"])
        .arg(dir.path())
        .assert()
        .failure()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let payload: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert!(payload["error"]
        .as_str()
        .unwrap()
        .starts_with("Cannot read source document"));
    assert_eq!(payload["sections"], serde_json::json!([]));
}

#[test]
fn test_missing_arguments_print_error_payload() {
    splitter()
        .args(["split", "paper.pdf"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("\"error\""))
        .stdout(predicate::str::contains("\"sections\": []"));
}

#[test]
fn test_no_arguments_print_error_payload() {
    let output = splitter()
        .assert()
        .failure()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let payload: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert!(payload["error"].is_string());
    assert_eq!(payload["sections"], serde_json::json!([]));
}

#[test]
fn test_week_with_date() {
    splitter()
        .args(["week", "--date", "2025-01-15"])
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-01-13"))
        .stdout(predicate::str::contains("2025-01-19"))
        .stdout(predicate::str::contains("Days until Sunday: 4"));
}

#[test]
fn test_week_rejects_bad_date() {
    splitter()
        .args(["week", "--date", "15-01-2025"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));
}
