//! Integration tests for export, compare and mood commands

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::journo_cmd;

fn setup_with_entry() -> TempDir {
    let temp = TempDir::new().unwrap();
    journo_cmd().arg("init").arg(temp.path()).assert().success();
    for args in [
        vec!["notebook", "new", "Travel"],
        vec![
            "entry", "new", "Lake Day", "-n", "1", "-d", "2025-01-17", "-m", "happy", "--text",
            "Swam **twice**.",
        ],
    ] {
        journo_cmd()
            .current_dir(temp.path())
            .args(&args)
            .assert()
            .success();
    }
    temp
}

#[test]
fn test_export_markdown_writes_file() {
    let temp = setup_with_entry();
    let out = temp.path().join("exports");

    journo_cmd()
        .current_dir(temp.path())
        .args(["export", "1", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("journal_entry_Lake_Day_2025-01-17.md"));

    let body = fs::read_to_string(out.join("journal_entry_Lake_Day_2025-01-17.md")).unwrap();
    assert!(body.starts_with("# Lake Day"));
    assert!(body.contains("- **Notebook:** Travel"));
    assert!(body.contains("Swam **twice**."));
}

#[test]
fn test_export_pdf_with_missing_renderer_fails() {
    let temp = setup_with_entry();
    journo_cmd()
        .current_dir(temp.path())
        .args(["config", "renderer", "journo-no-such-renderer"])
        .assert()
        .success();

    journo_cmd()
        .current_dir(temp.path())
        .args(["export", "1", "--format", "pdf"])
        .assert()
        .failure()
        .code(6)
        .stderr(predicate::str::contains("Rendering failed"));
}

#[test]
fn test_compare_with_current_to_stdout() {
    let temp = setup_with_entry();
    journo_cmd()
        .current_dir(temp.path())
        .args(["entry", "edit", "1", "--text", "Swam **three** times."])
        .assert()
        .success();

    journo_cmd()
        .current_dir(temp.path())
        .args(["compare", "1", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Compare with Current"))
        .stdout(predicate::str::contains("diff-removed"))
        .stdout(predicate::str::contains("diff-added"));
}

#[test]
fn test_compare_rejects_bad_target() {
    let temp = setup_with_entry();

    journo_cmd()
        .current_dir(temp.path())
        .args(["compare", "1", "1", "latest"])
        .assert()
        .failure()
        .code(4);

    journo_cmd()
        .current_dir(temp.path())
        .args(["compare", "1", "1", "2"])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn test_mood_stats_json() {
    let temp = setup_with_entry();

    let output = journo_cmd()
        .current_dir(temp.path())
        .args(["mood", "stats", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["total_entries"], 1);
    assert_eq!(value["most_common_mood"], "happy");
    assert_eq!(value["mood_percentages"]["happy"], 100.0);
}

#[test]
fn test_mood_calendar_text() {
    let temp = setup_with_entry();

    journo_cmd()
        .current_dir(temp.path())
        .args(["mood", "calendar", "--year", "2025", "--month", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-01: 1 entries on 1 days"))
        .stdout(predicate::str::contains("Lake Day"));
}
