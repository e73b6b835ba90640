//! Integration tests for notebooks, tags, entries and version history

#![allow(deprecated)]

use predicates::prelude::*;
use tempfile::TempDir;

mod common;
use common::journo_cmd;

fn setup() -> TempDir {
    let temp = TempDir::new().unwrap();
    journo_cmd().arg("init").arg(temp.path()).assert().success();
    journo_cmd()
        .current_dir(temp.path())
        .args(["notebook", "new", "Daily", "--color", "green"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created notebook 1"));
    temp
}

fn run(temp: &TempDir, args: &[&str]) -> assert_cmd::assert::Assert {
    journo_cmd().current_dir(temp.path()).args(args).assert()
}

#[test]
fn test_entry_create_and_show() {
    let temp = setup();
    run(&temp, &["tag", "new", "walks"]).success();

    run(
        &temp,
        &[
            "entry", "new", "Morning walk", "--notebook", "1", "--date", "2025-01-17", "--mood",
            "peaceful", "--tag", "walks", "--text", "Cold **but** bright.",
        ],
    )
    .success()
    .stdout(predicate::str::contains("Created entry 1"));

    run(&temp, &["entry", "show", "1"])
        .success()
        .stdout(predicate::str::contains("Morning walk"))
        .stdout(predicate::str::contains("Notebook:   Daily"))
        .stdout(predicate::str::contains("Tags:       walks"))
        .stdout(predicate::str::contains("Peaceful"))
        .stdout(predicate::str::contains("Status:     Draft"))
        .stdout(predicate::str::contains("Words:      3"))
        .stdout(predicate::str::contains("<strong>but</strong>"));
}

#[test]
fn test_edit_keeps_history_and_restore() {
    let temp = setup();
    run(
        &temp,
        &["entry", "new", "Greeting", "-n", "1", "-d", "2025-01-17", "--html", "<p>Hello</p>"],
    )
    .success();

    run(&temp, &["versions", "1"])
        .success()
        .stdout(predicate::str::contains("No versions yet"));

    run(&temp, &["entry", "edit", "1", "--html", "<p>Hello world</p>"])
        .success()
        .stdout(predicate::str::contains("previous content saved"));

    run(&temp, &["versions", "1"])
        .success()
        .stdout(predicate::str::contains("v1"))
        .stdout(predicate::str::contains("1 words"))
        .stdout(predicate::str::contains("Hello"));

    run(&temp, &["entry", "show", "1"])
        .success()
        .stdout(predicate::str::contains("Words:      2"))
        .stdout(predicate::str::contains("Version:    1 (1 stored)"));

    run(&temp, &["restore", "1", "1"]).success();

    run(&temp, &["entry", "show", "1"])
        .success()
        .stdout(predicate::str::contains("<p>Hello</p>"))
        .stdout(predicate::str::contains("Words:      1"))
        .stdout(predicate::str::contains("Version:    2 (2 stored)"));
}

#[test]
fn test_edit_without_content_fails() {
    let temp = setup();
    run(&temp, &["entry", "new", "Empty", "-n", "1", "-d", "2025-01-17"]).success();

    run(&temp, &["entry", "edit", "1"])
        .failure()
        .code(4)
        .stderr(predicate::str::contains("--clear"));
}

#[test]
fn test_set_metadata_does_not_create_versions() {
    let temp = setup();
    run(
        &temp,
        &["entry", "new", "Notes", "-n", "1", "-d", "2025-01-17", "--text", "First draft"],
    )
    .success();

    run(&temp, &["entry", "set", "1", "--title", "Better notes", "--mood", "happy"]).success();

    run(&temp, &["entry", "show", "1"])
        .success()
        .stdout(predicate::str::contains("Better notes"))
        .stdout(predicate::str::contains("Happy"))
        .stdout(predicate::str::contains("(0 stored)"));
}

#[test]
fn test_lifecycle_transitions() {
    let temp = setup();
    run(&temp, &["entry", "new", "Trip", "-n", "1", "-d", "2025-01-17"]).success();

    run(&temp, &["entry", "archive", "1"])
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Allowed transitions"));

    run(&temp, &["entry", "publish", "1"])
        .success()
        .stdout(predicate::str::contains("now published"));
    run(&temp, &["entry", "archive", "1"])
        .success()
        .stdout(predicate::str::contains("now archived"));
    run(&temp, &["entry", "draft", "1"])
        .success()
        .stdout(predicate::str::contains("now draft"));
}

#[test]
fn test_invalid_mood_and_date() {
    let temp = setup();

    run(&temp, &["entry", "new", "Mood", "-n", "1", "-m", "grumpy"])
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Valid moods"));

    run(&temp, &["entry", "new", "Date", "-n", "1", "-d", "17/01/2025"])
        .failure()
        .code(4)
        .stderr(predicate::str::contains("YYYY-MM-DD"));

    run(&temp, &["entry", "new", "Future", "-n", "1", "-d", "2999-01-01"])
        .failure()
        .code(4);
}

#[test]
fn test_missing_entry_is_not_found() {
    let temp = setup();

    run(&temp, &["entry", "show", "42"])
        .failure()
        .code(3)
        .stderr(predicate::str::contains("entry 42"));
}

#[test]
fn test_entries_are_private_to_their_user() {
    let temp = setup();
    run(&temp, &["entry", "new", "Secret", "-n", "1", "-d", "2025-01-17"]).success();

    journo_cmd()
        .current_dir(temp.path())
        .env("JOURNO_USER", "bob")
        .args(["entry", "show", "1"])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn test_notebook_delete_requires_cascade() {
    let temp = setup();
    run(&temp, &["entry", "new", "Kept", "-n", "1", "-d", "2025-01-17"]).success();

    run(&temp, &["notebook", "delete", "1"])
        .failure()
        .code(5)
        .stderr(predicate::str::contains("--cascade"));

    run(&temp, &["notebook", "delete", "1", "--cascade"])
        .success()
        .stdout(predicate::str::contains("1 entries"));

    run(&temp, &["entry", "list"])
        .success()
        .stdout(predicate::str::contains("No entries found"));
}

#[test]
fn test_notebook_list_and_archive() {
    let temp = setup();
    run(&temp, &["entry", "new", "One", "-n", "1", "-d", "2025-01-17"]).success();

    run(&temp, &["notebook", "list"])
        .success()
        .stdout(predicate::str::contains("Daily  (1 entries, last 2025-01-17)"));

    run(&temp, &["notebook", "archive", "1"]).success();
    run(&temp, &["notebook", "list"])
        .success()
        .stdout(predicate::str::contains("No notebooks found"));
    run(&temp, &["notebook", "list", "--all"])
        .success()
        .stdout(predicate::str::contains("[archived]"));
}

#[test]
fn test_tag_archive_detaches_from_entries() {
    let temp = setup();
    run(&temp, &["tag", "new", "work"]).success();
    run(
        &temp,
        &["entry", "new", "Standup", "-n", "1", "-d", "2025-01-17", "-t", "work"],
    )
    .success();

    run(&temp, &["tag", "archive", "work"])
        .success()
        .stdout(predicate::str::contains("removed from 1 entries"));

    run(&temp, &["entry", "show", "1"])
        .success()
        .stdout(predicate::str::contains("Tags:").not());

    run(&temp, &["tag", "unarchive", "work"]).success();
    run(&temp, &["tag", "list"])
        .success()
        .stdout(predicate::str::contains("#work  (0 entries)"));
}

#[test]
fn test_search_matches_every_term() {
    let temp = setup();
    run(
        &temp,
        &["entry", "new", "Lake day", "-n", "1", "-d", "2025-01-16", "--text", "Swimming at the lake"],
    )
    .success();
    run(
        &temp,
        &["entry", "new", "Office", "-n", "1", "-d", "2025-01-17", "--text", "Meetings all day"],
    )
    .success();

    run(&temp, &["search", "lake", "swimming"])
        .success()
        .stdout(predicate::str::contains("Lake day"))
        .stdout(predicate::str::contains("Office").not());

    run(&temp, &["search", "day"])
        .success()
        .stdout(predicate::str::contains("Lake day"))
        .stdout(predicate::str::contains("Office"));
}

#[test]
fn test_duplicate_and_favorite() {
    let temp = setup();
    run(
        &temp,
        &["entry", "new", "Original", "-n", "1", "-d", "2025-01-17", "--text", "Some words"],
    )
    .success();
    run(&temp, &["entry", "edit", "1", "--text", "Other words"]).success();

    run(&temp, &["entry", "duplicate", "1"])
        .success()
        .stdout(predicate::str::contains("Created entry 2"));
    run(&temp, &["versions", "2"])
        .success()
        .stdout(predicate::str::contains("No versions yet"));

    run(&temp, &["entry", "favorite", "2"])
        .success()
        .stdout(predicate::str::contains("marked as favorite"));
    run(&temp, &["entry", "favorite", "2"])
        .success()
        .stdout(predicate::str::contains("no longer a favorite"));
}
