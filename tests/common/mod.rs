#![allow(dead_code)]

use assert_cmd::Command;
use journo::application::init::init;
use journo::domain::{NewEntry, UserContext};
use journo::infrastructure::FileSystemRepository;
use chrono::NaiveDate;
use std::path::Path;

pub fn journo_cmd() -> Command {
    let mut cmd = Command::cargo_bin("journo").unwrap();
    cmd.env_remove("JOURNO_ROOT");
    cmd.env_remove("RUST_LOG");
    cmd.env("JOURNO_USER", "ana");
    cmd
}

/// Initialized journal rooted at `path`
pub fn journal_at(path: &Path) -> FileSystemRepository {
    init(path).unwrap();
    FileSystemRepository::new(path.to_path_buf())
}

pub fn ana() -> UserContext {
    UserContext::new("ana")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn new_entry(title: &str, notebook: journo::domain::NotebookId) -> NewEntry {
    NewEntry {
        title: title.to_string(),
        content: None,
        notebook,
        tags: Vec::new(),
        entry_date: date(2025, 1, 17),
        mood: None,
        favorite: false,
    }
}
