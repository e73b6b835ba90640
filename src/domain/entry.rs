//! Journal entry model, lifecycle and validation

use super::ids::{EntryId, NotebookId, TagId, UserId};
use super::mood::Mood;
use super::text::{self, TextStats};
use crate::error::{JournoError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryState {
    #[default]
    Draft,
    Published,
    Archived,
}

impl EntryState {
    /// Draft → published
    pub fn publish(self) -> Result<Self> {
        match self {
            EntryState::Draft => Ok(EntryState::Published),
            other => Err(other.invalid_move(EntryState::Published)),
        }
    }

    /// Published or archived → draft
    pub fn to_draft(self) -> Result<Self> {
        match self {
            EntryState::Published | EntryState::Archived => Ok(EntryState::Draft),
            other => Err(other.invalid_move(EntryState::Draft)),
        }
    }

    /// Published → archived
    pub fn archive(self) -> Result<Self> {
        match self {
            EntryState::Published => Ok(EntryState::Archived),
            other => Err(other.invalid_move(EntryState::Archived)),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntryState::Draft => "Draft",
            EntryState::Published => "Published",
            EntryState::Archived => "Archived",
        }
    }

    fn invalid_move(self, to: EntryState) -> JournoError {
        JournoError::InvalidTransition {
            from: self.to_string(),
            to: to.to_string(),
        }
    }
}

impl fmt::Display for EntryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().to_lowercase())
    }
}

/// A single dated journal write-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub title: String,
    pub content: Option<String>,
    pub user: UserId,
    pub notebook: NotebookId,
    #[serde(default)]
    pub tags: Vec<TagId>,
    pub entry_date: NaiveDate,
    #[serde(default)]
    pub state: EntryState,
    #[serde(default)]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub favorite: bool,
    pub word_count: usize,
    pub char_count: usize,
    #[serde(default)]
    pub search_text: String,
    /// Number the next snapshot will get; starts at 1
    pub current_version: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entry {
    pub fn stats(&self) -> TextStats {
        TextStats {
            word_count: self.word_count,
            char_count: self.char_count,
        }
    }

    pub fn has_content(&self) -> bool {
        self.content.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// Attach a tag once; tags behave as a set
    pub fn add_tag(&mut self, tag: TagId) {
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    pub fn remove_tag(&mut self, tag: TagId) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| *t != tag);
        before != self.tags.len()
    }

    /// Version number as shown to users (the last snapshot taken)
    pub fn display_version(&self) -> u32 {
        self.current_version.saturating_sub(1)
    }
}

/// Title must have at least 2 characters once trimmed.
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().chars().count() < 2 {
        return Err(JournoError::Validation(
            "Title must be at least 2 characters long.".to_string(),
        ));
    }
    Ok(())
}

/// Entry date may not lie after `today`.
pub fn validate_entry_date(date: NaiveDate, today: NaiveDate) -> Result<()> {
    if date > today {
        return Err(JournoError::Validation(
            "Entry date cannot be in the future.".to_string(),
        ));
    }
    Ok(())
}

/// Build the search index text for an entry
pub fn compose_search_text(
    title: &str,
    content: Option<&str>,
    tag_names: &[&str],
    notebook_name: &str,
    mood: Option<Mood>,
) -> String {
    let mut parts: Vec<String> = Vec::new();

    if !title.is_empty() {
        parts.push(title.to_lowercase());
    }

    if let Some(content) = content {
        let plain = text::search_text(content);
        if !plain.is_empty() {
            parts.push(plain);
        }
    }

    if !tag_names.is_empty() {
        parts.push(tag_names.join(" ").to_lowercase());
    }

    if !notebook_name.is_empty() {
        parts.push(notebook_name.to_lowercase());
    }

    if let Some(mood) = mood {
        parts.push(mood.code().to_string());
        parts.push(mood.label().to_lowercase());
    }

    parts.join(" ")
}
