//! Immutable content snapshots of an entry

use super::entry::Entry;
use super::ids::{EntryId, UserId, VersionId};
use super::text;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const PREVIEW_CHARS: usize = 100;

/// One historical snapshot of an entry's content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Version {
    pub id: VersionId,
    pub entry: EntryId,
    pub number: u32,
    pub content: String,
    pub word_count: usize,
    pub char_count: usize,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl Version {
    /// Capture the entry's current content, or `None` when it has none.
    ///
    /// The caller is responsible for bumping the entry's version counter
    /// once the snapshot is stored.
    pub fn capture(
        id: VersionId,
        entry: &Entry,
        created_by: &UserId,
        now: DateTime<Utc>,
    ) -> Option<Self> {
        let content = entry.content.as_deref().filter(|c| !c.is_empty())?;

        Some(Version {
            id,
            entry: entry.id,
            number: entry.current_version,
            content: content.to_string(),
            word_count: entry.word_count,
            char_count: entry.char_count,
            created_by: created_by.clone(),
            created_at: now,
        })
    }

    /// First 100 characters of the plain text, with `...` when cut
    pub fn preview(&self) -> String {
        let plain = text::normalize(&self.content)
            .unwrap_or_else(|_| text::crude_normalize(&self.content));

        if plain.chars().count() > PREVIEW_CHARS {
            let cut: String = plain.chars().take(PREVIEW_CHARS).collect();
            format!("{}...", cut)
        } else {
            plain
        }
    }

    /// Human-readable age relative to `now`
    pub fn time_ago(&self, now: DateTime<Utc>) -> String {
        let diff = now - self.created_at;

        if diff.num_days() > 0 {
            format!("{} days ago", diff.num_days())
        } else if diff.num_hours() > 0 {
            format!("{} hours ago", diff.num_hours())
        } else if diff.num_minutes() > 0 {
            format!("{} minutes ago", diff.num_minutes())
        } else {
            "Just now".to_string()
        }
    }
}
