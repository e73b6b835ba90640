//! Side-by-side comparison pages for entry history

use crate::domain::diff;
use crate::domain::export::{ComparisonPage, ComparisonSide};
use crate::domain::{EntryId, UserContext, Version};
use crate::error::Result;
use crate::infrastructure::{FileSystemRepository, JournalRepository};

pub struct CompareService {
    repository: FileSystemRepository,
}

fn version_side(version: &Version) -> ComparisonSide<'_> {
    ComparisonSide {
        heading: format!("Version {}", version.number),
        details: format!(
            "Created: {} | {} words | {} chars",
            version.created_at.format("%Y-%m-%d %H:%M:%S"),
            version.word_count,
            version.char_count
        ),
        content: Some(&version.content),
        current: false,
    }
}

impl CompareService {
    pub fn new(repository: FileSystemRepository) -> Self {
        CompareService { repository }
    }

    /// Compare two stored versions of an entry, by version number
    pub fn compare_versions(
        &self,
        ctx: &UserContext,
        entry: EntryId,
        from: u32,
        to: u32,
    ) -> Result<String> {
        let journal = self.repository.load_journal()?;
        let record = journal.entry_for(ctx, entry)?;
        let left = journal.version_numbered(ctx, entry, from)?;
        let right = journal.version_numbered(ctx, entry, to)?;

        let lines = diff::diff_html(
            &left.content,
            &right.content,
            &format!("Version {}", left.number),
            &format!("Version {}", right.number),
        );
        tracing::debug!(entry = %entry, from, to, lines = lines.len(), "compared versions");

        Ok(ComparisonPage {
            kind: "Compare Versions",
            entry_title: &record.title,
            notebook: journal.notebook_name_of(record),
            left: version_side(left),
            right: version_side(right),
            diff_html: diff::render_html(&lines),
            legend: "Green = Added, Red = Removed, Gray = Unchanged",
        }
        .render())
    }

    /// Compare a stored version against the live entry
    pub fn compare_with_current(&self, ctx: &UserContext, entry: EntryId, from: u32) -> Result<String> {
        let journal = self.repository.load_journal()?;
        let record = journal.entry_for(ctx, entry)?;
        let left = journal.version_numbered(ctx, entry, from)?;
        let current = record.content.as_deref().unwrap_or("");

        let lines = diff::diff_html(
            &left.content,
            current,
            &format!("Version {}", left.number),
            "Current Version",
        );
        tracing::debug!(entry = %entry, from, lines = lines.len(), "compared with current");

        Ok(ComparisonPage {
            kind: "Compare with Current",
            entry_title: &record.title,
            notebook: journal.notebook_name_of(record),
            left: version_side(left),
            right: ComparisonSide {
                heading: format!("Current Version (v{})", record.display_version()),
                details: format!(
                    "Latest • {} words | {} chars",
                    record.word_count, record.char_count
                ),
                content: record.content.as_deref(),
                current: true,
            },
            diff_html: diff::render_html(&lines),
            legend: "Green = Added in current, Red = Removed from version, Gray = Unchanged",
        }
        .render())
    }
}
