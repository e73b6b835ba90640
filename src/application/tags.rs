//! Tag management use cases

use crate::domain::{Color, Tag, TagId};
use crate::error::{JournoError, Result};
use crate::infrastructure::{FileSystemRepository, JournalRepository};

/// A tag with the number of entries using it
#[derive(Debug, Clone)]
pub struct TagSummary {
    pub tag: Tag,
    pub entries_count: usize,
}

pub struct TagService {
    repository: FileSystemRepository,
}

impl TagService {
    pub fn new(repository: FileSystemRepository) -> Self {
        TagService { repository }
    }

    pub fn create(&self, name: &str, color: Option<Color>) -> Result<TagId> {
        let id = self.repository.update(|journal| {
            if journal.tag_by_name(name).is_some() {
                return Err(JournoError::Validation(format!(
                    "Tag '{}' already exists.",
                    name.trim()
                )));
            }
            journal.create_tag(name, color)
        })?;
        tracing::info!(tag = %id, "created tag");
        Ok(id)
    }

    pub fn list(&self, include_archived: bool) -> Result<Vec<TagSummary>> {
        let journal = self.repository.load_journal()?;
        Ok(journal
            .tags(include_archived)
            .into_iter()
            .map(|tag| TagSummary {
                entries_count: journal.tag_entry_count(tag.id),
                tag: tag.clone(),
            })
            .collect())
    }

    /// Resolve a tag given by id or by name, active names first
    pub fn resolve(&self, reference: &str) -> Result<TagId> {
        let journal = self.repository.load_journal()?;
        if let Ok(id) = reference.parse::<TagId>() {
            return journal.tag(id).map(|t| t.id);
        }
        let wanted = reference.trim();
        journal
            .tag_by_name(wanted)
            .or_else(|| {
                journal
                    .tags(true)
                    .into_iter()
                    .find(|t| t.name.eq_ignore_ascii_case(wanted))
            })
            .map(|t| t.id)
            .ok_or_else(|| JournoError::NotFound(format!("tag '{}'", reference)))
    }

    /// Detach from all entries and deactivate. Returns detached entry count.
    pub fn archive(&self, id: TagId) -> Result<usize> {
        let detached = self.repository.update(|journal| journal.archive_tag(id))?;
        tracing::info!(tag = %id, entries = detached, "archived tag");
        Ok(detached)
    }

    pub fn unarchive(&self, id: TagId) -> Result<()> {
        self.repository.update(|journal| journal.unarchive_tag(id))
    }

    pub fn delete(&self, id: TagId) -> Result<usize> {
        let detached = self.repository.update(|journal| journal.delete_tag(id))?;
        tracing::info!(tag = %id, entries = detached, "deleted tag");
        Ok(detached)
    }
}
