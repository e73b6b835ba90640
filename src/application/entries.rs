//! Entry use cases: writing, lifecycle, history and search

use crate::domain::{
    Entry, EntryChanges, EntryId, EntryState, Journal, NewEntry, UserContext, Version, VersionId,
};
use crate::error::Result;
use crate::infrastructure::{FileSystemRepository, JournalRepository};
use chrono::{Local, NaiveDate, Utc};

/// An entry with the names it refers to and its history size
#[derive(Debug, Clone)]
pub struct EntryDetails {
    pub entry: Entry,
    pub notebook: String,
    pub tags: Vec<String>,
    pub versions_count: usize,
}

impl EntryDetails {
    fn of(journal: &Journal, entry: &Entry) -> Self {
        EntryDetails {
            notebook: journal.notebook_name_of(entry).to_string(),
            tags: journal
                .tag_names_of(entry)
                .into_iter()
                .map(str::to_string)
                .collect(),
            versions_count: journal.versions_count(entry.id),
            entry: entry.clone(),
        }
    }
}

pub struct EntryService {
    repository: FileSystemRepository,
    today: NaiveDate,
}

impl EntryService {
    pub fn new(repository: FileSystemRepository) -> Self {
        Self::with_today(repository, Local::now().date_naive())
    }

    /// Use a fixed date for the future-date check
    pub fn with_today(repository: FileSystemRepository, today: NaiveDate) -> Self {
        EntryService { repository, today }
    }

    pub fn create(&self, ctx: &UserContext, new: NewEntry) -> Result<EntryId> {
        let id = self
            .repository
            .update(|journal| journal.create_entry(ctx, new, self.today, Utc::now()))?;
        tracing::info!(entry = %id, user = %ctx.user, "created entry");
        Ok(id)
    }

    /// Change title, date, mood, notebook or tags
    pub fn update(&self, ctx: &UserContext, id: EntryId, changes: EntryChanges) -> Result<()> {
        self.repository
            .update(|journal| journal.update_entry(ctx, id, changes, self.today, Utc::now()))?;
        tracing::info!(entry = %id, "updated entry metadata");
        Ok(())
    }

    /// Replace the content, snapshotting what was there before
    pub fn revise_content(
        &self,
        ctx: &UserContext,
        id: EntryId,
        content: Option<String>,
    ) -> Result<Option<VersionId>> {
        let snapshot = self
            .repository
            .update(|journal| journal.revise_content(ctx, id, content, Utc::now()))?;
        match snapshot {
            Some(version) => tracing::info!(entry = %id, version = %version, "revised content"),
            None => tracing::debug!(entry = %id, "content revision without snapshot"),
        }
        Ok(snapshot)
    }

    /// Bring back the content of version `number`
    pub fn restore(&self, ctx: &UserContext, id: EntryId, number: u32) -> Result<Option<VersionId>> {
        let snapshot = self.repository.update(|journal| {
            let version = journal.version_numbered(ctx, id, number)?.id;
            journal.restore_version(ctx, id, version, Utc::now())
        })?;
        tracing::info!(entry = %id, number, "restored version");
        Ok(snapshot)
    }

    pub fn publish(&self, ctx: &UserContext, id: EntryId) -> Result<EntryState> {
        self.transition(ctx, id, EntryState::publish)
    }

    pub fn set_to_draft(&self, ctx: &UserContext, id: EntryId) -> Result<EntryState> {
        self.transition(ctx, id, EntryState::to_draft)
    }

    pub fn archive(&self, ctx: &UserContext, id: EntryId) -> Result<EntryState> {
        self.transition(ctx, id, EntryState::archive)
    }

    fn transition(
        &self,
        ctx: &UserContext,
        id: EntryId,
        step: fn(EntryState) -> Result<EntryState>,
    ) -> Result<EntryState> {
        let state = self
            .repository
            .update(|journal| journal.set_state(ctx, id, step, Utc::now()))?;
        tracing::info!(entry = %id, state = %state, "changed entry state");
        Ok(state)
    }

    pub fn toggle_favorite(&self, ctx: &UserContext, id: EntryId) -> Result<bool> {
        self.repository
            .update(|journal| journal.toggle_favorite(ctx, id, Utc::now()))
    }

    pub fn duplicate(&self, ctx: &UserContext, id: EntryId) -> Result<EntryId> {
        let copy = self
            .repository
            .update(|journal| journal.duplicate_entry(ctx, id, Utc::now()))?;
        tracing::info!(entry = %id, copy = %copy, "duplicated entry");
        Ok(copy)
    }

    pub fn delete(&self, ctx: &UserContext, id: EntryId) -> Result<()> {
        self.repository
            .update(|journal| journal.delete_entry(ctx, id))?;
        tracing::info!(entry = %id, "deleted entry");
        Ok(())
    }

    pub fn show(&self, ctx: &UserContext, id: EntryId) -> Result<EntryDetails> {
        let journal = self.repository.load_journal()?;
        let entry = journal.entry_for(ctx, id)?;
        Ok(EntryDetails::of(&journal, entry))
    }

    /// All of the caller's entries, newest first
    pub fn list(&self, ctx: &UserContext) -> Result<Vec<EntryDetails>> {
        let journal = self.repository.load_journal()?;
        Ok(journal
            .entries_of(ctx)
            .into_iter()
            .map(|e| EntryDetails::of(&journal, e))
            .collect())
    }

    pub fn search(&self, ctx: &UserContext, query: &str) -> Result<Vec<EntryDetails>> {
        let journal = self.repository.load_journal()?;
        let found: Vec<EntryDetails> = journal
            .search(ctx, query)
            .into_iter()
            .map(|e| EntryDetails::of(&journal, e))
            .collect();
        tracing::debug!(query, hits = found.len(), "searched entries");
        Ok(found)
    }

    /// History of an entry, highest version number first
    pub fn versions(&self, ctx: &UserContext, id: EntryId) -> Result<Vec<Version>> {
        let journal = self.repository.load_journal()?;
        Ok(journal
            .versions_of(ctx, id)?
            .into_iter()
            .cloned()
            .collect())
    }
}
