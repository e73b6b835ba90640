//! Journal aggregate root
//!
//! Holds every notebook, entry, version and tag and enforces the invariants
//! that span records: ownership, cascade deletes, tag detachment and the
//! per-entry uniqueness of version numbers. A `Journal` is loaded, mutated and
//! saved as one unit of work by the repository.

use super::analytics::MoodRecord;
use super::entry::{self, Entry, EntryState};
use super::ids::{EntryId, NotebookId, TagId, UserContext, UserId, VersionId};
use super::mood::Mood;
use super::notebook::{self, Notebook};
use super::palette::Color;
use super::tag::Tag;
use super::text;
use super::version::Version;
use crate::error::{JournoError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Values for a new notebook
#[derive(Debug, Clone, Default)]
pub struct NewNotebook {
    pub name: String,
    pub description: Option<String>,
    /// Random palette color when `None`
    pub color: Option<Color>,
}

/// Values for a new entry
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub title: String,
    pub content: Option<String>,
    pub notebook: NotebookId,
    pub tags: Vec<TagId>,
    pub entry_date: NaiveDate,
    pub mood: Option<Mood>,
    pub favorite: bool,
}

/// Metadata edits. Content changes go through [`Journal::revise_content`].
#[derive(Debug, Clone, Default)]
pub struct EntryChanges {
    pub title: Option<String>,
    pub entry_date: Option<NaiveDate>,
    /// `Some(None)` clears the mood
    pub mood: Option<Option<Mood>>,
    pub notebook: Option<NotebookId>,
    pub tags: Option<Vec<TagId>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Counters {
    notebook: u64,
    entry: u64,
    version: u64,
    tag: u64,
}

fn bump(counter: &mut u64) -> u64 {
    *counter += 1;
    *counter
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Journal {
    #[serde(default)]
    counters: Counters,
    #[serde(default)]
    notebooks: Vec<Notebook>,
    #[serde(default)]
    entries: Vec<Entry>,
    #[serde(default)]
    versions: Vec<Version>,
    #[serde(default)]
    tags: Vec<Tag>,
}

// Notebooks
impl Journal {
    pub fn create_notebook(&mut self, ctx: &UserContext, new: NewNotebook) -> Result<NotebookId> {
        notebook::validate_name("Notebook", &new.name)?;

        let id = NotebookId(bump(&mut self.counters.notebook));
        self.notebooks.push(Notebook {
            id,
            name: new.name.trim().to_string(),
            description: new.description,
            color: new.color.unwrap_or_else(Color::random),
            user: ctx.user.clone(),
            active: true,
        });
        Ok(id)
    }

    /// Look up a notebook the caller owns
    pub fn notebook_for(&self, ctx: &UserContext, id: NotebookId) -> Result<&Notebook> {
        self.notebooks
            .iter()
            .find(|n| n.id == id && ctx.owns(&n.user))
            .ok_or_else(|| JournoError::NotFound(format!("notebook {}", id)))
    }

    fn notebook_mut(&mut self, ctx: &UserContext, id: NotebookId) -> Result<&mut Notebook> {
        self.notebooks
            .iter_mut()
            .find(|n| n.id == id && ctx.owns(&n.user))
            .ok_or_else(|| JournoError::NotFound(format!("notebook {}", id)))
    }

    /// The caller's notebooks sorted by name
    pub fn notebooks_of(&self, ctx: &UserContext, include_archived: bool) -> Vec<&Notebook> {
        let mut notebooks: Vec<&Notebook> = self
            .notebooks
            .iter()
            .filter(|n| ctx.owns(&n.user) && (include_archived || n.active))
            .collect();
        notebooks.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        notebooks
    }

    pub fn set_notebook_active(
        &mut self,
        ctx: &UserContext,
        id: NotebookId,
        active: bool,
    ) -> Result<()> {
        self.notebook_mut(ctx, id)?.active = active;
        Ok(())
    }

    pub fn notebook_entry_count(&self, id: NotebookId) -> usize {
        self.entries.iter().filter(|e| e.notebook == id).count()
    }

    pub fn notebook_last_entry_date(&self, id: NotebookId) -> Option<NaiveDate> {
        self.entries
            .iter()
            .filter(|e| e.notebook == id)
            .map(|e| e.entry_date)
            .max()
    }

    /// Hard delete. Refused while the notebook still owns entries.
    pub fn delete_notebook(&mut self, ctx: &UserContext, id: NotebookId) -> Result<()> {
        let name = self.notebook_for(ctx, id)?.name.clone();
        if self.notebook_entry_count(id) > 0 {
            return Err(JournoError::NotebookHasEntries(name));
        }
        self.notebooks.retain(|n| n.id != id);
        Ok(())
    }

    /// Delete the notebook's entries (with their versions), then the notebook.
    /// Returns the number of entries removed.
    pub fn delete_notebook_cascade(&mut self, ctx: &UserContext, id: NotebookId) -> Result<usize> {
        self.notebook_for(ctx, id)?;

        let doomed: Vec<EntryId> = self
            .entries
            .iter()
            .filter(|e| e.notebook == id)
            .map(|e| e.id)
            .collect();
        for entry_id in &doomed {
            self.remove_entry(*entry_id);
        }

        self.delete_notebook(ctx, id)?;
        Ok(doomed.len())
    }

    fn notebook_name(&self, id: NotebookId) -> &str {
        self.notebooks
            .iter()
            .find(|n| n.id == id)
            .map(|n| n.name.as_str())
            .unwrap_or("")
    }
}

// Tags
impl Journal {
    pub fn create_tag(&mut self, name: &str, color: Option<Color>) -> Result<TagId> {
        notebook::validate_name("Tag", name)?;

        let id = TagId(bump(&mut self.counters.tag));
        self.tags.push(Tag {
            id,
            name: name.trim().to_string(),
            color: color.unwrap_or_else(Color::random),
            active: true,
        });
        Ok(id)
    }

    pub fn tag(&self, id: TagId) -> Result<&Tag> {
        self.tags
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| JournoError::NotFound(format!("tag {}", id)))
    }

    /// Find an active tag by case-insensitive name
    pub fn tag_by_name(&self, name: &str) -> Option<&Tag> {
        let wanted = name.trim();
        self.tags
            .iter()
            .find(|t| t.active && t.name.eq_ignore_ascii_case(wanted))
    }

    /// Tags sorted by name
    pub fn tags(&self, include_archived: bool) -> Vec<&Tag> {
        let mut tags: Vec<&Tag> = self
            .tags
            .iter()
            .filter(|t| include_archived || t.active)
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        tags
    }

    pub fn tag_entry_count(&self, id: TagId) -> usize {
        self.entries.iter().filter(|e| e.tags.contains(&id)).count()
    }

    /// Soft delete: detaches the tag from every entry, then deactivates it.
    /// Returns the number of entries it was removed from.
    pub fn archive_tag(&mut self, id: TagId) -> Result<usize> {
        self.tag(id)?;
        let detached = self.detach_tag(id);
        if let Some(tag) = self.tags.iter_mut().find(|t| t.id == id) {
            tag.active = false;
        }
        Ok(detached)
    }

    pub fn unarchive_tag(&mut self, id: TagId) -> Result<()> {
        self.tag(id)?;
        if let Some(tag) = self.tags.iter_mut().find(|t| t.id == id) {
            tag.active = true;
        }
        Ok(())
    }

    /// Permanent delete, detaching it from entries first
    pub fn delete_tag(&mut self, id: TagId) -> Result<usize> {
        self.tag(id)?;
        let detached = self.detach_tag(id);
        self.tags.retain(|t| t.id != id);
        Ok(detached)
    }

    fn detach_tag(&mut self, id: TagId) -> usize {
        let mut touched = Vec::new();
        for (idx, entry) in self.entries.iter_mut().enumerate() {
            if entry.remove_tag(id) {
                touched.push(idx);
            }
        }
        for idx in &touched {
            self.refresh_search_text(*idx);
        }
        touched.len()
    }

    fn tag_names(&self, ids: &[TagId]) -> Vec<&str> {
        ids.iter()
            .filter_map(|id| self.tags.iter().find(|t| t.id == *id))
            .map(|t| t.name.as_str())
            .collect()
    }

    fn check_tags(&self, ids: &[TagId]) -> Result<()> {
        for id in ids {
            let tag = self.tag(*id)?;
            if !tag.active {
                return Err(JournoError::Validation(format!(
                    "Tag '{}' is archived.",
                    tag.name
                )));
            }
        }
        Ok(())
    }
}

// Entries
impl Journal {
    pub fn create_entry(
        &mut self,
        ctx: &UserContext,
        new: NewEntry,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<EntryId> {
        entry::validate_title(&new.title)?;
        entry::validate_entry_date(new.entry_date, today)?;
        self.notebook_for(ctx, new.notebook)?;
        self.check_tags(&new.tags)?;

        let stats = text::analyze(new.content.as_deref());
        let id = EntryId(bump(&mut self.counters.entry));

        let mut record = Entry {
            id,
            title: new.title,
            content: new.content,
            user: ctx.user.clone(),
            notebook: new.notebook,
            tags: Vec::new(),
            entry_date: new.entry_date,
            state: EntryState::Draft,
            mood: new.mood,
            favorite: new.favorite,
            word_count: stats.word_count,
            char_count: stats.char_count,
            search_text: String::new(),
            current_version: 1,
            created_at: now,
            updated_at: now,
        };
        for tag in new.tags {
            record.add_tag(tag);
        }

        self.entries.push(record);
        let idx = self.entries.len() - 1;
        self.refresh_search_text(idx);
        Ok(id)
    }

    /// Look up an entry the caller owns
    pub fn entry_for(&self, ctx: &UserContext, id: EntryId) -> Result<&Entry> {
        let idx = self.entry_index(ctx, id)?;
        Ok(&self.entries[idx])
    }

    fn entry_index(&self, ctx: &UserContext, id: EntryId) -> Result<usize> {
        self.entries
            .iter()
            .position(|e| e.id == id && ctx.owns(&e.user))
            .ok_or_else(|| JournoError::NotFound(format!("entry {}", id)))
    }

    /// The caller's entries, newest entry date first, then most recently updated
    pub fn entries_of(&self, ctx: &UserContext) -> Vec<&Entry> {
        let mut entries: Vec<&Entry> = self
            .entries
            .iter()
            .filter(|e| ctx.owns(&e.user))
            .collect();
        entries.sort_by(|a, b| {
            b.entry_date
                .cmp(&a.entry_date)
                .then(b.updated_at.cmp(&a.updated_at))
                .then(b.id.cmp(&a.id))
        });
        entries
    }

    pub fn notebook_name_of(&self, entry: &Entry) -> &str {
        self.notebook_name(entry.notebook)
    }

    pub fn tag_names_of(&self, entry: &Entry) -> Vec<&str> {
        self.tag_names(&entry.tags)
    }

    /// Change metadata. Never creates a version.
    pub fn update_entry(
        &mut self,
        ctx: &UserContext,
        id: EntryId,
        changes: EntryChanges,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let idx = self.entry_index(ctx, id)?;

        if let Some(title) = &changes.title {
            entry::validate_title(title)?;
        }
        if let Some(date) = changes.entry_date {
            entry::validate_entry_date(date, today)?;
        }
        if let Some(notebook) = changes.notebook {
            self.notebook_for(ctx, notebook)?;
        }
        if let Some(tags) = &changes.tags {
            self.check_tags(tags)?;
        }

        let record = &mut self.entries[idx];
        if let Some(title) = changes.title {
            record.title = title;
        }
        if let Some(date) = changes.entry_date {
            record.entry_date = date;
        }
        if let Some(mood) = changes.mood {
            record.mood = mood;
        }
        if let Some(notebook) = changes.notebook {
            record.notebook = notebook;
        }
        if let Some(tags) = changes.tags {
            record.tags.clear();
            for tag in tags {
                record.add_tag(tag);
            }
        }
        record.updated_at = now;

        self.refresh_search_text(idx);
        Ok(())
    }

    /// Replace the content of an entry.
    ///
    /// The prior content is snapshotted first (when there is any). Writing the
    /// content it already has is a no-op. Returns the snapshot's id.
    pub fn revise_content(
        &mut self,
        ctx: &UserContext,
        id: EntryId,
        content: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Option<VersionId>> {
        let idx = self.entry_index(ctx, id)?;
        if self.entries[idx].content == content {
            return Ok(None);
        }

        let snapshot = self.snapshot(idx, &ctx.user, now)?;

        let stats = text::analyze(content.as_deref());
        let record = &mut self.entries[idx];
        record.content = content;
        record.word_count = stats.word_count;
        record.char_count = stats.char_count;
        record.updated_at = now;

        self.refresh_search_text(idx);
        Ok(snapshot)
    }

    /// Bring back a version's content. The current content is snapshotted
    /// first so nothing is lost. Returns that snapshot's id.
    pub fn restore_version(
        &mut self,
        ctx: &UserContext,
        id: EntryId,
        version: VersionId,
        now: DateTime<Utc>,
    ) -> Result<Option<VersionId>> {
        let idx = self.entry_index(ctx, id)?;
        let target = self.version_for(ctx, id, version)?.clone();

        let snapshot = self.snapshot(idx, &ctx.user, now)?;

        let record = &mut self.entries[idx];
        record.content = Some(target.content);
        record.word_count = target.word_count;
        record.char_count = target.char_count;
        record.updated_at = now;

        self.refresh_search_text(idx);
        Ok(snapshot)
    }

    pub fn set_state<F>(&mut self, ctx: &UserContext, id: EntryId, transition: F, now: DateTime<Utc>) -> Result<EntryState>
    where
        F: FnOnce(EntryState) -> Result<EntryState>,
    {
        let idx = self.entry_index(ctx, id)?;
        let record = &mut self.entries[idx];
        record.state = transition(record.state)?;
        record.updated_at = now;
        Ok(record.state)
    }

    pub fn toggle_favorite(&mut self, ctx: &UserContext, id: EntryId, now: DateTime<Utc>) -> Result<bool> {
        let idx = self.entry_index(ctx, id)?;
        let record = &mut self.entries[idx];
        record.favorite = !record.favorite;
        record.updated_at = now;
        Ok(record.favorite)
    }

    /// Copy an entry without its history
    pub fn duplicate_entry(&mut self, ctx: &UserContext, id: EntryId, now: DateTime<Utc>) -> Result<EntryId> {
        let source = self.entry_for(ctx, id)?.clone();
        let new_id = EntryId(bump(&mut self.counters.entry));

        self.entries.push(Entry {
            id: new_id,
            title: format!("{} (Copy)", source.title),
            favorite: false,
            current_version: 1,
            created_at: now,
            updated_at: now,
            ..source
        });
        let idx = self.entries.len() - 1;
        self.refresh_search_text(idx);
        Ok(new_id)
    }

    /// Delete an entry together with its versions
    pub fn delete_entry(&mut self, ctx: &UserContext, id: EntryId) -> Result<()> {
        self.entry_index(ctx, id)?;
        self.remove_entry(id);
        Ok(())
    }

    fn remove_entry(&mut self, id: EntryId) {
        self.versions.retain(|v| v.entry != id);
        self.entries.retain(|e| e.id != id);
    }

    fn refresh_search_text(&mut self, idx: usize) {
        let record = &self.entries[idx];
        let search_text = entry::compose_search_text(
            &record.title,
            record.content.as_deref(),
            &self.tag_names(&record.tags),
            self.notebook_name(record.notebook),
            record.mood,
        );
        self.entries[idx].search_text = search_text;
    }

    /// Entries matching every search term of more than two characters.
    pub fn search(&self, ctx: &UserContext, query: &str) -> Vec<&Entry> {
        let terms: Vec<String> = query
            .split_whitespace()
            .filter(|t| t.chars().count() > 2)
            .map(str::to_lowercase)
            .collect();

        self.entries_of(ctx)
            .into_iter()
            .filter(|e| terms.iter().all(|term| self.entry_matches(e, term)))
            .collect()
    }

    fn entry_matches(&self, entry: &Entry, term: &str) -> bool {
        entry.title.to_lowercase().contains(term)
            || entry
                .content
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(term))
            || self
                .tag_names(&entry.tags)
                .iter()
                .any(|name| name.to_lowercase().contains(term))
            || self.notebook_name(entry.notebook).to_lowercase().contains(term)
            || entry.search_text.contains(term)
    }

    /// The caller's mood-tagged entries in default entry order
    pub fn mood_records(&self, ctx: &UserContext) -> Vec<MoodRecord<'_>> {
        self.entries_of(ctx)
            .into_iter()
            .filter_map(|e| {
                e.mood.map(|mood| MoodRecord {
                    entry_date: e.entry_date,
                    mood,
                    title: &e.title,
                    word_count: e.word_count,
                    notebook: self.notebook_name(e.notebook),
                })
            })
            .collect()
    }
}

// Versions
impl Journal {
    /// Store a snapshot of the entry's current content and advance its counter.
    fn snapshot(&mut self, idx: usize, actor: &UserId, now: DateTime<Utc>) -> Result<Option<VersionId>> {
        let record = &self.entries[idx];
        if !record.has_content() {
            return Ok(None);
        }

        if self
            .versions
            .iter()
            .any(|v| v.entry == record.id && v.number == record.current_version)
        {
            return Err(JournoError::VersionConflict {
                entry: record.id.0,
                number: record.current_version,
            });
        }

        let id = VersionId(bump(&mut self.counters.version));
        let Some(version) = Version::capture(id, record, actor, now) else {
            return Ok(None);
        };

        self.versions.push(version);
        self.entries[idx].current_version += 1;
        Ok(Some(id))
    }

    /// Versions of one of the caller's entries, highest number first
    pub fn versions_of(&self, ctx: &UserContext, entry: EntryId) -> Result<Vec<&Version>> {
        self.entry_index(ctx, entry)?;
        let mut versions: Vec<&Version> =
            self.versions.iter().filter(|v| v.entry == entry).collect();
        versions.sort_by(|a, b| b.number.cmp(&a.number));
        Ok(versions)
    }

    /// A version that belongs to the given entry of the caller
    pub fn version_for(&self, ctx: &UserContext, entry: EntryId, id: VersionId) -> Result<&Version> {
        self.entry_index(ctx, entry)?;
        self.versions
            .iter()
            .find(|v| v.id == id && v.entry == entry)
            .ok_or_else(|| JournoError::NotFound(format!("version {}", id)))
    }

    /// Look a version up by its sequence number within the entry
    pub fn version_numbered(&self, ctx: &UserContext, entry: EntryId, number: u32) -> Result<&Version> {
        self.entry_index(ctx, entry)?;
        self.versions
            .iter()
            .find(|v| v.entry == entry && v.number == number)
            .ok_or_else(|| JournoError::NotFound(format!("version {} of entry {}", number, entry)))
    }

    pub fn versions_count(&self, entry: EntryId) -> usize {
        self.versions.iter().filter(|v| v.entry == entry).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn setup() -> (Journal, UserContext, NotebookId) {
        let mut journal = Journal::default();
        let ctx = UserContext::new("ana");
        let notebook = journal
            .create_notebook(
                &ctx,
                NewNotebook {
                    name: "Daily".to_string(),
                    ..Default::default()
                },
            )
            .unwrap();
        (journal, ctx, notebook)
    }

    fn new_entry(notebook: NotebookId, content: Option<&str>) -> NewEntry {
        NewEntry {
            title: "First day".to_string(),
            content: content.map(str::to_string),
            notebook,
            tags: vec![],
            entry_date: today(),
            mood: None,
            favorite: false,
        }
    }

    #[test]
    fn test_create_entry_computes_counts() {
        let (mut journal, ctx, nb) = setup();
        let id = journal
            .create_entry(&ctx, new_entry(nb, Some("<p>Hello world</p>")), today(), Utc::now())
            .unwrap();
        let e = journal.entry_for(&ctx, id).unwrap();
        assert_eq!(e.word_count, 2);
        assert_eq!(e.char_count, 11);
        assert_eq!(e.current_version, 1);
        assert_eq!(e.search_text, "first day hello world daily");
    }

    #[test]
    fn test_create_entry_validation() {
        let (mut journal, ctx, nb) = setup();
        let mut bad_title = new_entry(nb, None);
        bad_title.title = " x ".to_string();
        assert!(matches!(
            journal.create_entry(&ctx, bad_title, today(), Utc::now()),
            Err(JournoError::Validation(_))
        ));

        let mut future = new_entry(nb, None);
        future.entry_date = today().succ_opt().unwrap();
        assert!(matches!(
            journal.create_entry(&ctx, future, today(), Utc::now()),
            Err(JournoError::Validation(_))
        ));
    }

    #[test]
    fn test_foreign_notebook_is_not_found() {
        let (mut journal, _ctx, nb) = setup();
        let other = UserContext::new("bob");
        assert!(matches!(
            journal.create_entry(&other, new_entry(nb, None), today(), Utc::now()),
            Err(JournoError::NotFound(_))
        ));
    }

    #[test]
    fn test_revise_content_snapshots_previous() {
        let (mut journal, ctx, nb) = setup();
        let id = journal
            .create_entry(&ctx, new_entry(nb, Some("<p>Hello world</p>")), today(), Utc::now())
            .unwrap();

        let snap = journal
            .revise_content(&ctx, id, Some("<p>Hello there world</p>".to_string()), Utc::now())
            .unwrap();
        assert!(snap.is_some());

        let versions = journal.versions_of(&ctx, id).unwrap();
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].number, 1);
        assert_eq!(versions[0].word_count, 2);
        assert_eq!(versions[0].content, "<p>Hello world</p>");

        let e = journal.entry_for(&ctx, id).unwrap();
        assert_eq!(e.word_count, 3);
        assert_eq!(e.current_version, 2);
    }

    #[test]
    fn test_revise_same_content_is_noop() {
        let (mut journal, ctx, nb) = setup();
        let id = journal
            .create_entry(&ctx, new_entry(nb, Some("<p>a</p>")), today(), Utc::now())
            .unwrap();
        let snap = journal
            .revise_content(&ctx, id, Some("<p>a</p>".to_string()), Utc::now())
            .unwrap();
        assert!(snap.is_none());
        assert_eq!(journal.versions_count(id), 0);
    }

    #[test]
    fn test_first_content_write_on_empty_entry_has_no_snapshot() {
        let (mut journal, ctx, nb) = setup();
        let id = journal
            .create_entry(&ctx, new_entry(nb, None), today(), Utc::now())
            .unwrap();
        let snap = journal
            .revise_content(&ctx, id, Some("<p>now</p>".to_string()), Utc::now())
            .unwrap();
        assert!(snap.is_none());
        assert_eq!(journal.entry_for(&ctx, id).unwrap().current_version, 1);
    }

    #[test]
    fn test_metadata_update_creates_no_version() {
        let (mut journal, ctx, nb) = setup();
        let id = journal
            .create_entry(&ctx, new_entry(nb, Some("<p>a</p>")), today(), Utc::now())
            .unwrap();
        journal
            .update_entry(
                &ctx,
                id,
                EntryChanges {
                    title: Some("Renamed".to_string()),
                    mood: Some(Some(Mood::Happy)),
                    ..Default::default()
                },
                today(),
                Utc::now(),
            )
            .unwrap();
        assert_eq!(journal.versions_count(id), 0);
        let e = journal.entry_for(&ctx, id).unwrap();
        assert_eq!(e.title, "Renamed");
        assert!(e.search_text.contains("happy"));
    }

    #[test]
    fn test_version_conflict_is_rejected() {
        let (mut journal, ctx, nb) = setup();
        let id = journal
            .create_entry(&ctx, new_entry(nb, Some("<p>a</p>")), today(), Utc::now())
            .unwrap();
        journal
            .revise_content(&ctx, id, Some("<p>b</p>".to_string()), Utc::now())
            .unwrap();

        // Simulate a lost counter update from a concurrent writer.
        journal.entries[0].current_version = 1;
        let result = journal.revise_content(&ctx, id, Some("<p>c</p>".to_string()), Utc::now());
        assert!(matches!(
            result,
            Err(JournoError::VersionConflict { number: 1, .. })
        ));
    }

    #[test]
    fn test_archive_tag_detaches_from_entries() {
        let (mut journal, ctx, nb) = setup();
        let tag = journal.create_tag("Travel", None).unwrap();
        let mut new = new_entry(nb, None);
        new.tags = vec![tag, tag];
        let id = journal.create_entry(&ctx, new, today(), Utc::now()).unwrap();
        assert_eq!(journal.entry_for(&ctx, id).unwrap().tags, vec![tag]);

        assert_eq!(journal.archive_tag(tag).unwrap(), 1);
        let e = journal.entry_for(&ctx, id).unwrap();
        assert!(e.tags.is_empty());
        assert!(!e.search_text.contains("travel"));
        assert!(!journal.tag(tag).unwrap().active);
    }

    #[test]
    fn test_archived_tag_cannot_be_attached() {
        let (mut journal, ctx, nb) = setup();
        let tag = journal.create_tag("Old", None).unwrap();
        journal.archive_tag(tag).unwrap();
        let mut new = new_entry(nb, None);
        new.tags = vec![tag];
        assert!(matches!(
            journal.create_entry(&ctx, new, today(), Utc::now()),
            Err(JournoError::Validation(_))
        ));
    }

    #[test]
    fn test_duplicate_entry_resets_history() {
        let (mut journal, ctx, nb) = setup();
        let id = journal
            .create_entry(&ctx, new_entry(nb, Some("<p>a</p>")), today(), Utc::now())
            .unwrap();
        journal.toggle_favorite(&ctx, id, Utc::now()).unwrap();
        journal
            .revise_content(&ctx, id, Some("<p>b</p>".to_string()), Utc::now())
            .unwrap();

        let copy = journal.duplicate_entry(&ctx, id, Utc::now()).unwrap();
        let e = journal.entry_for(&ctx, copy).unwrap();
        assert_eq!(e.title, "First day (Copy)");
        assert!(!e.favorite);
        assert_eq!(e.current_version, 1);
        assert_eq!(e.content.as_deref(), Some("<p>b</p>"));
        assert_eq!(journal.versions_count(copy), 0);
    }

    #[test]
    fn test_delete_entry_cascades_versions() {
        let (mut journal, ctx, nb) = setup();
        let id = journal
            .create_entry(&ctx, new_entry(nb, Some("<p>a</p>")), today(), Utc::now())
            .unwrap();
        journal
            .revise_content(&ctx, id, Some("<p>b</p>".to_string()), Utc::now())
            .unwrap();
        journal.delete_entry(&ctx, id).unwrap();
        assert_eq!(journal.versions_count(id), 0);
        assert!(journal.entry_for(&ctx, id).is_err());
    }

    #[test]
    fn test_search_requires_all_terms() {
        let (mut journal, ctx, nb) = setup();
        let mut a = new_entry(nb, Some("<p>Walked the dog in the park</p>"));
        a.title = "Sunday".to_string();
        let mut b = new_entry(nb, Some("<p>Read in the park</p>"));
        b.title = "Monday".to_string();
        journal.create_entry(&ctx, a, today(), Utc::now()).unwrap();
        journal.create_entry(&ctx, b, today(), Utc::now()).unwrap();

        let found = journal.search(&ctx, "park dog");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Sunday");

        // Short terms are ignored, so everything matches
        assert_eq!(journal.search(&ctx, "in a").len(), 2);
        assert!(journal.search(&UserContext::new("bob"), "park").is_empty());
    }
}
