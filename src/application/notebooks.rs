//! Notebook management use cases

use crate::domain::{NewNotebook, Notebook, NotebookId, UserContext};
use crate::error::Result;
use crate::infrastructure::{FileSystemRepository, JournalRepository};
use chrono::NaiveDate;

/// A notebook with its derived counts
#[derive(Debug, Clone)]
pub struct NotebookSummary {
    pub notebook: Notebook,
    pub entries_count: usize,
    pub last_entry_date: Option<NaiveDate>,
}

pub struct NotebookService {
    repository: FileSystemRepository,
}

impl NotebookService {
    pub fn new(repository: FileSystemRepository) -> Self {
        NotebookService { repository }
    }

    pub fn create(&self, ctx: &UserContext, new: NewNotebook) -> Result<NotebookId> {
        let id = self
            .repository
            .update(|journal| journal.create_notebook(ctx, new))?;
        tracing::info!(notebook = %id, user = %ctx.user, "created notebook");
        Ok(id)
    }

    pub fn list(&self, ctx: &UserContext, include_archived: bool) -> Result<Vec<NotebookSummary>> {
        let journal = self.repository.load_journal()?;
        Ok(journal
            .notebooks_of(ctx, include_archived)
            .into_iter()
            .map(|notebook| NotebookSummary {
                entries_count: journal.notebook_entry_count(notebook.id),
                last_entry_date: journal.notebook_last_entry_date(notebook.id),
                notebook: notebook.clone(),
            })
            .collect())
    }

    pub fn archive(&self, ctx: &UserContext, id: NotebookId) -> Result<()> {
        self.repository
            .update(|journal| journal.set_notebook_active(ctx, id, false))?;
        tracing::info!(notebook = %id, "archived notebook");
        Ok(())
    }

    pub fn unarchive(&self, ctx: &UserContext, id: NotebookId) -> Result<()> {
        self.repository
            .update(|journal| journal.set_notebook_active(ctx, id, true))
    }

    /// Hard delete; fails while entries remain
    pub fn delete(&self, ctx: &UserContext, id: NotebookId) -> Result<()> {
        self.repository
            .update(|journal| journal.delete_notebook(ctx, id))?;
        tracing::info!(notebook = %id, "deleted notebook");
        Ok(())
    }

    /// Delete the notebook's entries first, then the notebook
    pub fn delete_cascade(&self, ctx: &UserContext, id: NotebookId) -> Result<usize> {
        let removed = self
            .repository
            .update(|journal| journal.delete_notebook_cascade(ctx, id))?;
        tracing::info!(notebook = %id, entries = removed, "deleted notebook with entries");
        Ok(removed)
    }
}
