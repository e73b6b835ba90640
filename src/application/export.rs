//! Markdown and PDF export of a single entry

use crate::domain::export::{self, EntrySheet};
use crate::domain::{EntryId, Journal, UserContext};
use crate::error::{JournoError, Result};
use crate::infrastructure::{CommandRenderer, FileSystemRepository, JournalRepository, PdfRenderer};
use chrono::{Local, NaiveDateTime};

pub const MARKDOWN_CONTENT_TYPE: &str = "text/markdown; charset=utf-8";
pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// A finished download: what to call it, what it is, and the bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub filename: String,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl ExportedDocument {
    /// HTML page describing a failed PDF render
    pub fn failure_page(error: &JournoError) -> Self {
        let message = match error {
            JournoError::Render(msg) => msg.clone(),
            other => other.to_string(),
        };
        ExportedDocument {
            filename: "pdf_export_failed.html".to_string(),
            content_type: HTML_CONTENT_TYPE,
            body: export::render_failure_page(&message).into_bytes(),
        }
    }
}

pub struct ExportService {
    repository: FileSystemRepository,
}

impl ExportService {
    pub fn new(repository: FileSystemRepository) -> Self {
        ExportService { repository }
    }

    pub fn export_markdown(&self, ctx: &UserContext, id: EntryId) -> Result<ExportedDocument> {
        let journal = self.repository.load_journal()?;
        let sheet = sheet_for(&journal, ctx, id)?;

        let body = export::render_markdown(&sheet, exported_at());
        tracing::info!(entry = %id, "exported entry as Markdown");
        Ok(ExportedDocument {
            filename: sheet.filename("md"),
            content_type: MARKDOWN_CONTENT_TYPE,
            body: body.into_bytes(),
        })
    }

    /// Render through the configured external renderer
    pub fn export_pdf(&self, ctx: &UserContext, id: EntryId) -> Result<ExportedDocument> {
        let config = self.repository.load_config()?;
        let renderer = CommandRenderer::new(config.renderer.clone(), config.render_timeout());
        self.export_pdf_with(ctx, id, &renderer)
    }

    pub fn export_pdf_with(
        &self,
        ctx: &UserContext,
        id: EntryId,
        renderer: &dyn PdfRenderer,
    ) -> Result<ExportedDocument> {
        let journal = self.repository.load_journal()?;
        let sheet = sheet_for(&journal, ctx, id)?;

        let html = export::render_pdf_document(&sheet, exported_at());
        let body = renderer.render(&html).inspect_err(|e| {
            tracing::error!(entry = %id, error = %e, "PDF export failed");
        })?;

        tracing::info!(entry = %id, bytes = body.len(), "exported entry as PDF");
        Ok(ExportedDocument {
            filename: sheet.filename("pdf"),
            content_type: PDF_CONTENT_TYPE,
            body,
        })
    }

    /// Like [`export_pdf_with`](Self::export_pdf_with), but a render failure
    /// becomes a failure page instead of an error. Missing entries stay errors.
    pub fn pdf_response(
        &self,
        ctx: &UserContext,
        id: EntryId,
        renderer: &dyn PdfRenderer,
    ) -> Result<ExportedDocument> {
        match self.export_pdf_with(ctx, id, renderer) {
            Err(e @ JournoError::Render(_)) => Ok(ExportedDocument::failure_page(&e)),
            other => other,
        }
    }
}

fn sheet_for<'a>(journal: &'a Journal, ctx: &UserContext, id: EntryId) -> Result<EntrySheet<'a>> {
    let entry = journal.entry_for(ctx, id)?;
    Ok(EntrySheet {
        entry,
        notebook: journal.notebook_name_of(entry),
        tags: journal.tag_names_of(entry),
    })
}

fn exported_at() -> NaiveDateTime {
    Local::now().naive_local()
}
