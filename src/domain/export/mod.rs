//! Entry export: Markdown text and print-ready HTML

pub mod html;
pub mod markdown;

pub use html::{render_failure_page, render_pdf_document, ComparisonPage, ComparisonSide};
pub use markdown::{html_to_markdown, render_markdown};

use super::entry::Entry;

/// An entry together with the names it refers to
#[derive(Debug, Clone)]
pub struct EntrySheet<'a> {
    pub entry: &'a Entry,
    pub notebook: &'a str,
    pub tags: Vec<&'a str>,
}

impl EntrySheet<'_> {
    /// `journal_entry_<title>_<date>.<extension>`
    pub fn filename(&self, extension: &str) -> String {
        let title: String = self
            .entry
            .title
            .chars()
            .map(|c| match c {
                ' ' | '/' | '\\' => '_',
                other => other,
            })
            .collect();
        format!(
            "journal_entry_{}_{}.{}",
            title,
            self.entry.entry_date.format("%Y-%m-%d"),
            extension
        )
    }
}
