//! Standalone HTML documents: the printable entry, version comparisons
//! and the export failure page.

use super::EntrySheet;
use crate::domain::text::escape_html;
use chrono::NaiveDateTime;
use std::fmt::Write as _;

const PRINT_STYLE: &str = r#"
        @page { margin: 2cm; size: A4; }
        body { font-family: "DejaVu Sans", "Arial", sans-serif; font-size: 12px; line-height: 1.4; color: #000000; margin: 0; padding: 0; }
        .header { border-bottom: 3px solid #333333; padding-bottom: 15px; margin-bottom: 25px; }
        .title { font-size: 20px; font-weight: bold; text-align: center; margin: 0; }
        .metadata { background: #f8f9fa; border: 1px solid #dee2e6; padding: 15px; margin: 20px 0; border-radius: 4px; }
        .metadata-row { margin: 6px 0; display: flex; }
        .metadata-label { font-weight: bold; min-width: 100px; color: #495057; }
        .metadata-value { flex: 1; }
        .content { margin-top: 25px; }
        .content p { margin-bottom: 12px; }
        .footer { margin-top: 40px; padding-top: 15px; border-top: 1px solid #cccccc; color: #666666; font-size: 10px; text-align: center; }
        .no-content { font-style: italic; color: #6c757d; text-align: center; margin: 40px 0; }
"#;

const COMPARE_STYLE: &str = r#"
        body { font-family: Arial, sans-serif; margin: 20px; line-height: 1.6; }
        .header { background: #f8f9fa; padding: 20px; border-radius: 5px; margin-bottom: 20px; }
        .comparison-container { display: flex; gap: 20px; }
        .version-panel { flex: 1; border: 1px solid #dee2e6; border-radius: 5px; overflow: hidden; }
        .version-header { background: #e9ecef; padding: 15px; border-bottom: 1px solid #dee2e6; }
        .version-content { padding: 15px; max-height: 600px; overflow-y: auto; }
        .current-version { border: 2px solid #28a745; }
        .diff-container { border: 1px solid #dee2e6; border-radius: 5px; overflow: hidden; margin-top: 30px; }
        .diff-title { background: #e9ecef; padding: 15px; border-bottom: 1px solid #dee2e6; }
        .diff-content { padding: 15px; max-height: 600px; overflow-y: auto; font-family: monospace; white-space: pre-wrap; }
        .diff-added { background: #d4edda; color: #155724; padding: 2px 5px; margin: 1px 0; }
        .diff-removed { background: #f8d7da; color: #721c24; padding: 2px 5px; margin: 1px 0; }
        .diff-context { color: #6c757d; padding: 2px 5px; margin: 1px 0; }
        .diff-file { color: #495057; padding: 2px 5px; font-weight: bold; }
        .diff-header { background: #fff3cd; color: #856404; padding: 5px; font-weight: bold; }
        .no-changes { color: #6c757d; font-style: italic; text-align: center; padding: 20px; }
"#;

fn metadata_row(html: &mut String, label: &str, value: &str) {
    let _ = write!(
        html,
        r#"
        <div class="metadata-row">
            <span class="metadata-label">{}:</span>
            <span class="metadata-value">{}</span>
        </div>"#,
        label,
        escape_html(value)
    );
}

/// Print-ready document handed to the PDF renderer.
///
/// The entry body is embedded as stored; every other field is escaped.
pub fn render_pdf_document(sheet: &EntrySheet<'_>, exported_at: NaiveDateTime) -> String {
    let entry = sheet.entry;
    let title = escape_html(&entry.title);

    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>{PRINT_STYLE}    </style>
</head>
<body>
    <div class="header">
        <h1 class="title">{title}</h1>
    </div>

    <div class="metadata">"#
    );

    metadata_row(&mut html, "Date", &entry.entry_date.format("%B %d, %Y").to_string());
    metadata_row(&mut html, "Notebook", sheet.notebook);
    if !sheet.tags.is_empty() {
        metadata_row(&mut html, "Tags", &sheet.tags.join(", "));
    }
    if let Some(mood) = entry.mood {
        metadata_row(&mut html, "Mood", mood.label());
    }
    metadata_row(&mut html, "Status", entry.state.label());
    metadata_row(&mut html, "Favorite", if entry.favorite { "⭐ Yes" } else { "No" });
    metadata_row(&mut html, "Words", &entry.word_count.to_string());
    metadata_row(&mut html, "Characters", &entry.char_count.to_string());
    metadata_row(&mut html, "Version", &entry.display_version().to_string());

    let body = match entry.content.as_deref() {
        Some(content) if !content.is_empty() => content,
        _ => r#"<p class="no-content">No content available</p>"#,
    };

    let _ = write!(
        html,
        r#"
    </div>

    <div class="content">
        {body}
    </div>

    <div class="footer">
        Exported from Journal on {}
    </div>
</body>
</html>
"#,
        exported_at.format("%B %d, %Y at %H:%M")
    );

    html
}

/// One panel of a comparison page
#[derive(Debug, Clone)]
pub struct ComparisonSide<'a> {
    pub heading: String,
    pub details: String,
    pub content: Option<&'a str>,
    /// Highlights the panel as the live entry
    pub current: bool,
}

/// Side-by-side comparison of two snapshots with a change list below
#[derive(Debug, Clone)]
pub struct ComparisonPage<'a> {
    /// "Compare Versions" or "Compare with Current"
    pub kind: &'a str,
    pub entry_title: &'a str,
    pub notebook: &'a str,
    pub left: ComparisonSide<'a>,
    pub right: ComparisonSide<'a>,
    /// Already rendered, escaped diff markup
    pub diff_html: String,
    pub legend: &'a str,
}

impl ComparisonPage<'_> {
    pub fn render(&self) -> String {
        let title = escape_html(self.entry_title);
        let notebook = escape_html(self.notebook);
        let kind = escape_html(self.kind);

        let mut html = String::new();
        let _ = write!(
            html,
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{kind}: {title}</title>
    <style>{COMPARE_STYLE}    </style>
</head>
<body>
    <div class="header">
        <h1>{kind}: {title}</h1>
        <p>Entry: {title} | Notebook: {notebook}</p>
    </div>

    <div class="comparison-container">"#
        );

        for side in [&self.left, &self.right] {
            let class = if side.current {
                "version-panel current-version"
            } else {
                "version-panel"
            };
            let content = match side.content {
                Some(content) if !content.is_empty() => content,
                _ => "<p><em>No content</em></p>",
            };
            let _ = write!(
                html,
                r#"
        <div class="{class}">
            <div class="version-header">
                <h3>{}</h3>
                <small>{}</small>
            </div>
            <div class="version-content">
                {content}
            </div>
        </div>"#,
                escape_html(&side.heading),
                escape_html(&side.details)
            );
        }

        let _ = write!(
            html,
            r#"
    </div>

    <div class="diff-container">
        <div class="diff-title">
            <h3>Change Highlights</h3>
            <small>{}</small>
        </div>
        <div class="diff-content">
            {}
        </div>
    </div>
</body>
</html>
"#,
            escape_html(self.legend),
            self.diff_html
        );

        html
    }
}

/// Page shown in place of a PDF when rendering fails
pub fn render_failure_page(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>PDF Export Failed</title>
</head>
<body>
    <h1>PDF Export Failed</h1>
    <p>Error: {}</p>
    <p>Install wkhtmltopdf or set <code>journo config renderer PATH</code> to a compatible renderer.</p>
</body>
</html>
"#,
        escape_html(message)
    )
}
