//! Markdown export

use super::EntrySheet;
use crate::domain::text;
use chrono::NaiveDateTime;
use regex::{Captures, Regex};
use std::fmt::Write as _;
use std::sync::OnceLock;

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

fn rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            (r"(?i)<br\s*/?>", "\n"),
            (r"(?i)<p(?:\s[^>]*)?>", "\n"),
            (r"(?i)</p>", "\n\n"),
            (r"(?i)</h[1-6]>", "\n\n"),
            (r"(?i)<(?:strong|b)(?:\s[^>]*)?>|</(?:strong|b)>", "**"),
            (r"(?i)<(?:em|i)(?:\s[^>]*)?>|</(?:em|i)>", "*"),
        ]
        .into_iter()
        .map(|(pattern, replacement)| Rule {
            pattern: Regex::new(pattern).unwrap(),
            replacement,
        })
        .collect()
    })
}

fn heading_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?i)<h([1-6])(?:\s[^>]*)?>").unwrap())
}

fn any_tag_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"<[^>]+>").unwrap())
}

fn blank_lines_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\n\s*\n").unwrap())
}

/// Convert rich-text content to Markdown.
///
/// Headings, bold and italic survive; every other tag is dropped.
pub fn html_to_markdown(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let mut converted = heading_regex()
        .replace_all(html, |caps: &Captures<'_>| {
            let level: usize = caps[1].parse().unwrap_or(1);
            format!("\n{} ", "#".repeat(level))
        })
        .into_owned();

    for rule in rules() {
        converted = rule
            .pattern
            .replace_all(&converted, rule.replacement)
            .into_owned();
    }

    let stripped = any_tag_regex().replace_all(&converted, "");
    let decoded = match text::decode_entities(&stripped) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            tracing::warn!("Exporting undecoded Markdown content: {}", e);
            stripped.into_owned()
        }
    };

    blank_lines_regex()
        .replace_all(&decoded, "\n\n")
        .trim()
        .to_string()
}

/// Render the full Markdown document for an entry
pub fn render_markdown(sheet: &EntrySheet<'_>, exported_at: NaiveDateTime) -> String {
    let entry = sheet.entry;
    let mut md = String::new();

    let _ = write!(md, "# {}\n\n", entry.title);

    md.push_str("## Metadata\n\n");
    let _ = writeln!(md, "- **Date:** {}", entry.entry_date.format("%Y-%m-%d"));
    let _ = writeln!(md, "- **Notebook:** {}", sheet.notebook);
    if !sheet.tags.is_empty() {
        let _ = writeln!(md, "- **Tags:** {}", sheet.tags.join(", "));
    }
    if let Some(mood) = entry.mood {
        let _ = writeln!(md, "- **Mood:** {}", mood.label());
    }
    let _ = writeln!(md, "- **Status:** {}", entry.state.label());
    if entry.favorite {
        md.push_str("- **Favorite:** ⭐\n");
    }
    let _ = writeln!(md, "- **Words:** {}", entry.word_count);
    let _ = writeln!(md, "- **Characters:** {}", entry.char_count);
    let _ = writeln!(md, "- **Version:** {}", entry.display_version());

    md.push_str("\n## Content\n\n");
    md.push_str(&html_to_markdown(entry.content.as_deref().unwrap_or("")));

    let _ = write!(
        md,
        "\n\n---\n*Exported from Journal on {}*",
        exported_at.format("%Y-%m-%d %H:%M")
    );

    md
}
