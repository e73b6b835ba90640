//! Markdown input for entry content

use pulldown_cmark::{html, Options, Parser};

/// Convert Markdown written on the command line or in a file to the rich
/// text stored on entries. Blank input stays empty.
pub fn markdown_to_html(markdown: &str) -> String {
    if markdown.trim().is_empty() {
        return String::new();
    }

    let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::text::{self, TextStats};

    #[test]
    fn test_paragraphs_and_emphasis() {
        assert_eq!(
            markdown_to_html("Hello **bold** and *soft*"),
            "<p>Hello <strong>bold</strong> and <em>soft</em></p>"
        );
    }

    #[test]
    fn test_headings_and_lists() {
        let html = markdown_to_html("# Day\n\n- one\n- two");
        assert!(html.starts_with("<h1>Day</h1>"));
        assert!(html.contains("<li>one</li>"));
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(markdown_to_html("  \n"), "");
    }

    #[test]
    fn test_counts_match_plain_text() {
        let html = markdown_to_html("Hello world");
        assert_eq!(
            text::analyze(Some(&html)),
            TextStats {
                word_count: 2,
                char_count: 11
            }
        );
    }
}
