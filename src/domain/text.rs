//! Rich-text normalization: plain text, counts and search text
//!
//! Entry content is stored as HTML produced by a rich-text editor. Everything
//! that counts, indexes, diffs or exports that content goes through here.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

fn block_tag_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?i)</(?:p|div|br|li|h[1-6])>|<(?:p|div|br|li|h[1-6])[^>]*/?>").unwrap()
    })
}

fn any_tag_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"<[^>]+>").unwrap())
}

fn line_break_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?i)</?p(?:\s[^>]*)?>|<br\s*/?>").unwrap())
}

fn whitespace_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\s+").unwrap())
}

fn entity_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[A-Za-z][A-Za-z0-9]*);").unwrap())
}

/// Failure inside the careful normalization pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextError(String);

impl fmt::Display for TextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for TextError {}

/// Word and character counts of a piece of content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStats {
    pub word_count: usize,
    pub char_count: usize,
}

impl TextStats {
    /// Count an already-normalized plain-text string
    pub fn of_plain(text: &str) -> Self {
        if text.is_empty() {
            return TextStats::default();
        }

        let without_punctuation: String =
            text.chars().filter(|c| !c.is_ascii_punctuation()).collect();

        TextStats {
            word_count: without_punctuation.split_whitespace().count(),
            char_count: text.chars().count(),
        }
    }
}

/// Compute word/char counts for rich-text content.
///
/// Never fails: when the careful pass errors, a cruder strip-and-collapse
/// pass is used instead and the failure is logged.
pub fn analyze(content: Option<&str>) -> TextStats {
    let Some(content) = content.filter(|c| !c.is_empty()) else {
        return TextStats::default();
    };

    match normalize(content) {
        Ok(text) => TextStats::of_plain(&text),
        Err(e) => {
            tracing::error!("Error computing word count: {}", e);
            TextStats::of_plain(&crude_normalize(content))
        }
    }
}

/// Block-aware conversion of HTML to a single line of plain text.
pub fn normalize(html: &str) -> Result<String, TextError> {
    let spaced = block_tag_regex().replace_all(html, " ");
    let stripped = any_tag_regex().replace_all(&spaced, "");
    let decoded = decode_entities(&stripped)?;
    Ok(collapse_whitespace(&decoded))
}

/// Strip tags and collapse whitespace, nothing else
pub fn crude_normalize(html: &str) -> String {
    let stripped = any_tag_regex().replace_all(html, " ");
    collapse_whitespace(&stripped)
}

/// Lowercased plain text used by the search index
pub fn search_text(html: &str) -> String {
    let stripped = any_tag_regex().replace_all(html, " ");
    let decoded = decode_entities(&stripped).unwrap_or_else(|e| {
        tracing::warn!("Falling back to raw text for search index: {}", e);
        Cow::Owned(stripped.to_string())
    });
    collapse_whitespace(&decoded).to_lowercase()
}

/// Multi-line plain text used for diffing: paragraphs and line breaks
/// become newlines, other tags disappear.
pub fn to_lines(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }
    let broken = line_break_regex().replace_all(html, "\n");
    let stripped = any_tag_regex().replace_all(&broken, "");
    match decode_entities(&stripped) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            tracing::warn!("Diffing undecoded text: {}", e);
            stripped.into_owned()
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    whitespace_regex().replace_all(text, " ").trim().to_string()
}

/// Decode HTML character references.
///
/// Unknown named references are kept verbatim; numeric references that do
/// not name a valid character are an error.
pub fn decode_entities(text: &str) -> Result<Cow<'_, str>, TextError> {
    if !text.contains('&') {
        return Ok(Cow::Borrowed(text));
    }

    let mut output = String::with_capacity(text.len());
    let mut last = 0;

    for captures in entity_regex().captures_iter(text) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        output.push_str(&text[last..whole.start()]);
        output.push_str(&resolve_reference(&captures)?);
        last = whole.end();
    }
    output.push_str(&text[last..]);

    Ok(Cow::Owned(output))
}

fn resolve_reference(captures: &Captures<'_>) -> Result<String, TextError> {
    let name = &captures[1];

    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => number.parse::<u32>(),
        }
        .map_err(|_| TextError(format!("Character reference out of range: &{};", name)))?;

        return char::from_u32(code)
            .filter(|c| *c != '\0')
            .map(String::from)
            .ok_or_else(|| TextError(format!("Invalid character reference: &{};", name)));
    }

    // Full HTML5 named reference table; unknown names stay as written
    Ok(quick_xml::escape::resolve_html5_entity(name)
        .map(str::to_string)
        .unwrap_or_else(|| captures[0].to_string()))
}

/// Escape user text for inclusion in generated markup
pub fn escape_html(text: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_paragraph_counts() {
        let stats = analyze(Some("<p>Hello world</p>"));
        assert_eq!(stats.word_count, 2);
        assert_eq!(stats.char_count, 11);
    }

    #[test]
    fn test_empty_and_absent_content() {
        assert_eq!(analyze(None), TextStats::default());
        assert_eq!(analyze(Some("")), TextStats::default());
        assert_eq!(analyze(Some("<p></p><br/>")), TextStats::default());
    }

    #[test]
    fn test_block_tags_separate_words() {
        let stats = analyze(Some("<h1>Title</h1><p>one</p><ul><li>two</li><li>three</li></ul>"));
        assert_eq!(stats.word_count, 4);
        assert_eq!(normalize("<p>one</p><p>two</p>").unwrap(), "one two");
    }

    #[test]
    fn test_inline_tags_do_not_split_words() {
        assert_eq!(normalize("<p>un<b>believ</b>able</p>").unwrap(), "unbelievable");
    }

    #[test]
    fn test_punctuation_excluded_from_words_only() {
        let stats = analyze(Some("<p>Hi , there !</p>"));
        assert_eq!(stats.word_count, 2);
        assert_eq!(stats.char_count, "Hi , there !".len());
    }

    #[test]
    fn test_entities_are_decoded() {
        assert_eq!(normalize("<p>Tom &amp; Jerry&#33;</p>").unwrap(), "Tom & Jerry!");
        assert_eq!(normalize("a&nbsp;&nbsp;b").unwrap(), "a b");
        assert_eq!(normalize("&#x41;&unknown;").unwrap(), "A&unknown;");
    }

    #[test]
    fn test_accented_named_references() {
        assert_eq!(normalize("<p>caf&eacute; cr&egrave;me</p>").unwrap(), "café crème");
        let stats = analyze(Some("<p>caf&eacute; cr&egrave;me</p>"));
        assert_eq!(stats.word_count, 2);
        assert_eq!(stats.char_count, 10);
        assert_eq!(normalize("&Uuml;ber &szlig; &alpha;&le;&beta;").unwrap(), "Über ß α≤β");
    }

    #[test]
    fn test_bare_ampersand_is_kept() {
        assert_eq!(normalize("<p>salt & pepper</p>").unwrap(), "salt & pepper");
    }

    #[test]
    fn test_invalid_reference_falls_back() {
        assert!(normalize("<p>bad &#xD800; ref</p>").is_err());
        let stats = analyze(Some("<p>bad &#xD800; ref</p>"));
        assert_eq!(stats.word_count, 3);
    }

    #[test]
    fn test_counts_are_idempotent_on_plain_output() {
        let html = "<h2>Morning</h2><p>Coffee, <em>then</em> a long walk.</p>";
        let plain = normalize(html).unwrap();
        assert_eq!(analyze(Some(html)), analyze(Some(&plain)));
    }

    #[test]
    fn test_char_count_counts_characters_not_bytes() {
        let stats = analyze(Some("<p>café ☕</p>"));
        assert_eq!(stats.char_count, 6);
        assert_eq!(stats.word_count, 2);
    }

    #[test]
    fn test_search_text_lowercases() {
        assert_eq!(search_text("<p>Hello <b>World</b></p>"), "hello world");
    }

    #[test]
    fn test_to_lines_breaks_paragraphs() {
        assert_eq!(to_lines("<p>a</p><p>b</p>"), "\na\n\nb\n");
        assert_eq!(to_lines("a<br>b<br/>c"), "a\nb\nc");
        assert_eq!(to_lines(""), "");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>\"x\" & 'y'</b>"), "&lt;b&gt;&quot;x&quot; &amp; &apos;y&apos;&lt;/b&gt;");
    }
}
