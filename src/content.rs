//! Page content extraction: readable text, title and outbound links.
//!
//! Text extraction drops non-content elements (scripts, styles, navigation,
//! page chrome) before parsing, then joins the remaining text nodes one per
//! line and collapses runs of blank lines.

use scraper::{Html, Selector};
use url::Url;

use crate::safety;
use crate::types::PageLink;

/// Default maximum characters of extracted text.
pub const DEFAULT_MAX_CHARS: usize = 100_000;

/// Appended to text cut at the character limit.
pub const TRUNCATION_MARKER: &str = "\n\n[Content truncated]";

/// Elements removed, with their content, before text extraction.
const BOILERPLATE_TAGS: &[&str] = &[
    "script", "style", "nav", "footer", "header", "aside", "noscript", "svg", "iframe",
];

/// Readable text of `html`, at most `max_chars` characters plus the
/// truncation marker. Empty when the page has no visible text.
pub fn extract_text(html: &str, max_chars: usize) -> String {
    let cleaned = strip_boilerplate_tags(html);
    let document = Html::parse_document(&cleaned);

    let joined = document
        .root_element()
        .text()
        .map(str::trim)
        .filter(|node| !node.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    truncate_to_limit(&collapse_blank_lines(&joined), max_chars)
}

/// Text of the first `<title>` element, trimmed. Empty when missing.
pub fn extract_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default()
        .trim()
        .to_owned()
}

/// Every anchor on the page resolved against `base`, keeping only targets
/// that pass [`safety::is_safe`]. Document order is preserved.
pub fn extract_links(document: &Html, base: &Url) -> Vec<PageLink> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?.trim();
            let resolved = base.join(href).ok()?;
            if !safety::is_safe(&resolved) {
                return None;
            }
            let text = anchor
                .text()
                .flat_map(str::split_whitespace)
                .collect::<Vec<_>>()
                .join(" ");
            Some(PageLink {
                text,
                url: resolved.to_string(),
            })
        })
        .collect()
}

/// Remove boilerplate elements and everything inside them.
fn strip_boilerplate_tags(html: &str) -> String {
    BOILERPLATE_TAGS
        .iter()
        .fold(html.to_owned(), |acc, tag| strip_tag(&acc, tag))
}

/// Remove every `<tag ...>...</tag>`, matching the tag name case-insensitively.
fn strip_tag(html: &str, tag: &str) -> String {
    let mut result = String::with_capacity(html.len());
    // ASCII lowercasing keeps byte offsets aligned with `html`.
    let lower = html.to_ascii_lowercase();
    let open_tag = format!("<{tag}");
    let close_tag = format!("</{tag}>");

    let mut pos = 0;
    loop {
        let Some(offset) = lower[pos..].find(&open_tag) else {
            result.push_str(&html[pos..]);
            break;
        };
        let start = pos + offset;
        let after_tag = start + open_tag.len();

        // `<nav` must not match `<navigate>`.
        if let Some(&next) = lower.as_bytes().get(after_tag) {
            if !matches!(next, b' ' | b'>' | b'/' | b'\n' | b'\r' | b'\t') {
                result.push_str(&html[pos..after_tag]);
                pos = after_tag;
                continue;
            }
        }

        result.push_str(&html[pos..start]);

        pos = match lower[start..].find(&close_tag) {
            Some(offset) => start + offset + close_tag.len(),
            None => match lower[start..].find('>') {
                Some(offset) => start + offset + 1,
                None => html.len(),
            },
        };
    }

    result
}

/// Trim every line and squeeze each run of blank lines to a single blank line.
fn collapse_blank_lines(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut previous_blank = true;

    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            if !previous_blank {
                lines.push("");
            }
            previous_blank = true;
        } else {
            lines.push(line);
            previous_blank = false;
        }
    }

    while lines.last() == Some(&"") {
        lines.pop();
    }
    lines.join("\n")
}

/// Cut `text` after `max_chars` characters and append [`TRUNCATION_MARKER`].
pub fn truncate_to_limit(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_owned(),
        Some((end, _)) => {
            let mut truncated = text[..end].to_owned();
            truncated.push_str(TRUNCATION_MARKER);
            truncated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(html: &str) -> String {
        extract_text(html, DEFAULT_MAX_CHARS)
    }

    #[test]
    fn title_extracted_and_trimmed() {
        let doc = Html::parse_document("<html><head><title>  My Page  </title></head></html>");
        assert_eq!(extract_title(&doc), "My Page");
    }

    #[test]
    fn missing_title_is_empty() {
        let doc = Html::parse_document("<html><body>Content</body></html>");
        assert!(extract_title(&doc).is_empty());
    }

    #[test]
    fn boilerplate_removed_from_text() {
        let html = r#"<html><body>
            <header>Site header</header>
            <nav>Home | About</nav>
            <main><p>Main content</p></main>
            <aside>Sidebar</aside>
            <script>var x = 1;</script>
            <style>.a { color: red; }</style>
            <footer>Copyright</footer>
        </body></html>"#;
        let text = text_of(html);
        assert!(text.contains("Main content"));
        for gone in ["Site header", "Home | About", "Sidebar", "var x", "color: red", "Copyright"] {
            assert!(!text.contains(gone), "{gone} should be stripped");
        }
    }

    #[test]
    fn similar_tag_names_survive() {
        let html = "<html><body><nav>Skip</nav><navigate>Keep navigate text</navigate></body></html>";
        let text = text_of(html);
        assert!(!text.contains("Skip"));
        assert!(text.contains("Keep navigate text"));
    }

    #[test]
    fn uppercase_tags_stripped() {
        let text = text_of("<html><body><SCRIPT>alert(1)</SCRIPT><p>Visible</p></body></html>");
        assert_eq!(text, "Visible");
    }

    #[test]
    fn text_nodes_on_separate_lines() {
        let text = text_of("<html><body><h1>Heading</h1><p>First</p><p>Second</p></body></html>");
        assert_eq!(text, "Heading\nFirst\nSecond");
    }

    #[test]
    fn whitespace_between_tags_adds_no_blank_lines() {
        let html = "<html><body>\n  <h1>Heading</h1>\n  <div>\n    <p>First</p>\n\n    <p>Second</p>\n  </div>\n</body></html>";
        assert_eq!(text_of(html), "Heading\nFirst\nSecond");
    }

    #[test]
    fn blank_line_runs_collapse_to_one() {
        let text = text_of("<html><body><pre>Word1\n\n\n\n\nWord3</pre></body></html>");
        assert_eq!(text, "Word1\n\nWord3");
    }

    #[test]
    fn collapse_trims_edges() {
        assert_eq!(collapse_blank_lines("\n\n  a  \n \n\n b\n\n"), "a\n\nb");
    }

    #[test]
    fn empty_page_has_empty_text() {
        assert!(text_of("").is_empty());
        assert!(text_of("<html><body><script>x()</script></body></html>").is_empty());
    }

    #[test]
    fn truncation_counts_characters() {
        let text = "é".repeat(10);
        let truncated = truncate_to_limit(&text, 4);
        assert_eq!(truncated, format!("éééé{TRUNCATION_MARKER}"));
        assert_eq!(truncate_to_limit(&text, 10), text);
    }

    #[test]
    fn long_page_truncated_at_limit() {
        let html = format!("<html><body><p>{}</p></body></html>", "lorem ".repeat(1000));
        let text = extract_text(&html, 100);
        assert!(text.ends_with("[Content truncated]"));
        assert_eq!(text.chars().count(), 100 + TRUNCATION_MARKER.chars().count());
    }

    #[test]
    fn links_resolved_and_filtered() {
        let html = r#"<html><body>
            <a href="/docs/intro">Intro  docs</a>
            <a href="https://other.example.org/page">Other</a>
            <a href="http://127.0.0.1/admin">Admin</a>
            <a href="javascript:void(0)">Click</a>
            <a href="mailto:a@example.com">Mail</a>
            <a href="../up">Up</a>
        </body></html>"#;
        let doc = Html::parse_document(html);
        let base = Url::parse("https://example.com/guide/start").expect("base url");
        let links = extract_links(&doc, &base);

        let urls: Vec<&str> = links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://example.com/docs/intro",
                "https://other.example.org/page",
                "https://example.com/up"
            ]
        );
        assert_eq!(links[0].text, "Intro docs");
    }
}
