//! Google result page parser.
//!
//! Google's markup changes often and the script-free page wraps result
//! links as `/url?q=<target>&sa=...`; those are unwrapped to the target.
//! Parsing is best-effort.

use scraper::Html;
use url::Url;

use super::{element_text, selector};
use crate::error::Result;
use crate::types::{SearchEngine, SearchResult};

/// Parse a Google result page.
pub fn parse_google_html(html: &str, max_results: usize) -> Result<Vec<SearchResult>> {
    let document = Html::parse_document(html);

    let result_sel = selector("div.g")?;
    let title_sel = selector("h3")?;
    let link_sel = selector("a[href]")?;
    let desc_sel = selector(".VwiC3b")?;

    let mut results = Vec::new();

    for element in document.select(&result_sel) {
        if results.len() >= max_results {
            break;
        }

        let Some(title_el) = element.select(&title_sel).next() else {
            continue;
        };
        let Some(href) = element
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            continue;
        };

        let title = element_text(title_el);
        let url = unwrap_redirect(href.trim());
        if title.is_empty() || url.is_empty() {
            continue;
        }

        let description = element
            .select(&desc_sel)
            .next()
            .map(element_text)
            .unwrap_or_default();

        results.push(SearchResult {
            title,
            url,
            description,
            source: SearchEngine::Google.name().to_owned(),
        });
    }

    tracing::debug!(count = results.len(), "Google results parsed");
    Ok(results)
}

/// `/url?q=https://target&sa=U` → `https://target`. Other hrefs pass through.
fn unwrap_redirect(href: &str) -> String {
    if href.starts_with("/url?") {
        let wrapped = format!("https://www.google.com{href}");
        if let Ok(parsed) = Url::parse(&wrapped) {
            if let Some((_, target)) = parsed.query_pairs().find(|(k, _)| k == "q" || k == "url") {
                return target.into_owned();
            }
        }
    }
    href.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_GOOGLE_HTML: &str = r#"<!DOCTYPE html>
<html><body><div id="search">
<div class="g">
  <a href="https://www.rust-lang.org/"><h3>Rust Programming Language</h3></a>
  <div class="VwiC3b">A language empowering everyone.</div>
</div>
<div class="g">
  <a href="/url?q=https://doc.rust-lang.org/book/&amp;sa=U&amp;ved=xyz"><h3>The Book</h3></a>
</div>
<div class="g">
  <div class="VwiC3b">No title, skipped.</div>
  <a href="https://skipped.example.com/">link</a>
</div>
<div class="g">
  <h3>No link, skipped</h3>
</div>
</div></body></html>"#;

    #[test]
    fn parse_mock_html_returns_results() {
        let results = parse_google_html(MOCK_GOOGLE_HTML, 10).expect("should parse");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Rust Programming Language");
        assert_eq!(results[0].url, "https://www.rust-lang.org/");
        assert_eq!(results[0].description, "A language empowering everyone.");
        assert_eq!(results[0].source, "google");
    }

    #[test]
    fn redirect_links_unwrapped() {
        let results = parse_google_html(MOCK_GOOGLE_HTML, 10).expect("should parse");
        assert_eq!(results[1].url, "https://doc.rust-lang.org/book/");
        assert!(results[1].description.is_empty());
    }

    #[test]
    fn parse_respects_max_results() {
        let results = parse_google_html(MOCK_GOOGLE_HTML, 1).expect("should parse");
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn unwrap_leaves_direct_links() {
        assert_eq!(unwrap_redirect("https://example.com/a"), "https://example.com/a");
    }
}
