//! Bing result page parser.
//!
//! Organic results are `li.b_algo` containers with the title link under
//! `h2` and the snippet in `.b_caption p` (or `.b_lineclamp2` on newer
//! layouts).

use scraper::Html;

use super::{element_text, selector};
use crate::error::Result;
use crate::types::{SearchEngine, SearchResult};

/// Parse a Bing result page.
pub fn parse_bing_html(html: &str, max_results: usize) -> Result<Vec<SearchResult>> {
    let document = Html::parse_document(html);

    let result_sel = selector("li.b_algo")?;
    let title_sel = selector("h2")?;
    let link_sel = selector("a")?;
    let snippet_sel = selector(".b_caption p, .b_lineclamp2")?;

    let mut results = Vec::new();

    for element in document.select(&result_sel) {
        if results.len() >= max_results {
            break;
        }

        let Some(title_el) = element.select(&title_sel).next() else {
            continue;
        };

        let title = element_text(title_el);
        if title.is_empty() {
            continue;
        }

        let url = match title_el
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
        {
            Some(u) if !u.trim().is_empty() => u.trim().to_owned(),
            _ => continue,
        };

        let description = element
            .select(&snippet_sel)
            .next()
            .map(element_text)
            .unwrap_or_default();

        results.push(SearchResult {
            title,
            url,
            description,
            source: SearchEngine::Bing.name().to_owned(),
        });
    }

    tracing::debug!(count = results.len(), "Bing results parsed");
    Ok(results)
}
