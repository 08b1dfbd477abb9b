//! DuckDuckGo result page parser.
//!
//! Queries go to the HTML-only endpoint `https://html.duckduckgo.com/html/`,
//! which needs no JavaScript. Result links are wrapped as
//! `//duckduckgo.com/l/?uddg=<encoded target>&rut=...` and are unwrapped.
//! Ads carry `result--ad` and are excluded.

use scraper::Html;
use url::Url;

use super::{element_text, selector};
use crate::error::Result;
use crate::types::{SearchEngine, SearchResult};

/// Extract the actual URL from DuckDuckGo's redirect wrapper.
fn extract_url(href: &str) -> Option<String> {
    let full_href = if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_owned()
    };

    let parsed = Url::parse(&full_href).ok()?;

    if parsed.host_str() == Some("duckduckgo.com") && parsed.path().starts_with("/l/") {
        parsed
            .query_pairs()
            .find(|(key, _)| key == "uddg")
            .map(|(_, value)| value.into_owned())
    } else {
        Some(full_href)
    }
}

/// Parse a DuckDuckGo HTML result page.
pub fn parse_duckduckgo_html(html: &str, max_results: usize) -> Result<Vec<SearchResult>> {
    let document = Html::parse_document(html);

    let result_sel = selector(
        ".result.results_links.results_links_deep:not(.result--ad), .web-result:not(.result--ad)",
    )?;
    let title_sel = selector(".result__a")?;
    let snippet_sel = selector(".result__snippet")?;

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

        let Some(url) = title_el.value().attr("href").and_then(extract_url) else {
            continue;
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
            source: SearchEngine::DuckDuckGo.name().to_owned(),
        });
    }

    tracing::debug!(count = results.len(), "DuckDuckGo results parsed");
    Ok(results)
}
