//! Engine-agnostic link scraper.
//!
//! Used for engines without a dedicated parser and as the fallback when a
//! dedicated parser finds nothing. Every anchor on the page is a candidate;
//! only absolute `http(s)` links off the known search-engine hosts with more
//! than three characters of visible text are kept. Precision is low but it
//! keeps working when an engine reshuffles its markup.

use scraper::Html;
use url::Url;

use super::{element_text, selector};
use crate::error::Result;
use crate::types::{SearchResult, GENERIC_SOURCE};

/// Hosts (and their subdomains) whose links are never results.
const SEARCH_ENGINE_HOSTS: &[&str] = &["google.com", "bing.com", "baidu.com", "duckduckgo.com"];

/// Minimum visible link text length, exclusive.
const MIN_LINK_TEXT_CHARS: usize = 3;

/// Scrape plausible result links from any page.
pub fn parse_generic_html(html: &str, max_results: usize) -> Result<Vec<SearchResult>> {
    let document = Html::parse_document(html);
    let anchor_sel = selector("a[href]")?;

    let mut results = Vec::new();

    for anchor in document.select(&anchor_sel) {
        if results.len() >= max_results {
            break;
        }

        let Some(href) = anchor.value().attr("href").map(str::trim) else {
            continue;
        };
        if !is_external_result_link(href) {
            continue;
        }

        let text = element_text(anchor);
        if text.chars().count() <= MIN_LINK_TEXT_CHARS {
            continue;
        }

        results.push(SearchResult {
            title: text,
            url: href.to_owned(),
            description: String::new(),
            source: GENERIC_SOURCE.to_owned(),
        });
    }

    tracing::debug!(count = results.len(), "generic results parsed");
    Ok(results)
}

fn is_external_result_link(href: &str) -> bool {
    let Ok(url) = Url::parse(href) else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }
    let Some(host) = url.host_str() else {
        return false;
    };
    let host = host.to_ascii_lowercase();
    !SEARCH_ENGINE_HOSTS
        .iter()
        .any(|engine| host == *engine || host.ends_with(&format!(".{engine}")))
}
