//! Result page parsers, one per search engine plus a generic fallback.
//!
//! Each strategy is a pure function from raw result-page HTML to at most
//! `max_results` [`SearchResult`]s. Entries missing a title or link are
//! skipped. The registry below maps an engine to its strategy; anything
//! without a dedicated parser goes to [`generic::parse_generic_html`].

pub mod baidu;
pub mod bing;
pub mod duckduckgo;
pub mod generic;
pub mod google;

use scraper::{ElementRef, Selector};

use crate::error::{ResearchError, Result};
use crate::types::{SearchEngine, SearchResult};

/// Signature shared by every parsing strategy.
pub type ParseFn = fn(&str, usize) -> Result<Vec<SearchResult>>;

/// The dedicated strategy for `engine`.
pub fn strategy_for(engine: SearchEngine) -> ParseFn {
    match engine {
        SearchEngine::Baidu => baidu::parse_baidu_html,
        SearchEngine::Google => google::parse_google_html,
        SearchEngine::Bing => bing::parse_bing_html,
        SearchEngine::DuckDuckGo => duckduckgo::parse_duckduckgo_html,
    }
}

/// Strategy lookup by identifier. Unregistered names get the generic scraper.
pub fn strategy_for_name(name: &str) -> ParseFn {
    SearchEngine::parse(name).map_or(generic::parse_generic_html as ParseFn, strategy_for)
}

/// Run the engine's strategy, falling back to the generic scraper when it
/// finds nothing.
///
/// # Errors
///
/// Returns [`ResearchError::ParseEmpty`] when both strategies come back
/// empty, so a retry loop can try the page again.
pub fn parse_with_fallback(
    engine: SearchEngine,
    html: &str,
    max_results: usize,
) -> Result<Vec<SearchResult>> {
    if max_results == 0 {
        return Ok(Vec::new());
    }

    let results = strategy_for(engine)(html, max_results)?;
    if !results.is_empty() {
        return Ok(results);
    }

    tracing::debug!(%engine, "engine parser found nothing, trying generic");
    let results = generic::parse_generic_html(html, max_results)?;
    if results.is_empty() {
        return Err(ResearchError::ParseEmpty(format!(
            "{engine} result page had no usable entries"
        )));
    }
    Ok(results)
}

/// Compile a CSS selector, mapping failures to [`ResearchError::Parse`].
pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ResearchError::Parse(format!("invalid selector {css:?}: {e:?}")))
}

/// Visible text of an element with whitespace runs collapsed.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const BING_PAGE: &str = r#"<html><body><ol>
<li class="b_algo"><h2><a href="https://www.rust-lang.org/">Rust</a></h2>
<div class="b_caption"><p>Reliable software.</p></div></li>
</ol></body></html>"#;

    const LINKS_ONLY_PAGE: &str = r#"<html><body>
<a href="https://docs.example.org/guide">Example guide</a>
<a href="https://news.example.net/story">Breaking story</a>
</body></html>"#;

    #[test]
    fn every_engine_has_a_strategy() {
        for engine in SearchEngine::all() {
            let parse = strategy_for(*engine);
            assert!(parse("<html></html>", 5).expect("parse").is_empty());
        }
    }

    #[test]
    fn unknown_name_routes_to_generic() {
        let parse = strategy_for_name("altavista");
        let results = parse(LINKS_ONLY_PAGE, 10).expect("parse");
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.source == "generic"));
    }

    #[test]
    fn known_name_routes_to_engine_parser() {
        let parse = strategy_for_name("bing");
        let results = parse(BING_PAGE, 10).expect("parse");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].source, "bing");
    }

    #[test]
    fn fallback_used_when_engine_parser_is_empty() {
        let results = parse_with_fallback(SearchEngine::Baidu, LINKS_ONLY_PAGE, 10).expect("parse");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].source, "generic");
    }

    #[test]
    fn engine_results_take_priority() {
        let results = parse_with_fallback(SearchEngine::Bing, BING_PAGE, 10).expect("parse");
        assert_eq!(results[0].source, "bing");
    }

    #[test]
    fn both_empty_is_parse_empty() {
        let err = parse_with_fallback(SearchEngine::Google, "<html><body></body></html>", 10)
            .unwrap_err();
        assert!(matches!(err, ResearchError::ParseEmpty(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn zero_max_results_short_circuits() {
        let results = parse_with_fallback(SearchEngine::Bing, BING_PAGE, 0).expect("parse");
        assert!(results.is_empty());
    }

    #[test]
    fn invalid_selector_is_parse_error() {
        assert!(matches!(selector("div[["), Err(ResearchError::Parse(_))));
    }
}
