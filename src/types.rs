//! Core types for queries, search results and page snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source tag for results produced by the engine-agnostic link scraper.
pub const GENERIC_SOURCE: &str = "generic";

/// Supported search engine backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchEngine {
    /// Baidu, the default backend.
    Baidu,
    /// Google. Aggressive bot detection, parsing is best-effort.
    Google,
    /// Bing.
    Bing,
    /// DuckDuckGo, queried through its script-free HTML endpoint.
    #[serde(rename = "duckduckgo")]
    DuckDuckGo,
}

impl SearchEngine {
    /// Lowercase identifier used in cache keys and result `source` tags.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Baidu => "baidu",
            Self::Google => "google",
            Self::Bing => "bing",
            Self::DuckDuckGo => "duckduckgo",
        }
    }

    /// Parse an engine identifier, case-insensitively. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "baidu" => Some(Self::Baidu),
            "google" => Some(Self::Google),
            "bing" => Some(Self::Bing),
            "duckduckgo" | "ddg" => Some(Self::DuckDuckGo),
            _ => None,
        }
    }

    /// Result page template; `{query}` is replaced by the URL-encoded query text.
    pub fn query_template(&self) -> &'static str {
        match self {
            Self::Baidu => "https://www.baidu.com/s?wd={query}",
            Self::Google => "https://www.google.com/search?q={query}",
            Self::Bing => "https://www.bing.com/search?q={query}",
            Self::DuckDuckGo => "https://html.duckduckgo.com/html/?q={query}",
        }
    }

    /// Build the result page URL for `query`.
    pub fn search_url(&self, query: &str) -> String {
        self.query_template()
            .replace("{query}", &urlencoding::encode(query))
    }

    /// Returns all available engine variants.
    pub fn all() -> &'static [SearchEngine] {
        &[Self::Baidu, Self::Google, Self::Bing, Self::DuckDuckGo]
    }
}

impl fmt::Display for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A search request.
///
/// `engine: None` means "use the configured default backend"; see
/// [`SearchQuery::with_engine_name`] for how unknown identifiers land there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Free-text query.
    pub text: String,
    /// Backend to query, or `None` for the configured default.
    pub engine: Option<SearchEngine>,
    /// Upper bound on returned results.
    pub max_results: usize,
    /// Whether a cached result set may satisfy this query.
    pub use_cache: bool,
}

impl SearchQuery {
    /// Default result bound when none is given.
    pub const DEFAULT_MAX_RESULTS: usize = 10;

    /// A query against the default engine with default bounds and caching on.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            engine: None,
            max_results: Self::DEFAULT_MAX_RESULTS,
            use_cache: true,
        }
    }

    /// Select a specific engine.
    pub fn with_engine(mut self, engine: SearchEngine) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Select an engine by identifier; unrecognised names fall back to the default.
    pub fn with_engine_name(mut self, name: &str) -> Self {
        self.engine = SearchEngine::parse(name);
        self
    }

    /// Set the result bound.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Enable or disable the cache for this call.
    pub fn with_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }
}

/// A single parsed search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result title (visible link text).
    pub title: String,
    /// Target URL.
    pub url: String,
    /// Snippet shown under the result, empty when absent.
    pub description: String,
    /// Engine name, or [`GENERIC_SOURCE`] for the fallback scraper.
    pub source: String,
}

/// Successful search outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub query: String,
    pub engine: SearchEngine,
    /// Set when the results came from the response cache.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub cached: bool,
}

/// An outbound link found on a fetched page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    pub text: String,
    pub url: String,
}

/// What was retrieved from a single URL.
///
/// `text` and `links` are present only when the caller asked for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub url: String,
    pub status: u16,
    /// Length of the raw response body in characters.
    pub content_length: usize,
    /// Text of the `<title>` element, empty when missing.
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<PageLink>>,
    pub fetched_at: DateTime<Utc>,
}

/// Per-call switches for [`crate::WebResearcher::fetch_page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    pub extract_text: bool,
    pub extract_links: bool,
    pub use_cache: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            extract_text: true,
            extract_links: false,
            use_cache: true,
        }
    }
}

/// Successful fetch outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchResponse {
    #[serde(flatten)]
    pub snapshot: PageSnapshot,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub cached: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_names_are_lowercase_tags() {
        assert_eq!(SearchEngine::Baidu.to_string(), "baidu");
        assert_eq!(SearchEngine::DuckDuckGo.name(), "duckduckgo");
    }

    #[test]
    fn engine_parse_is_case_insensitive() {
        assert_eq!(SearchEngine::parse("Google"), Some(SearchEngine::Google));
        assert_eq!(SearchEngine::parse(" BING "), Some(SearchEngine::Bing));
        assert_eq!(SearchEngine::parse("ddg"), Some(SearchEngine::DuckDuckGo));
        assert_eq!(SearchEngine::parse("yandex"), None);
    }

    #[test]
    fn search_url_encodes_query() {
        let url = SearchEngine::Baidu.search_url("rust async & tokio");
        assert_eq!(url, "https://www.baidu.com/s?wd=rust%20async%20%26%20tokio");
    }

    #[test]
    fn search_url_encodes_non_ascii() {
        let url = SearchEngine::Bing.search_url("天气");
        assert_eq!(url, "https://www.bing.com/search?q=%E5%A4%A9%E6%B0%94");
    }

    #[test]
    fn unknown_engine_name_defers_to_default() {
        let query = SearchQuery::new("weather").with_engine_name("altavista");
        assert_eq!(query.engine, None);
        let query = SearchQuery::new("weather").with_engine_name("bing");
        assert_eq!(query.engine, Some(SearchEngine::Bing));
    }

    #[test]
    fn query_defaults() {
        let query = SearchQuery::new("x");
        assert_eq!(query.max_results, 10);
        assert!(query.use_cache);
    }

    #[test]
    fn engine_serde_uses_lowercase() {
        let json = serde_json::to_string(&SearchEngine::DuckDuckGo).expect("serialize");
        assert_eq!(json, "\"duckduckgo\"");
        let decoded: SearchEngine = serde_json::from_str("\"baidu\"").expect("deserialize");
        assert_eq!(decoded, SearchEngine::Baidu);
    }

    #[test]
    fn fetch_response_flattens_snapshot_and_hides_false_cached() {
        let response = FetchResponse {
            snapshot: PageSnapshot {
                url: "https://example.com".into(),
                status: 200,
                content_length: 12,
                title: String::new(),
                text: None,
                links: None,
                fetched_at: Utc::now(),
            },
            cached: false,
        };
        let value = serde_json::to_value(&response).expect("serialize");
        assert_eq!(value["url"], "https://example.com");
        assert!(value.get("cached").is_none());
        assert!(value.get("text").is_none());
    }
}
