//! # web-research
//!
//! Turns a free-text query into a safety-checked, deduplicated set of
//! retrieved and summarised web content.
//!
//! ## Design
//!
//! - Scrapes Baidu, Google, Bing and DuckDuckGo result pages with CSS
//!   selectors, falling back to a generic link scraper when an engine's
//!   markup yields nothing
//! - Search requests are retried with linear backoff; page fetches are single-shot
//! - Search results and page snapshots are memoised in bounded LRU caches
//!   owned by each [`WebResearcher`]
//! - Multi-page collection runs sequentially with a pacing delay between fetches
//!
//! ## Security
//!
//! - Every fetched URL passes [`safety::is_safe_url`]: `http(s)` only, no
//!   loopback, private, link-local or unspecified literal addresses
//! - Query text is checked against a [`ContentPolicy`] before any network access
//! - Queries are logged only at debug/trace level

pub mod aggregate;
pub mod cache;
pub mod config;
pub mod content;
pub mod engine;
pub mod engines;
pub mod envelope;
pub mod error;
pub mod fetch;
pub mod http;
pub mod policy;
pub mod retry;
pub mod safety;
pub mod search;
pub mod test_utils;
pub mod types;
pub mod url_normalize;

pub use aggregate::{CollectedSource, CollectionReport, ResearchReport};
pub use config::ResearchConfig;
pub use engine::WebResearcher;
pub use error::{ResearchError, Result};
pub use http::{HttpResponse, HttpTransport, ReqwestTransport};
pub use policy::{AllowAll, ContentPolicy, KeywordFilter};
pub use retry::RetryPolicy;
pub use types::{
    FetchOptions, FetchResponse, PageLink, PageSnapshot, SearchEngine, SearchQuery,
    SearchResponse, SearchResult,
};
