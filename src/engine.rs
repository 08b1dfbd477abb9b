//! The research engine instance.
//!
//! A [`WebResearcher`] owns everything a session needs: configuration, the
//! HTTP transport, the query content policy, both response caches and the
//! retry policy. Nothing is global; two instances never share a cache.
//!
//! Operations are implemented next to their concerns: [`search`](crate::search),
//! [`fetch`](crate::fetch) and [`aggregate`](crate::aggregate).

use std::fmt;
use std::time::Duration;

use crate::cache::ResponseCache;
use crate::config::ResearchConfig;
use crate::error::{ResearchError, Result};
use crate::http::{HttpTransport, ReqwestTransport};
use crate::policy::{self, ContentPolicy};
use crate::retry::RetryPolicy;
use crate::types::{PageSnapshot, SearchResult};

/// Search, fetch and collect web content.
///
/// Calls on one instance are expected to run one at a time, as the
/// aggregation paths issue their requests strictly in sequence. The caches
/// are internally synchronised, so sharing an instance behind an `Arc` is
/// memory-safe, but ordering between concurrent callers is unspecified.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> web_research::Result<()> {
/// use web_research::{ResearchConfig, SearchQuery, WebResearcher};
///
/// let researcher = WebResearcher::new(ResearchConfig::default())?;
/// let response = researcher.search(&SearchQuery::new("rust async")).await?;
/// for result in &response.results {
///     println!("{}: {}", result.title, result.url);
/// }
/// # Ok(())
/// # }
/// ```
pub struct WebResearcher<T = ReqwestTransport> {
    pub(crate) config: ResearchConfig,
    pub(crate) transport: T,
    pub(crate) policy: Box<dyn ContentPolicy>,
    pub(crate) search_cache: ResponseCache<String, Vec<SearchResult>>,
    pub(crate) page_cache: ResponseCache<String, PageSnapshot>,
    pub(crate) retry: RetryPolicy,
}

impl WebResearcher<ReqwestTransport> {
    /// Build an instance that talks to the network through reqwest.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::Config`] if the configuration is invalid or
    /// the HTTP client cannot be built.
    pub fn new(config: ResearchConfig) -> Result<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(config, transport)
    }
}

impl<T: HttpTransport> WebResearcher<T> {
    /// Build an instance over a caller-supplied transport.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::Config`] if the configuration is invalid.
    pub fn with_transport(config: ResearchConfig, transport: T) -> Result<Self> {
        config.validate()?;

        let ttl = (config.cache_ttl_seconds > 0).then(|| Duration::from_secs(config.cache_ttl_seconds));
        let retry = RetryPolicy::new(
            config.max_attempts,
            Duration::from_millis(config.retry_base_delay_ms),
        );

        Ok(Self {
            policy: policy::from_config(&config.content_filter),
            search_cache: ResponseCache::new(config.cache_capacity, ttl),
            page_cache: ResponseCache::new(config.cache_capacity, ttl),
            retry,
            transport,
            config,
        })
    }

    /// Replace the query content policy.
    pub fn with_policy(mut self, policy: impl ContentPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn config(&self) -> &ResearchConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Forget every cached search and page.
    pub fn clear_caches(&self) {
        self.search_cache.clear();
        self.page_cache.clear();
    }

    pub(crate) fn ensure_enabled(&self) -> Result<()> {
        if self.config.enabled {
            Ok(())
        } else {
            Err(ResearchError::Disabled)
        }
    }
}

impl<T> fmt::Debug for WebResearcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebResearcher")
            .field("config", &self.config)
            .field("retry", &self.retry)
            .field("search_cache", &self.search_cache)
            .field("page_cache", &self.page_cache)
            .finish_non_exhaustive()
    }
}
