//! Search dispatch: query URL, retried fetch, parse, dedup, bound, cache.

use crate::cache::search_key;
use crate::engine::WebResearcher;
use crate::engines::parse_with_fallback;
use crate::error::{ResearchError, Result};
use crate::http::HttpTransport;
use crate::types::{SearchEngine, SearchQuery, SearchResponse, SearchResult};
use crate::url_normalize::dedup_by_url;

impl<T: HttpTransport> WebResearcher<T> {
    /// Run a search against one engine.
    ///
    /// # Pipeline
    ///
    /// 1. Refuse when the engine is disabled or the content policy rejects the text
    /// 2. Serve from the search cache when allowed (`cached: true`)
    /// 3. Substitute the encoded text into the engine's URL template
    /// 4. GET through the retry policy; a non-200 status fails the attempt
    /// 5. Parse with the engine's strategy, falling back to the generic scraper
    /// 6. Deduplicate by normalised URL, bound to `max_results`, cache and return
    ///
    /// A page that still parses to nothing after the last attempt is an
    /// empty, successful result and is cached like any other.
    ///
    /// # Errors
    ///
    /// - [`ResearchError::Disabled`] / [`ResearchError::ContentRejected`] before any network access
    /// - the last attempt's [`ResearchError::HttpStatus`], [`ResearchError::Timeout`] or
    ///   [`ResearchError::Network`] once retries are exhausted
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        self.ensure_enabled()?;
        self.policy
            .check(&query.text)
            .map_err(ResearchError::ContentRejected)?;

        let engine = query.engine.unwrap_or(self.config.default_engine);
        let max_results = query.max_results;
        let key = search_key(engine, &query.text);

        if query.use_cache {
            if let Some(mut results) = self.search_cache.get(&key).await {
                tracing::debug!(%engine, query = %query.text, "search cache hit");
                results.truncate(max_results);
                return Ok(SearchResponse {
                    results,
                    query: query.text.clone(),
                    engine,
                    cached: true,
                });
            }
        }

        if max_results == 0 {
            return Ok(SearchResponse {
                results: Vec::new(),
                query: query.text.clone(),
                engine,
                cached: false,
            });
        }

        let url = engine.search_url(&query.text);
        tracing::debug!(%engine, query = %query.text, "searching");

        let results = match self.fetch_results(engine, &url).await {
            Ok(results) => results,
            Err(ResearchError::ParseEmpty(detail)) => {
                tracing::warn!(%engine, %detail, "no results after all attempts");
                Vec::new()
            }
            Err(err) => {
                tracing::warn!(%engine, error = %err, "search failed");
                return Err(err);
            }
        };

        let mut results = dedup_by_url(results);
        results.truncate(max_results);

        self.search_cache.put(key, results.clone()).await;
        tracing::debug!(%engine, count = results.len(), "search complete");

        Ok(SearchResponse {
            results,
            query: query.text.clone(),
            engine,
            cached: false,
        })
    }

    /// Every candidate on the page, before dedup and the `max_results` bound.
    ///
    /// An empty parse backs off like a transport failure before the page is
    /// requested again.
    async fn fetch_results(&self, engine: SearchEngine, url: &str) -> Result<Vec<SearchResult>> {
        self.retry
            .execute(|attempt| async move {
                tracing::trace!(attempt, url, "search attempt");
                let response = self.transport.get(url).await?;
                if !response.is_ok() {
                    return Err(ResearchError::HttpStatus(response.status));
                }
                parse_with_fallback(engine, &response.body, usize::MAX)
            })
            .await
    }
}
