//! Single page retrieval with text and link extraction.

use chrono::Utc;
use scraper::Html;
use url::Url;

use crate::content;
use crate::engine::WebResearcher;
use crate::error::{ResearchError, Result};
use crate::http::{HttpResponse, HttpTransport};
use crate::safety;
use crate::types::{FetchOptions, FetchResponse, PageSnapshot};

impl<T: HttpTransport> WebResearcher<T> {
    /// Fetch one page.
    ///
    /// The URL is checked with [`safety::is_safe`] before anything else
    /// touches it. There is exactly one GET per uncached call; this layer
    /// does not retry. The snapshot is written to the page cache whether or
    /// not `use_cache` was set.
    ///
    /// A cached snapshot is only reused when it holds every part the caller
    /// asked for; parts the caller did not ask for are removed from the
    /// returned copy.
    ///
    /// # Errors
    ///
    /// - [`ResearchError::SafetyRejected`] for unsafe or unparseable URLs
    /// - [`ResearchError::HttpStatus`] for any status other than 200
    /// - [`ResearchError::Timeout`] / [`ResearchError::Network`] from the transport
    pub async fn fetch_page(&self, url: &str, options: FetchOptions) -> Result<FetchResponse> {
        self.ensure_enabled()?;

        let parsed = Url::parse(url)
            .ok()
            .filter(safety::is_safe)
            .ok_or_else(|| ResearchError::SafetyRejected(url.to_owned()))?;

        let key = url.to_owned();
        if options.use_cache {
            if let Some(snapshot) = self.page_cache.get(&key).await {
                if covers(&snapshot, options) {
                    tracing::debug!(url, "page cache hit");
                    return Ok(FetchResponse {
                        snapshot: project(snapshot, options),
                        cached: true,
                    });
                }
                tracing::debug!(url, "cached snapshot lacks requested parts");
            }
        }

        let response = self.transport.get(url).await.inspect_err(|err| {
            tracing::warn!(url, error = %err, "page fetch failed");
        })?;
        if !response.is_ok() {
            tracing::warn!(url, status = response.status, "page fetch returned error status");
            return Err(ResearchError::HttpStatus(response.status));
        }

        let snapshot = build_snapshot(&parsed, url, &response, options, self.config.max_text_chars);
        self.page_cache.put(key, snapshot.clone()).await;

        tracing::debug!(url, length = snapshot.content_length, "page fetched");
        Ok(FetchResponse {
            snapshot,
            cached: false,
        })
    }
}

fn build_snapshot(
    base: &Url,
    url: &str,
    response: &HttpResponse,
    options: FetchOptions,
    max_text_chars: usize,
) -> PageSnapshot {
    let document = Html::parse_document(&response.body);

    PageSnapshot {
        url: url.to_owned(),
        status: response.status,
        content_length: response.body.chars().count(),
        title: content::extract_title(&document),
        text: options
            .extract_text
            .then(|| content::extract_text(&response.body, max_text_chars)),
        links: options
            .extract_links
            .then(|| content::extract_links(&document, base)),
        fetched_at: Utc::now(),
    }
}

/// Whether `snapshot` has every part `options` requests.
fn covers(snapshot: &PageSnapshot, options: FetchOptions) -> bool {
    (!options.extract_text || snapshot.text.is_some())
        && (!options.extract_links || snapshot.links.is_some())
}

/// Drop the parts `options` does not request.
fn project(mut snapshot: PageSnapshot, options: FetchOptions) -> PageSnapshot {
    if !options.extract_text {
        snapshot.text = None;
    }
    if !options.extract_links {
        snapshot.links = None;
    }
    snapshot
}
