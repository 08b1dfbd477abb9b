//! Multi-source collection: search, fetch the top results one by one, and
//! summarise what came back.

use std::time::Duration;

use chrono::Local;
use serde::Serialize;

use crate::engine::WebResearcher;
use crate::error::Result;
use crate::http::HttpTransport;
use crate::types::{FetchOptions, SearchQuery};

/// Characters of page text kept in [`CollectedSource::content`].
pub const CONTENT_PREVIEW_CHARS: usize = 1000;

/// Characters of a result description shown in the summary.
pub const SUMMARY_DESCRIPTION_CHARS: usize = 200;

/// Default page budget for [`WebResearcher::collect_information`].
pub const DEFAULT_MAX_PAGES: usize = 5;

/// Default round count for [`WebResearcher::search_and_research`].
pub const DEFAULT_ROUNDS: usize = 2;

/// One successfully fetched search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectedSource {
    pub source_title: String,
    pub source_url: String,
    pub source_description: String,
    /// First [`CONTENT_PREVIEW_CHARS`] characters of the page text.
    pub content: String,
    /// Full extracted page text.
    pub text: String,
    /// Raw page length in characters.
    pub content_length: usize,
}

/// Outcome of [`WebResearcher::collect_information`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionReport {
    pub query: String,
    pub summary: String,
    /// URLs of the collected sources, in collection order.
    pub sources: Vec<String>,
    pub detailed_info: Vec<CollectedSource>,
    /// Local time the collection finished, `%Y-%m-%d %H:%M:%S`.
    pub collection_time: String,
}

/// Outcome of [`WebResearcher::search_and_research`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResearchReport {
    pub original_query: String,
    /// Number of rounds that completed.
    pub iterations: usize,
    pub results: Vec<CollectionReport>,
    /// Sum of collected sources across all rounds.
    pub total_sources: usize,
}

impl<T: HttpTransport> WebResearcher<T> {
    /// Search for `query` and fetch up to `max_pages` of the results in order.
    ///
    /// Fetches run one after another with the configured pacing delay
    /// between them. Results with an empty URL are skipped; pages that fail
    /// to fetch are logged and left out of the report.
    ///
    /// # Errors
    ///
    /// Any error from [`WebResearcher::search`] is returned unchanged.
    pub async fn collect_information(&self, query: &str, max_pages: usize) -> Result<CollectionReport> {
        self.ensure_enabled()?;
        tracing::info!(max_pages, "collecting information");
        tracing::debug!(query, "collection query");

        let search = self
            .search(&SearchQuery::new(query).with_max_results(max_pages))
            .await?;

        let pacing = Duration::from_millis(self.config.pacing_delay_ms);
        let mut collected = Vec::new();
        let mut attempted = false;

        for result in search.results.iter().take(max_pages) {
            if result.url.is_empty() {
                continue;
            }
            if attempted {
                tokio::time::sleep(pacing).await;
            }
            attempted = true;

            match self.fetch_page(&result.url, FetchOptions::default()).await {
                Ok(page) => {
                    let text = page.snapshot.text.unwrap_or_default();
                    collected.push(CollectedSource {
                        source_title: result.title.clone(),
                        source_url: result.url.clone(),
                        source_description: result.description.clone(),
                        content: text.chars().take(CONTENT_PREVIEW_CHARS).collect(),
                        text,
                        content_length: page.snapshot.content_length,
                    });
                }
                Err(err) => {
                    tracing::warn!(url = %result.url, error = %err, "skipping source");
                }
            }
        }

        tracing::info!(sources = collected.len(), "collection complete");

        Ok(CollectionReport {
            query: query.to_owned(),
            summary: summarize(query, &collected),
            sources: collected.iter().map(|c| c.source_url.clone()).collect(),
            detailed_info: collected,
            collection_time: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        })
    }

    /// Run `rounds` collections of `query`, pausing between rounds.
    ///
    /// Every round uses the original query unchanged and fetches the
    /// configured `research_pages_per_round`. Later rounds are usually served
    /// from the caches. A failing round ends the loop early and the rounds
    /// collected so far are returned, possibly none.
    ///
    /// # Errors
    ///
    /// [`ResearchError::Disabled`](crate::ResearchError::Disabled) when browsing is off.
    pub async fn search_and_research(&self, query: &str, rounds: usize) -> Result<ResearchReport> {
        self.ensure_enabled()?;

        let pages = self.config.research_pages_per_round;
        let round_delay = Duration::from_millis(self.config.round_delay_ms);
        let mut results: Vec<CollectionReport> = Vec::new();

        for round in 1..=rounds {
            tracing::info!(round, rounds, "research round");
            match self.collect_information(query, pages).await {
                Ok(report) => results.push(report),
                Err(err) => {
                    tracing::warn!(round, error = %err, "research round failed, stopping");
                    break;
                }
            }
            if round < rounds {
                tokio::time::sleep(round_delay).await;
            }
        }

        Ok(ResearchReport {
            original_query: query.to_owned(),
            iterations: results.len(),
            total_sources: results.iter().map(|r| r.detailed_info.len()).sum(),
            results,
        })
    }
}

/// Markdown summary of collected sources.
///
/// Lists each source with its URL and a description cut to
/// [`SUMMARY_DESCRIPTION_CHARS`], then the total raw content length.
pub fn summarize(query: &str, sources: &[CollectedSource]) -> String {
    if sources.is_empty() {
        return format!("No relevant information found for '{query}'.");
    }

    let mut lines = vec![
        "## Information Summary".to_owned(),
        format!("**Query**: {query}"),
        format!("**Sources**: {}", sources.len()),
        String::new(),
        "### Main Sources:".to_owned(),
    ];

    for (i, source) in sources.iter().enumerate() {
        let title = if source.source_title.is_empty() {
            "Untitled"
        } else {
            &source.source_title
        };
        lines.push(format!("{}. **{title}**", i + 1));
        lines.push(format!("   - URL: {}", source.source_url));
        lines.push(format!(
            "   - Description: {}",
            truncate_description(&source.source_description)
        ));
    }

    let total: usize = sources.iter().map(|s| s.content_length).sum();
    lines.extend([
        String::new(),
        "### Statistics".to_owned(),
        format!("- Total content length: {} characters", group_thousands(total)),
    ]);

    lines.join("\n")
}

fn truncate_description(description: &str) -> String {
    match description.char_indices().nth(SUMMARY_DESCRIPTION_CHARS) {
        Some((end, _)) => format!("{}...", &description[..end]),
        None => description.to_owned(),
    }
}

/// `1234567` → `"1,234,567"`.
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
