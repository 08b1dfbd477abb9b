//! URL canonicalisation for result deduplication.
//!
//! Two result links that differ only in query-parameter order, tracking
//! parameters, fragment, default port or a trailing slash point at the same
//! page and should appear once.

use std::collections::HashSet;

use url::Url;

use crate::types::SearchResult;

/// Query parameters that only carry attribution and are dropped.
const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "fbclid",
    "gclid",
    "ref",
    "si",
    "feature",
];

/// Canonical form of `raw` for equality comparison.
///
/// Lower-cases scheme and host, drops default ports, the fragment and
/// tracking parameters, sorts the remaining parameters and strips a trailing
/// slash from non-root paths. Unparseable input is returned unchanged.
///
/// ```
/// use web_research::url_normalize::normalize_url;
///
/// let a = normalize_url("https://Example.COM/path/?b=2&a=1#section");
/// let b = normalize_url("https://example.com/path?a=1&b=2");
/// assert_eq!(a, b);
/// ```
pub fn normalize_url(raw: &str) -> String {
    let Ok(mut parsed) = Url::parse(raw) else {
        return raw.to_owned();
    };

    parsed.set_fragment(None);

    if matches!(
        (parsed.scheme(), parsed.port()),
        ("http", Some(80)) | ("https", Some(443))
    ) {
        let _ = parsed.set_port(None);
    }

    let mut params: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| !TRACKING_PARAMS.contains(&key.to_lowercase().as_str()))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    params.sort();

    if params.is_empty() {
        parsed.set_query(None);
    } else {
        let query = params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        parsed.set_query(Some(&query));
    }

    let path = parsed.path().to_owned();
    if path.len() > 1 && path.ends_with('/') {
        parsed.set_path(&path[..path.len() - 1]);
    }

    parsed.to_string()
}

/// Drop results whose normalised URL was already seen. The first occurrence
/// wins and order is preserved.
pub fn dedup_by_url(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen = HashSet::with_capacity(results.len());
    results
        .into_iter()
        .filter(|r| seen.insert(normalize_url(&r.url)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(title: &str, url: &str) -> SearchResult {
        SearchResult {
            title: title.to_owned(),
            url: url.to_owned(),
            description: String::new(),
            source: "bing".to_owned(),
        }
    }

    #[test]
    fn lowercases_host_and_keeps_path_case() {
        assert_eq!(
            normalize_url("HTTPS://Example.COM/Path"),
            "https://example.com/Path"
        );
    }

    #[test]
    fn trailing_slash_removed_except_root() {
        assert_eq!(normalize_url("https://example.com/path/"), "https://example.com/path");
        assert_eq!(normalize_url("https://example.com/"), "https://example.com/");
    }

    #[test]
    fn default_ports_dropped() {
        assert_eq!(normalize_url("http://example.com:80/a"), "http://example.com/a");
        assert_eq!(normalize_url("https://example.com:443/a"), "https://example.com/a");
        assert_eq!(
            normalize_url("https://example.com:8443/a"),
            "https://example.com:8443/a"
        );
    }

    #[test]
    fn tracking_params_and_fragment_removed() {
        assert_eq!(
            normalize_url("https://example.com/page?q=rust&utm_source=x&fbclid=y#top"),
            "https://example.com/page?q=rust"
        );
    }

    #[test]
    fn params_sorted() {
        assert_eq!(
            normalize_url("https://example.com/s?z=1&a=2"),
            "https://example.com/s?a=2&z=1"
        );
    }

    #[test]
    fn unparseable_input_unchanged() {
        assert_eq!(normalize_url("not a url"), "not a url");
        assert_eq!(normalize_url(""), "");
    }

    #[test]
    fn dedup_keeps_first_occurrence_in_order() {
        let results = vec![
            result("first", "https://example.com/a/"),
            result("other", "https://rust-lang.org/"),
            result("dupe", "https://EXAMPLE.com/a?utm_source=feed"),
            result("last", "https://tokio.rs/"),
        ];
        let deduped = dedup_by_url(results);
        let titles: Vec<&str> = deduped.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "other", "last"]);
    }
}
