//! JSON rendering of operation outcomes.
//!
//! Every envelope is an object with a boolean `success`. Successes carry the
//! serialised payload fields at the top level; failures carry a short
//! `error` label and either a `reason` (search, collection) or the `url`
//! (page fetch).

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::aggregate::{CollectionReport, ResearchReport};
use crate::error::{ResearchError, Result};
use crate::types::{FetchResponse, SearchResponse};

/// `{success, results, query, engine, cached?}` or `{success:false, error, reason}`.
pub fn search_envelope(outcome: &Result<SearchResponse>) -> Value {
    match outcome {
        Ok(response) => success(response),
        Err(err) => failure_with_reason(err, "search failed"),
    }
}

/// `{success, url, status, content_length, title, text?, links?, fetched_at, cached?}`
/// or `{success:false, error, url}`.
pub fn fetch_envelope(url: &str, outcome: &Result<FetchResponse>) -> Value {
    match outcome {
        Ok(response) => success(response),
        Err(err) => json!({
            "success": false,
            "error": err.to_string(),
            "kind": err.kind(),
            "url": url,
        }),
    }
}

/// `{success, query, summary, sources, detailed_info, collection_time}` or a failure.
pub fn collect_envelope(outcome: &Result<CollectionReport>) -> Value {
    match outcome {
        Ok(report) => success(report),
        Err(err) => failure_with_reason(err, "information collection failed"),
    }
}

/// `{success, original_query, iterations, results, total_sources}` or a failure.
pub fn research_envelope(outcome: &Result<ResearchReport>) -> Value {
    match outcome {
        Ok(report) => success(report),
        Err(err) => failure_with_reason(err, "research failed"),
    }
}

fn success<S: Serialize>(payload: &S) -> Value {
    match serde_json::to_value(payload) {
        Ok(Value::Object(mut fields)) => {
            fields.insert("success".to_owned(), Value::Bool(true));
            Value::Object(fields)
        }
        Ok(other) => {
            let mut fields = Map::new();
            fields.insert("success".to_owned(), Value::Bool(true));
            fields.insert("data".to_owned(), other);
            Value::Object(fields)
        }
        Err(e) => json!({
            "success": false,
            "error": "serialization failed",
            "reason": e.to_string(),
        }),
    }
}

/// Refusals get their own label; everything else shares the operation's label.
fn failure_with_reason(err: &ResearchError, operation_label: &str) -> Value {
    let error = match err {
        ResearchError::Disabled => {
            return json!({ "success": false, "error": err.to_string(), "kind": err.kind() });
        }
        ResearchError::ContentRejected(_) => "content check failed",
        ResearchError::SafetyRejected(_) => "unsafe URL",
        _ => operation_label,
    };
    json!({
        "success": false,
        "error": error,
        "kind": err.kind(),
        "reason": err.to_string(),
    })
}
