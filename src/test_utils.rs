//! Shared test helpers: a scripted, call-counting HTTP transport.
//!
//! Used by the unit tests in this crate and by the integration tests under
//! `tests/`, so it is compiled unconditionally.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{ResearchError, Result};
use crate::http::{HttpResponse, HttpTransport};

/// In-memory [`HttpTransport`] that records every requested URL.
///
/// Each URL has a queue of scripted outcomes. Calls pop from the front; the
/// last outcome repeats once the queue is down to one entry. URLs without a
/// script get the fallback, or a [`ResearchError::Network`] when none is set.
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<String, VecDeque<Result<HttpResponse>>>>,
    fallback: Option<Result<HttpResponse>>,
    calls: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always answer `url` with a 200 and `body`.
    pub fn with_page(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.with_response(url, HttpResponse::new(200, body))
    }

    /// Always answer `url` with `response`.
    pub fn with_response(self, url: impl Into<String>, response: HttpResponse) -> Self {
        self.with_sequence(url, vec![Ok(response)])
    }

    /// Answer successive calls to `url` with `outcomes` in order.
    pub fn with_sequence(self, url: impl Into<String>, outcomes: Vec<Result<HttpResponse>>) -> Self {
        lock(&self.routes).insert(url.into(), outcomes.into());
        self
    }

    /// Outcome for every URL without its own script.
    pub fn with_fallback(mut self, outcome: Result<HttpResponse>) -> Self {
        self.fallback = Some(outcome);
        self
    }

    /// Total number of requests made.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Number of requests made for `url`.
    pub fn calls_to(&self, url: &str) -> usize {
        lock(&self.calls).iter().filter(|c| *c == url).count()
    }

    /// Every requested URL, in order.
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    fn respond(&self, url: &str) -> Result<HttpResponse> {
        lock(&self.calls).push(url.to_owned());

        let mut routes = lock(&self.routes);
        if let Some(queue) = routes.get_mut(url) {
            let outcome = if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            };
            if let Some(outcome) = outcome {
                return outcome;
            }
        }

        self.fallback
            .clone()
            .unwrap_or_else(|| Err(ResearchError::Network(format!("no route for {url}"))))
    }
}

impl HttpTransport for MockTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        self.respond(url)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_sequence_then_repeat() {
        let transport = MockTransport::new().with_sequence(
            "https://a.example.com/",
            vec![
                Err(ResearchError::Timeout("slow".into())),
                Ok(HttpResponse::new(200, "ok")),
            ],
        );

        assert!(transport.get("https://a.example.com/").await.is_err());
        for _ in 0..2 {
            let response = transport.get("https://a.example.com/").await.expect("ok");
            assert_eq!(response.body, "ok");
        }
        assert_eq!(transport.call_count(), 3);
    }

    #[tokio::test]
    async fn unknown_url_uses_fallback_or_fails() {
        let transport = MockTransport::new();
        assert!(matches!(
            transport.get("https://nowhere.example.com/").await,
            Err(ResearchError::Network(_))
        ));

        let transport = MockTransport::new().with_fallback(Ok(HttpResponse::new(404, "")));
        let response = transport.get("https://nowhere.example.com/").await.expect("fallback");
        assert_eq!(response.status, 404);
        assert_eq!(transport.calls_to("https://nowhere.example.com/"), 1);
    }
}
