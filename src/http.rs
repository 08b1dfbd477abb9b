//! Outbound HTTP: the transport seam and its reqwest implementation.
//!
//! Every network call the engine makes goes through [`HttpTransport::get`].
//! [`ReqwestTransport`] sends a fixed browser-like header set and applies the
//! configured timeout to each individual request; nothing here retries.

use std::future::Future;
use std::time::Duration;

use rand::seq::SliceRandom;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, CONNECTION};

use crate::config::ResearchConfig;
use crate::error::{ResearchError, Result};

/// Desktop browser signature sent when no override is configured.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Signatures used when `rotate_user_agent` is on.
const USER_AGENTS: &[&str] = &[
    DEFAULT_USER_AGENT,
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:121.0) Gecko/20100101 Firefox/121.0",
];

const ACCEPT_VALUE: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE_VALUE: &str = "zh-CN,zh;q=0.9,en;q=0.8";
const ACCEPT_ENCODING_VALUE: &str = "gzip, deflate";

/// Status and decoded body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// A single-shot HTTP GET.
///
/// Implementations must map a request that exceeded its deadline to
/// [`ResearchError::Timeout`] and connection-level failures to
/// [`ResearchError::Network`]. Non-200 statuses are *not* errors at this
/// layer; they come back in [`HttpResponse::status`].
pub trait HttpTransport: Send + Sync {
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse>> + Send;
}

/// Production transport backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    user_agent: Option<String>,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Build a transport from the engine configuration.
    ///
    /// The client has:
    /// - the fixed header set (Accept, Accept-Language, Accept-Encoding, DNT, Connection)
    /// - cookie store enabled (consent pages)
    /// - gzip, deflate and brotli decompression
    /// - at most 10 redirects
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::Config`] if the client cannot be constructed.
    pub fn new(config: &ResearchConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds);
        let client = reqwest::Client::builder()
            .default_headers(default_headers())
            .cookie_store(true)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| ResearchError::Config(format!("failed to build HTTP client: {e}")))?;

        let user_agent = if config.rotate_user_agent {
            None
        } else {
            Some(
                config
                    .user_agent
                    .clone()
                    .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned()),
            )
        };

        Ok(Self {
            client,
            user_agent,
            timeout,
        })
    }

    fn user_agent(&self) -> &str {
        match self.user_agent {
            Some(ref ua) => ua,
            None => random_user_agent(),
        }
    }
}

impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, self.user_agent())
            .send()
            .await
            .map_err(|e| classify(e, self.timeout))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| classify(e, self.timeout))?;

        tracing::trace!(status, bytes = body.len(), "response received");
        Ok(HttpResponse { status, body })
    }
}

fn classify(err: reqwest::Error, timeout: Duration) -> ResearchError {
    if err.is_timeout() {
        ResearchError::Timeout(format!("exceeded {}s limit", timeout.as_secs()))
    } else {
        ResearchError::Network(err.to_string())
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static(ACCEPT_ENCODING_VALUE));
    headers.insert("DNT", HeaderValue::from_static("1"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        .unwrap_or(DEFAULT_USER_AGENT)
}
