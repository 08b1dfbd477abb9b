//! Error types for the web research engine.
//!
//! Every failure the engine can produce is a value of [`ResearchError`].
//! Nothing here is allowed to terminate the host process: transport and
//! parse problems are folded into these variants and surfaced to callers
//! as structured results.

/// Errors that can occur while searching, fetching or collecting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResearchError {
    /// The URL failed the outbound-request safety check.
    #[error("unsafe or invalid URL: {0}")]
    SafetyRejected(String),

    /// The query text was refused by the content policy.
    #[error("content rejected: {0}")]
    ContentRejected(String),

    /// The server answered with a non-200 status.
    #[error("HTTP error: {0}")]
    HttpStatus(u16),

    /// A single request exceeded the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The engine-specific and generic parsers both found no results.
    #[error("no results parsed: {0}")]
    ParseEmpty(String),

    /// Connection-level failure (DNS, refused, reset, body read).
    #[error("network error: {0}")]
    Network(String),

    /// Invalid selector or otherwise unparseable document.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Web browsing is switched off in the configuration.
    #[error("web browsing is disabled")]
    Disabled,
}

impl ResearchError {
    /// Whether a retry loop may attempt the operation again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::HttpStatus(_) | Self::Timeout(_) | Self::ParseEmpty(_) | Self::Network(_) => true,
            Self::SafetyRejected(_)
            | Self::ContentRejected(_)
            | Self::Parse(_)
            | Self::Config(_)
            | Self::Disabled => false,
        }
    }

    /// Short, stable label for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SafetyRejected(_) => "safety_rejected",
            Self::ContentRejected(_) => "content_rejected",
            Self::HttpStatus(_) => "http_error",
            Self::Timeout(_) => "timeout",
            Self::ParseEmpty(_) => "parse_empty",
            Self::Network(_) => "network",
            Self::Parse(_) => "parse",
            Self::Config(_) => "config",
            Self::Disabled => "disabled",
        }
    }
}

/// Convenience type alias for web research results.
pub type Result<T> = std::result::Result<T, ResearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_safety_rejected() {
        let err = ResearchError::SafetyRejected("http://127.0.0.1/secret".into());
        assert_eq!(
            err.to_string(),
            "unsafe or invalid URL: http://127.0.0.1/secret"
        );
    }

    #[test]
    fn display_http_status() {
        assert_eq!(ResearchError::HttpStatus(503).to_string(), "HTTP error: 503");
    }

    #[test]
    fn display_disabled() {
        assert_eq!(ResearchError::Disabled.to_string(), "web browsing is disabled");
    }

    #[test]
    fn transient_kinds_are_retryable() {
        assert!(ResearchError::HttpStatus(500).is_retryable());
        assert!(ResearchError::Timeout("8s".into()).is_retryable());
        assert!(ResearchError::ParseEmpty("baidu".into()).is_retryable());
        assert!(ResearchError::Network("connection reset".into()).is_retryable());
    }

    #[test]
    fn rejections_are_not_retryable() {
        assert!(!ResearchError::SafetyRejected("file:///etc/passwd".into()).is_retryable());
        assert!(!ResearchError::ContentRejected("blocked".into()).is_retryable());
        assert!(!ResearchError::Config("bad".into()).is_retryable());
        assert!(!ResearchError::Disabled.is_retryable());
    }

    #[test]
    fn kind_labels() {
        assert_eq!(ResearchError::Timeout(String::new()).kind(), "timeout");
        assert_eq!(ResearchError::HttpStatus(404).kind(), "http_error");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResearchError>();
    }
}
