//! Query content policy.
//!
//! Searches are checked against a [`ContentPolicy`] before any network
//! access. The host application can plug in its own policy; the crate ships
//! an allow-everything policy and a keyword blocklist.

use crate::config::ContentFilterConfig;

/// Decides whether query text may be sent to a search engine.
pub trait ContentPolicy: Send + Sync {
    /// `Err(reason)` refuses the text.
    fn check(&self, text: &str) -> Result<(), String>;
}

/// Accepts everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl ContentPolicy for AllowAll {
    fn check(&self, _text: &str) -> Result<(), String> {
        Ok(())
    }
}

/// Case-insensitive substring blocklist.
#[derive(Debug, Clone, Default)]
pub struct KeywordFilter {
    blocked: Vec<String>,
}

impl KeywordFilter {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let blocked = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { blocked }
    }
}

impl ContentPolicy for KeywordFilter {
    fn check(&self, text: &str) -> Result<(), String> {
        let lower = text.to_lowercase();
        match self.blocked.iter().find(|k| lower.contains(k.as_str())) {
            Some(keyword) => Err(format!("contains blocked keyword: {keyword}")),
            None => Ok(()),
        }
    }
}

/// Build the policy described by `config`.
pub fn from_config(config: &ContentFilterConfig) -> Box<dyn ContentPolicy> {
    if config.enabled {
        Box::new(KeywordFilter::new(&config.blocked_keywords))
    } else {
        Box::new(AllowAll)
    }
}
