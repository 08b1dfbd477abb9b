//! Engine configuration with sensible defaults.
//!
//! [`ResearchConfig`] controls the default backend, timeouts, retry and
//! pacing behaviour, cache bounds and the query content filter. It can be
//! loaded from and saved to TOML; missing fields fall back to defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ResearchError, Result};
use crate::types::SearchEngine;

/// Configuration for a [`crate::WebResearcher`] instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchConfig {
    /// Master switch; when off every operation fails with [`ResearchError::Disabled`].
    pub enabled: bool,
    /// Backend used when a query names no engine or an unknown one.
    pub default_engine: SearchEngine,
    /// Default result bound for searches that do not set one.
    pub max_results: usize,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Upper bound on search attempts per call.
    pub max_attempts: u32,
    /// Linear backoff unit: attempt `n` is followed by `n * base` of sleep.
    pub retry_base_delay_ms: u64,
    /// Pause between sequential page fetches during collection.
    pub pacing_delay_ms: u64,
    /// Pause between rounds of `search_and_research`.
    pub round_delay_ms: u64,
    /// Pages fetched per round of `search_and_research`.
    pub research_pages_per_round: usize,
    /// Entries kept per cache (search and page caches are sized separately).
    pub cache_capacity: u64,
    /// Entry lifetime in seconds. 0 keeps entries until evicted.
    pub cache_ttl_seconds: u64,
    /// Maximum characters of extracted page text.
    pub max_text_chars: usize,
    /// Fixed User-Agent override. `None` uses the built-in desktop signature.
    pub user_agent: Option<String>,
    /// Pick a random desktop User-Agent per request instead of the fixed one.
    pub rotate_user_agent: bool,
    /// Query content filter.
    pub content_filter: ContentFilterConfig,
}

/// Keyword-based query filter settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentFilterConfig {
    pub enabled: bool,
    pub blocked_keywords: Vec<String>,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_engine: SearchEngine::Baidu,
            max_results: 10,
            timeout_seconds: 30,
            max_attempts: 3,
            retry_base_delay_ms: 1000,
            pacing_delay_ms: 500,
            round_delay_ms: 1000,
            research_pages_per_round: 3,
            cache_capacity: 512,
            cache_ttl_seconds: 0,
            max_text_chars: 100_000,
            user_agent: None,
            rotate_user_agent: false,
            content_filter: ContentFilterConfig::default(),
        }
    }
}

impl ResearchConfig {
    /// Validates this configuration.
    ///
    /// Checks:
    /// - `timeout_seconds` must be greater than 0
    /// - `max_attempts` must be greater than 0
    /// - `cache_capacity` must be greater than 0
    /// - `max_text_chars` must be greater than 0
    pub fn validate(&self) -> Result<()> {
        if self.timeout_seconds == 0 {
            return Err(ResearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(ResearchError::Config(
                "max_attempts must be greater than 0".into(),
            ));
        }
        if self.cache_capacity == 0 {
            return Err(ResearchError::Config(
                "cache_capacity must be greater than 0".into(),
            ));
        }
        if self.max_text_chars == 0 {
            return Err(ResearchError::Config(
                "max_text_chars must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ResearchError::Config(format!("{}: {e}", path.display())))?;
        toml::from_str(&content).map_err(|e| ResearchError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ResearchError::Config(format!("{}: {e}", parent.display())))?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ResearchError::Config(e.to_string()))?;
        std::fs::write(path, content)
            .map_err(|e| ResearchError::Config(format!("{}: {e}", path.display())))
    }

    /// Returns the default config file path: `~/.config/web-research/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(config)
                .join("web-research")
                .join("config.toml");
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("web-research")
            .join("config.toml")
    }
}
