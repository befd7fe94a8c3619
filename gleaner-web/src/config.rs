//! Web probing configuration with sensible defaults.
//!
//! [`WebConfig`] controls homepage probing, search harvesting, and the
//! transport retry policy. The defaults are tuned for polite scraping of
//! a handful of hosts per query.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::WebError;

/// Top-level domains tried when guessing an entity's homepage, in order.
pub const DEFAULT_HOMEPAGE_TLDS: &[&str] = &["edu", "com", "org", "net", "tech"];

/// Top-level domains accepted by the search quality filter.
pub const DEFAULT_TLD_ALLOWLIST: &[&str] = &["edu", "gov", "ac", "org", "com", "net", "tech"];

/// Configuration for homepage discovery and search harvesting.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Per-request timeout for homepage probes, in milliseconds.
    pub probe_timeout_ms: u64,
    /// Maximum number of homepage probes in flight at once.
    pub pool_size: usize,
    /// Maximum number of candidate domains generated per entity.
    pub max_candidates: usize,
    /// Top-level domains crossed with each homepage slug, in order.
    pub homepage_tlds: Vec<String>,
    /// DuckDuckGo HTML endpoint used for search and homepage fallback.
    pub search_endpoint: String,
    /// Maximum number of organic result links read from one results page.
    pub max_search_results: usize,
    /// Per-request timeout for search results and harvested pages, in milliseconds.
    pub page_timeout_ms: u64,
    /// Maximum number of search result pages fetched at once.
    pub search_pool_size: usize,
    /// Number of accepted snippets after which harvesting stops.
    pub keep_count: usize,
    /// Pages dated more than this many days ago are discarded.
    pub recency_days: i64,
    /// Top-level domains a result host must end with to be fetched.
    pub tld_allowlist: Vec<String>,
    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of realistic browser User-Agents.
    pub user_agent: Option<String>,
    /// Transport-level retry policy for 5xx responses.
    pub retry: RetryConfig,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            probe_timeout_ms: 2_000,
            pool_size: 6,
            max_candidates: 6,
            homepage_tlds: DEFAULT_HOMEPAGE_TLDS.iter().map(|s| (*s).to_owned()).collect(),
            search_endpoint: "https://html.duckduckgo.com/html/".to_owned(),
            max_search_results: 20,
            page_timeout_ms: 5_000,
            search_pool_size: 10,
            keep_count: 8,
            recency_days: 365,
            tld_allowlist: DEFAULT_TLD_ALLOWLIST.iter().map(|s| (*s).to_owned()).collect(),
            user_agent: None,
            retry: RetryConfig::default(),
        }
    }
}

/// Retry policy applied by [`crate::transport::HttpTransport`].
///
/// Only server-side (5xx) statuses are retried, and only for the
/// idempotent verbs the transport issues (GET and HEAD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Extra attempts after the first one.
    pub max_retries: u32,
    /// Base backoff in milliseconds; attempt `n` waits `backoff_ms * 2^n`.
    pub backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_ms: 400,
        }
    }
}

impl RetryConfig {
    /// A policy that never retries.
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            backoff_ms: 0,
        }
    }

    /// Delay before retry number `attempt` (0-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1_u64.checked_shl(attempt).unwrap_or(u64::MAX);
        Duration::from_millis(self.backoff_ms.saturating_mul(factor))
    }
}

impl WebConfig {
    /// Per-probe timeout as a [`Duration`].
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    /// Per-page timeout for search harvesting as a [`Duration`].
    pub fn page_timeout(&self) -> Duration {
        Duration::from_millis(self.page_timeout_ms)
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `probe_timeout_ms`, `page_timeout_ms`, `pool_size`, `search_pool_size`, `keep_count`
    ///   must be greater than 0
    /// - `recency_days` must not be negative
    /// - `homepage_tlds` and `tld_allowlist` must not be empty
    /// - `search_endpoint` must be an absolute URL
    pub fn validate(&self) -> Result<(), WebError> {
        if self.probe_timeout_ms == 0 {
            return Err(WebError::Config(
                "probe_timeout_ms must be greater than 0".into(),
            ));
        }
        if self.page_timeout_ms == 0 {
            return Err(WebError::Config(
                "page_timeout_ms must be greater than 0".into(),
            ));
        }
        if self.pool_size == 0 {
            return Err(WebError::Config("pool_size must be greater than 0".into()));
        }
        if self.search_pool_size == 0 {
            return Err(WebError::Config(
                "search_pool_size must be greater than 0".into(),
            ));
        }
        if self.keep_count == 0 {
            return Err(WebError::Config("keep_count must be greater than 0".into()));
        }
        if self.recency_days < 0 {
            return Err(WebError::Config("recency_days must not be negative".into()));
        }
        if self.homepage_tlds.is_empty() {
            return Err(WebError::Config(
                "at least one homepage TLD must be configured".into(),
            ));
        }
        if self.tld_allowlist.is_empty() {
            return Err(WebError::Config("tld_allowlist must not be empty".into()));
        }
        if url::Url::parse(&self.search_endpoint).is_err() {
            return Err(WebError::Config(format!(
                "search_endpoint is not a valid URL: {}",
                self.search_endpoint
            )));
        }
        Ok(())
    }
}
