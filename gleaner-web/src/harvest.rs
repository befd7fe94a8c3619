//! Search harvesting: fresh, quality-filtered snippets from web results.
//!
//! Fetches one results page, keeps links whose host ends in an allowed
//! top-level domain, and fetches those pages with bounded concurrency.
//! Snippets are accepted in completion order until `keep_count` is
//! reached; the remaining fetches are dropped, which cancels them.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use url::Url;

use crate::config::WebConfig;
use crate::engines::duckduckgo;
use crate::error::WebError;
use crate::extract::{find_date, is_stale, snippet_from_html};
use crate::transport::Transport;

/// Collects snippets from the pages behind a web search.
pub struct SearchHarvester {
    transport: Arc<dyn Transport>,
    config: WebConfig,
}

impl std::fmt::Debug for SearchHarvester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchHarvester")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SearchHarvester {
    /// Create a harvester that issues its requests through `transport`.
    pub fn new(transport: Arc<dyn Transport>, config: WebConfig) -> Self {
        Self { transport, config }
    }

    /// Harvest snippets for `query`, judging freshness against today's UTC date.
    ///
    /// # Errors
    ///
    /// Returns an error if the results page cannot be fetched or returns
    /// a non-2xx status. Failures on individual result pages are logged
    /// and skipped.
    pub async fn harvest(&self, query: &str) -> Result<String, WebError> {
        self.harvest_at(query, chrono::Utc::now().date_naive()).await
    }

    /// Harvest snippets for `query`, judging freshness against `today`.
    ///
    /// Returns the accepted snippets joined by newlines, in the order their
    /// pages finished loading. An empty string means nothing qualified.
    ///
    /// # Errors
    ///
    /// Same as [`SearchHarvester::harvest`].
    pub async fn harvest_at(&self, query: &str, today: NaiveDate) -> Result<String, WebError> {
        tracing::trace!(query, "harvesting search results");
        let timeout = self.config.page_timeout();

        let url = duckduckgo::search_url(&self.config.search_endpoint, query)?;
        let results = self.transport.get(&url, timeout).await?;
        if !results.is_success() {
            return Err(WebError::Status(results.status));
        }

        let candidates: Vec<String> =
            duckduckgo::parse_result_links(&results.body, self.config.max_search_results)?
                .into_iter()
                .filter(|link| url_allowed(link, &self.config.tld_allowlist))
                .collect();
        tracing::debug!(count = candidates.len(), "search candidates passed quality filter");

        let transport = self.transport.as_ref();
        let recency_days = self.config.recency_days;
        let mut fetches = stream::iter(candidates)
            .map(move |link| async move {
                fetch_candidate(transport, &link, timeout, today, recency_days).await
            })
            .buffer_unordered(self.config.search_pool_size);

        let mut accepted = Vec::new();
        while let Some(outcome) = fetches.next().await {
            let Some(snippet) = outcome else {
                continue;
            };
            accepted.push(snippet);
            if accepted.len() >= self.config.keep_count {
                break;
            }
        }

        tracing::debug!(accepted = accepted.len(), "search harvest finished");
        Ok(accepted.join("\n"))
    }
}

/// Fetch one candidate page and return its snippet if it qualifies.
async fn fetch_candidate(
    transport: &dyn Transport,
    link: &str,
    timeout: Duration,
    today: NaiveDate,
    recency_days: i64,
) -> Option<String> {
    let page = match transport.get(link, timeout).await {
        Ok(page) if page.is_success() => page,
        Ok(page) => {
            tracing::trace!(url = link, status = page.status, "search candidate rejected");
            return None;
        }
        Err(err) => {
            tracing::trace!(url = link, error = %err, "search candidate fetch failed");
            return None;
        }
    };

    let snippet = snippet_from_html(&page.body);
    if snippet.is_empty() {
        return None;
    }

    if let Some(date) = find_date(&page.body) {
        if is_stale(date, today, recency_days) {
            tracing::trace!(url = link, %date, "search candidate is stale");
            return None;
        }
    }

    Some(snippet)
}

/// Returns `true` if `link` parses and its host passes [`host_allowed`].
pub fn url_allowed(link: &str, allowlist: &[String]) -> bool {
    Url::parse(link)
        .ok()
        .and_then(|url| url.host_str().map(|host| host_allowed(host, allowlist)))
        .unwrap_or(false)
}

/// Returns `true` if `host` equals an allowed TLD or ends with `.<tld>`.
pub fn host_allowed(host: &str, allowlist: &[String]) -> bool {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    allowlist.iter().any(|tld| {
        let tld = tld.trim_start_matches('.').to_ascii_lowercase();
        host == tld
            || host
                .strip_suffix(tld.as_str())
                .is_some_and(|rest| rest.ends_with('.'))
    })
}
