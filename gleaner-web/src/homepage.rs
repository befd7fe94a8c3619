//! Homepage discovery: guess an entity's domain and race probes across it.
//!
//! # Pipeline
//!
//! 1. Turn the entity name into candidate domains (`acmeuniversity.edu`,
//!    `acmeuniversity.com`, …, `acme.edu`)
//! 2. Probe every candidate concurrently, at most `pool_size` at a time
//! 3. The first probe to finish with a non-empty snippet wins; every other
//!    probe is aborted and its result dropped
//! 4. If no probe wins, ask the search engine for `"<entity> official website"`
//!    and extract a snippet from the first organic result

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::WebConfig;
use crate::engines::duckduckgo;
use crate::error::WebError;
use crate::extract::snippet_from_html;
use crate::transport::Transport;

/// Suffix stripped from a slug to produce the alternate candidate.
const UNIVERSITY_SUFFIX: &str = "university";

/// Finds a descriptive snippet on an entity's own website.
pub struct HomepageResolver {
    transport: Arc<dyn Transport>,
    config: WebConfig,
}

impl std::fmt::Debug for HomepageResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HomepageResolver")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HomepageResolver {
    /// Create a resolver that issues its requests through `transport`.
    pub fn new(transport: Arc<dyn Transport>, config: WebConfig) -> Self {
        Self { transport, config }
    }

    /// Resolve a homepage snippet for `entity`.
    ///
    /// Never fails: an entity with no discoverable homepage yields an
    /// empty string, which is a valid negative result.
    pub async fn resolve(&self, entity: &str) -> String {
        let candidates = candidate_domains(
            entity,
            &self.config.homepage_tlds,
            self.config.max_candidates,
        );
        tracing::trace!(entity, candidates = ?candidates, "probing homepage candidates");

        if let Some(snippet) = self.race(candidates).await {
            return snippet;
        }

        match self.search_fallback(entity).await {
            Ok(snippet) => snippet,
            Err(err) => {
                tracing::debug!(error = %err, "homepage search fallback failed");
                String::new()
            }
        }
    }

    /// Probe all candidates concurrently; first non-empty snippet wins.
    async fn race(&self, candidates: Vec<String>) -> Option<String> {
        let permits = Arc::new(Semaphore::new(self.config.pool_size));
        let timeout = self.config.probe_timeout();
        let mut probes = JoinSet::new();

        for domain in candidates {
            let transport = Arc::clone(&self.transport);
            let permits = Arc::clone(&permits);
            probes.spawn(async move {
                let Ok(_permit) = permits.acquire_owned().await else {
                    return (domain, String::new());
                };
                let snippet = probe(transport.as_ref(), &domain, timeout).await;
                (domain, snippet)
            });
        }

        while let Some(joined) = probes.join_next().await {
            match joined {
                Ok((domain, snippet)) if !snippet.is_empty() => {
                    tracing::trace!(%domain, "homepage probe won the race");
                    probes.abort_all();
                    return Some(snippet);
                }
                Ok((domain, _)) => {
                    tracing::trace!(%domain, "homepage probe came back empty");
                }
                Err(err) => {
                    tracing::debug!(error = %err, "homepage probe task failed");
                }
            }
        }

        None
    }

    /// Search for the entity's official website and read its first result.
    async fn search_fallback(&self, entity: &str) -> Result<String, WebError> {
        let timeout = self.config.probe_timeout() * 2;
        let url = duckduckgo::search_url(
            &self.config.search_endpoint,
            &format!("{entity} official website"),
        )?;

        let results = self.transport.get(&url, timeout).await?;
        let Some(target) = duckduckgo::parse_result_links(&results.body, 1)?
            .into_iter()
            .next()
        else {
            return Ok(String::new());
        };

        tracing::trace!(%target, "homepage fallback following first search result");
        let page = self.transport.get(&target, timeout).await?;
        Ok(snippet_from_html(&page.body))
    }
}

/// Generate candidate domains for `name`.
///
/// The name is lowercased and split into alphanumeric tokens, which are
/// concatenated into a slug. A slug ending in `university` also yields
/// the slug without that suffix. Each slug is crossed with `tlds` in
/// order, and the list is capped at `max` entries.
pub fn candidate_domains(name: &str, tlds: &[String], max: usize) -> Vec<String> {
    let slug: String = name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect();
    if slug.is_empty() {
        return Vec::new();
    }

    let mut roots = vec![slug.clone()];
    if let Some(stripped) = slug.strip_suffix(UNIVERSITY_SUFFIX) {
        if !stripped.is_empty() {
            roots.push(stripped.to_owned());
        }
    }

    roots
        .iter()
        .flat_map(|root| tlds.iter().map(move |tld| format!("{root}.{tld}")))
        .take(max)
        .collect()
}

/// Probe one domain over https, then http.
///
/// A scheme is abandoned when the HEAD request fails or returns a status
/// of 400 or above. A 200 GET response with a non-empty snippet ends the
/// probe. Any other outcome yields an empty string.
pub async fn probe(transport: &dyn Transport, domain: &str, timeout: Duration) -> String {
    for scheme in ["https", "http"] {
        let url = format!("{scheme}://{domain}");

        match transport.head(&url, timeout).await {
            Ok(status) if status < 400 => {}
            Ok(_) | Err(_) => continue,
        }

        if let Ok(page) = transport.get(&url, timeout).await {
            if page.status == 200 {
                let snippet = snippet_from_html(&page.body);
                if !snippet.is_empty() {
                    return snippet;
                }
            }
        }
    }
    String::new()
}
