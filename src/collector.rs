//! Concurrent multi-source collection.
//!
//! # Pipeline
//!
//! 1. Parse the requested source names; unknown names are logged and skipped
//! 2. Fetch every distinct kind concurrently with [`futures_util::future::join_all`]
//! 3. Each fetch consults the shared [`ResultCache`] first and stores what it gets
//! 4. A failed fetch is logged at warn level and contributes empty text
//! 5. Texts are merged in requested order by [`crate::merge::merge`]

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::join_all;
use gleaner_web::{HomepageResolver, HttpTransport, SearchHarvester, Transport};

use crate::cache::{CacheKey, ResultCache};
use crate::config::CollectorConfig;
use crate::error::Result;
use crate::merge::merge;
use crate::source::{SourceKind, SourceSpec};
use crate::sources::{self, FetchContext};

/// Gathers short descriptive text about an entity from several sources.
///
/// One collector owns one HTTP transport and one result cache; both live
/// as long as the collector and are shared by every `collect` call on it.
pub struct Collector {
    config: CollectorConfig,
    transport: Arc<dyn Transport>,
    cache: ResultCache,
    homepage: HomepageResolver,
    harvester: SearchHarvester,
}

impl std::fmt::Debug for Collector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collector")
            .field("config", &self.config)
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl Collector {
    /// Create a collector backed by a real HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CollectError::Config`] if `config` is invalid, or a
    /// web error if the HTTP client cannot be built.
    pub fn new(config: CollectorConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(&config.web)?;
        Ok(Self::assemble(config, Arc::new(transport)))
    }

    /// Create a collector that sends every request through `transport`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CollectError::Config`] if `config` is invalid.
    pub fn with_transport(config: CollectorConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(config, transport))
    }

    fn assemble(config: CollectorConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            cache: ResultCache::new(config.cache_cap),
            homepage: HomepageResolver::new(Arc::clone(&transport), config.web.clone()),
            harvester: SearchHarvester::new(Arc::clone(&transport), config.web.clone()),
            transport,
            config,
        }
    }

    /// The configuration this collector was built with.
    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// This collector's result cache.
    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Collect text about `query` from the configured sources.
    ///
    /// Never fails: unreachable or failing sources contribute nothing, and
    /// the result is at most `max_chars` characters long.
    pub async fn collect(&self, query: &str) -> String {
        self.collect_with(query, self.config.sources.as_slice()).await
    }

    /// Collect text about `query` from `sources`, in that merge order.
    ///
    /// Duplicate names are fetched once. Unknown names are skipped with a
    /// warning.
    pub async fn collect_with<S: AsRef<str>>(&self, query: &str, sources: &[S]) -> String {
        tracing::trace!(query, "collecting");

        let specs: Vec<SourceSpec> = sources
            .iter()
            .map(|name| SourceSpec::parse(name.as_ref()))
            .collect();

        let mut kinds: Vec<SourceKind> = Vec::new();
        for spec in &specs {
            match spec {
                SourceSpec::Known(kind) => {
                    if !kinds.contains(kind) {
                        kinds.push(*kind);
                    }
                }
                SourceSpec::Unknown(name) => {
                    tracing::warn!(source = %name, "unknown source, skipping");
                }
            }
        }

        let fetches = kinds
            .iter()
            .map(|&kind| async move { (kind, self.fetch_isolated(kind, query).await) });
        let outcomes: HashMap<SourceKind, String> = join_all(fetches).await.into_iter().collect();

        let texts: Vec<&str> = specs
            .iter()
            .filter_map(|spec| match spec {
                SourceSpec::Known(kind) => outcomes.get(kind).map(String::as_str),
                SourceSpec::Unknown(_) => None,
            })
            .collect();

        let merged = merge(&texts, self.config.max_chars);
        tracing::debug!(
            sources = kinds.len(),
            chars = merged.chars().count(),
            "collection finished"
        );
        merged
    }

    /// Fetch one kind, turning any error into empty text.
    async fn fetch_isolated(&self, kind: SourceKind, query: &str) -> String {
        match self.fetch_cached(kind, query).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(source = %kind, error = %err, "source fetch failed");
                String::new()
            }
        }
    }

    /// Fetch one kind through the result cache. Errors are not cached.
    async fn fetch_cached(&self, kind: SourceKind, query: &str) -> Result<String> {
        let key = CacheKey::new(kind, query);
        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(source = %kind, "cache hit");
            return Ok(hit);
        }
        tracing::debug!(source = %kind, "cache miss");

        let text = self.fetch(kind, query).await?;
        self.cache.put(key, text.clone());
        Ok(text)
    }

    async fn fetch(&self, kind: SourceKind, query: &str) -> Result<String> {
        let ctx = FetchContext {
            transport: self.transport.as_ref(),
            endpoints: &self.config.endpoints,
            timeout: self.config.timeout(),
            news_items: self.config.news_items,
        };
        match kind {
            SourceKind::Wikipedia => sources::wikipedia::fetch(&ctx, query).await,
            SourceKind::Wikidata => sources::wikidata::fetch(&ctx, query).await,
            SourceKind::News => sources::news::fetch(&ctx, query).await,
            SourceKind::InstantAnswer => sources::instant_answer::fetch(&ctx, query).await,
            SourceKind::Abstract => sources::abstract_text::fetch(&ctx, query).await,
            SourceKind::Homepage => Ok(self.homepage.resolve(query).await),
            SourceKind::Search => Ok(self.harvester.harvest(query).await?),
        }
    }
}
