//! Collector configuration, loadable from TOML.
//!
//! Every field has a default, so a config file only needs the keys it
//! wants to change:
//!
//! ```toml
//! sources = ["wikipedia", "homepage", "news"]
//! max_chars = 2000
//!
//! [web]
//! keep_count = 4
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use gleaner_web::WebConfig;
use serde::{Deserialize, Serialize};

use crate::error::{CollectError, Result};

/// Top-level configuration for a [`crate::Collector`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Source names to query, in merge order. Unknown names and duplicates
    /// are tolerated.
    pub sources: Vec<String>,
    /// Per-request timeout for the generic fetchers, in seconds.
    pub timeout_secs: u64,
    /// Character budget of the merged output.
    pub max_chars: usize,
    /// Capacity of the FIFO result cache.
    pub cache_cap: usize,
    /// Number of headlines read from the news feed.
    pub news_items: usize,
    /// Upstream base URLs.
    pub endpoints: Endpoints,
    /// Homepage probing, search harvesting and transport settings.
    pub web: WebConfig,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            sources: vec!["wikipedia".to_owned()],
            timeout_secs: 10,
            max_chars: 4_096,
            cache_cap: 512,
            news_items: 5,
            endpoints: Endpoints::default(),
            web: WebConfig::default(),
        }
    }
}

/// Base URLs of the upstream providers.
///
/// Overridable so tests and mirrors can point the collector elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// Page summary endpoint; the title is appended as a path segment.
    pub wikipedia: String,
    /// Entity data endpoint; `<title>.json?flavor=simple` is appended.
    pub wikidata: String,
    /// RSS search endpoint for news headlines.
    pub news: String,
    /// Instant-answer JSON endpoint.
    pub instant_answer: String,
    /// SPARQL endpoint queried for abstracts.
    pub sparql: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            wikipedia: "https://en.wikipedia.org/api/rest_v1/page/summary".to_owned(),
            wikidata: "https://www.wikidata.org/wiki/Special:EntityData".to_owned(),
            news: "https://news.google.com/rss/search".to_owned(),
            instant_answer: "https://api.duckduckgo.com/".to_owned(),
            sparql: "https://dbpedia.org/sparql".to_owned(),
        }
    }
}

impl Endpoints {
    fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("wikipedia", self.wikipedia.as_str()),
            ("wikidata", self.wikidata.as_str()),
            ("news", self.news.as_str()),
            ("instant_answer", self.instant_answer.as_str()),
            ("sparql", self.sparql.as_str()),
        ]
        .into_iter()
    }
}

impl CollectorConfig {
    /// Per-request timeout for the generic fetchers.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validates this configuration.
    ///
    /// Source names are not checked here: unknown names are skipped at
    /// collection time with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::Config`] if a numeric limit is zero, an
    /// endpoint is not an absolute URL, or the web settings are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(CollectError::Config(
                "timeout_secs must be greater than 0".into(),
            ));
        }
        if self.cache_cap == 0 {
            return Err(CollectError::Config("cache_cap must be greater than 0".into()));
        }
        if self.news_items == 0 {
            return Err(CollectError::Config(
                "news_items must be greater than 0".into(),
            ));
        }
        for (name, endpoint) in self.endpoints.iter() {
            if url::Url::parse(endpoint).is_err() {
                return Err(CollectError::Config(format!(
                    "endpoints.{name} is not a valid URL: {endpoint}"
                )));
            }
        }
        self.web
            .validate()
            .map_err(|e| CollectError::Config(format!("web: {e}")))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CollectError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CollectError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load the configuration the binary should start from.
    ///
    /// An explicit `path` must exist. Without one, the file at
    /// [`CollectorConfig::default_config_path`] is used if present.
    /// `None` means no file was found.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Option<Self>> {
        Self::load_with_fallback(path, &Self::default_config_path())
    }

    /// Like [`CollectorConfig::load`], with `fallback` in place of the
    /// default config path.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file cannot be read or parsed.
    pub fn load_with_fallback(path: Option<&Path>, fallback: &Path) -> Result<Option<Self>> {
        match path {
            Some(path) => Self::from_file(path).map(Some),
            None if fallback.is_file() => Self::from_file(fallback).map(Some),
            None => Ok(None),
        }
    }

    /// Returns the default config file path: `~/.config/gleaner/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("gleaner").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("gleaner")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/gleaner-config/config.toml")
        }
    }
}
