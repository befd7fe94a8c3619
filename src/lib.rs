//! Gleaner: concurrent multi-source text collection about a named entity.
//!
//! Given an entity name (typically an institution), gleaner queries several
//! independent and unreliable text sources at once, deduplicates what comes
//! back line by line, and returns one bounded-length string.
//!
//! # Architecture
//!
//! - **Sources**: Wikipedia, Wikidata, news headlines, an instant-answer API,
//!   a SPARQL abstract lookup, the entity's homepage, and web search
//! - **Cache**: one FIFO [`ResultCache`] per [`Collector`], keyed by source
//!   kind and lowercased query; empty results are cached too
//! - **Web layer**: homepage racing and search harvesting live in the
//!   `gleaner-web` crate behind its `Transport` seam
//! - **Merge**: first-seen line dedup and word-boundary truncation
//!
//! [`Collector::collect`] never fails. Every failure inside it is logged
//! and costs only the text that source would have contributed.
//!
//! ```no_run
//! # async fn demo() -> gleaner::Result<()> {
//! use gleaner::{Collector, CollectorConfig};
//!
//! let config = CollectorConfig {
//!     sources: vec!["wikipedia".into(), "homepage".into(), "news".into()],
//!     ..Default::default()
//! };
//! let collector = Collector::new(config)?;
//! println!("{}", collector.collect("Acme University").await);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod collector;
pub mod config;
pub mod error;
pub mod merge;
pub mod source;
mod sources;

pub use cache::{CacheKey, ResultCache};
pub use collector::Collector;
pub use config::{CollectorConfig, Endpoints};
pub use error::{CollectError, Result};
pub use source::{SourceKind, SourceSpec};
