//! # gleaner-web
//!
//! Web-facing fetchers for gleaner: homepage discovery and search-result
//! harvesting by scraping plain HTML. No API keys, no external services.
//!
//! ## Design
//!
//! - Every request goes through the [`Transport`] seam; [`HttpTransport`]
//!   wraps one shared `reqwest` client with 5xx retry and exponential backoff
//! - [`HomepageResolver`] races probes across guessed domains; the first
//!   non-empty snippet wins and the other probes are aborted
//! - [`SearchHarvester`] fetches result pages with bounded concurrency,
//!   drops stale pages, and stops once enough snippets are accepted
//! - Neither fetcher caches anything; callers own caching
//!
//! ## Security
//!
//! - Queries are logged only at trace level
//! - Error messages never carry request URLs, which may embed the query

pub mod config;
pub mod engines;
pub mod error;
pub mod extract;
pub mod harvest;
pub mod homepage;
pub mod transport;

pub use config::{RetryConfig, WebConfig};
pub use error::{Result, WebError};
pub use harvest::SearchHarvester;
pub use homepage::HomepageResolver;
pub use transport::{HttpTransport, Page, Transport};
