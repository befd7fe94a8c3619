//! Error types for the gleaner collector.
//!
//! None of these ever escape [`crate::Collector::collect`]; they are
//! produced inside individual fetchers, logged, and turned into empty
//! text. Only [`crate::Collector::new`] and the config file helpers
//! return them to callers.

use gleaner_web::WebError;

/// Errors raised while fetching one source or loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    /// Transport-level failure from the web layer.
    #[error(transparent)]
    Web(#[from] WebError),

    /// An upstream answered with a status other than success or not-found.
    #[error("unexpected upstream status {0}")]
    Status(u16),

    /// An upstream response body could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, CollectError>;
