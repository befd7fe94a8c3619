//! Error types for the gleaner-web crate.
//!
//! Messages are stable strings suitable for logging. Query text never
//! appears in an error message.

/// Errors that can occur while probing or harvesting web pages.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// An HTTP request failed at the transport level.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A request did not complete within its timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The server answered with a status the caller cannot use.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// Failed to parse a response body.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for gleaner-web results.
pub type Result<T> = std::result::Result<T, WebError>;
