//! HTTP transport seam with User-Agent rotation and 5xx retry.
//!
//! Every network call in gleaner goes through a [`Transport`]. The
//! production implementation, [`HttpTransport`], wraps one shared
//! [`reqwest::Client`] with browser-like headers and rotating User-Agent
//! strings. Tests substitute an in-memory transport.

use std::time::Duration;

use async_trait::async_trait;
use rand::seq::SliceRandom;

use crate::config::{RetryConfig, WebConfig};
use crate::error::WebError;

/// Browser User-Agent strings; each transport picks one at construction.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/134.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_4) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:136.0) Gecko/20100101 Firefox/136.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/134.0.0.0 Safari/537.36 Edg/134.0.0.0",
];

/// A fetched response: final status and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// HTTP status code of the final response.
    pub status: u16,
    /// Response body decoded as text.
    pub body: String,
}

impl Page {
    /// Returns `true` for a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A minimal asynchronous HTTP client.
///
/// Implementations never turn a non-2xx status into an error; callers
/// decide what a status means (a 404 is a valid "not found" for most
/// sources). Only transport failures are errors.
///
/// All implementations must be `Send + Sync` so one instance can be
/// shared by concurrently running fetchers.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a header-only request and return the final status code.
    async fn head(&self, url: &str, timeout: Duration) -> Result<u16, WebError>;

    /// Fetch `url` and return its status and body.
    async fn get(&self, url: &str, timeout: Duration) -> Result<Page, WebError>;
}

/// [`Transport`] backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    retry: RetryConfig,
}

impl HttpTransport {
    /// Build a transport configured from `config`.
    ///
    /// The client has:
    /// - Random User-Agent from the built-in rotation list (or the configured one)
    /// - Redirects followed up to 10 hops
    /// - Brotli and gzip decompression
    ///
    /// # Errors
    ///
    /// Returns [`WebError::Http`] if the client cannot be constructed.
    pub fn new(config: &WebConfig) -> Result<Self, WebError> {
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| random_user_agent().to_owned());

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| WebError::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            retry: config.retry,
        })
    }

    /// Send a request, retrying 5xx responses with exponential backoff.
    async fn send_with_retry(
        &self,
        method: reqwest::Method,
        url: &str,
        timeout: Duration,
    ) -> Result<reqwest::Response, WebError> {
        let max_attempts = self.retry.max_retries.saturating_add(1);
        let mut attempt = 0;
        loop {
            let response = self
                .client
                .request(method.clone(), url)
                .timeout(timeout)
                .header("Accept-Language", "en-US,en;q=0.9")
                .send()
                .await
                .map_err(classify_reqwest_error)?;

            attempt += 1;
            if !response.status().is_server_error() || attempt >= max_attempts {
                return Ok(response);
            }

            let delay = self.retry.backoff(attempt - 1);
            tracing::debug!(
                %method,
                status = response.status().as_u16(),
                attempt,
                delay_ms = delay.as_millis() as u64,
                "server error, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn head(&self, url: &str, timeout: Duration) -> Result<u16, WebError> {
        let response = self
            .send_with_retry(reqwest::Method::HEAD, url, timeout)
            .await?;
        Ok(response.status().as_u16())
    }

    async fn get(&self, url: &str, timeout: Duration) -> Result<Page, WebError> {
        let response = self
            .send_with_retry(reqwest::Method::GET, url, timeout)
            .await?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(classify_reqwest_error)?;
        tracing::trace!(url, status, bytes = body.len(), "response received");
        Ok(Page { status, body })
    }
}

/// Map a reqwest failure onto [`WebError::Timeout`] or [`WebError::Http`].
///
/// The URL is stripped first so the query never reaches a log line.
fn classify_reqwest_error(err: reqwest::Error) -> WebError {
    let err = err.without_url();
    if err.is_timeout() {
        WebError::Timeout(err.to_string())
    } else {
        WebError::Http(err.to_string())
    }
}

/// Pick one of the built-in User-Agent strings at random.
pub fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or_default()
}
