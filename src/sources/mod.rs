//! Generic source fetchers.
//!
//! Each fetcher issues exactly one upstream request and extracts a short
//! text field from the response. A 404 is a valid "not found" and yields
//! an empty string; any other non-2xx status is an error. Caching is done
//! by the caller, not here.

pub mod abstract_text;
pub mod instant_answer;
pub mod news;
pub mod wikidata;
pub mod wikipedia;

use std::time::Duration;

use gleaner_web::{Page, Transport};

use crate::config::Endpoints;
use crate::error::{CollectError, Result};

/// Everything a generic fetcher needs for one request.
pub(crate) struct FetchContext<'a> {
    pub transport: &'a dyn Transport,
    pub endpoints: &'a Endpoints,
    pub timeout: Duration,
    pub news_items: usize,
}

/// GET `url`, mapping 404 to `None` and other non-2xx statuses to errors.
pub(crate) async fn get_found(ctx: &FetchContext<'_>, url: &str) -> Result<Option<Page>> {
    let page = ctx.transport.get(url, ctx.timeout).await?;
    if page.status == 404 {
        tracing::debug!("upstream reported not found");
        return Ok(None);
    }
    if !page.is_success() {
        return Err(CollectError::Status(page.status));
    }
    Ok(Some(page))
}

/// Parse a JSON response body.
pub(crate) fn parse_json(body: &str) -> Result<serde_json::Value> {
    serde_json::from_str(body).map_err(|e| CollectError::Parse(e.to_string()))
}

/// Append `params` to `endpoint` as a URL-encoded query string.
pub(crate) fn with_params(endpoint: &str, params: &[(&str, &str)]) -> Result<String> {
    url::Url::parse_with_params(endpoint, params)
        .map(String::from)
        .map_err(|e| CollectError::Config(format!("invalid endpoint {endpoint}: {e}")))
}

/// Join `endpoint` and a percent-encoded path segment.
pub(crate) fn with_segment(endpoint: &str, segment: &str) -> String {
    format!(
        "{}/{}",
        endpoint.trim_end_matches('/'),
        urlencoding::encode(segment)
    )
}
