//! Wikipedia page summaries.

use super::{FetchContext, get_found, parse_json, with_segment};
use crate::error::Result;

/// Fetch the summary extract for the page titled `query`.
pub(crate) async fn fetch(ctx: &FetchContext<'_>, query: &str) -> Result<String> {
    let url = with_segment(&ctx.endpoints.wikipedia, query);
    let Some(page) = get_found(ctx, &url).await? else {
        return Ok(String::new());
    };
    parse_summary(&page.body)
}

/// Read the `extract` field of a summary response.
pub(crate) fn parse_summary(body: &str) -> Result<String> {
    let json = parse_json(body)?;
    Ok(json
        .get("extract")
        .and_then(|e| e.as_str())
        .unwrap_or_default()
        .to_owned())
}
