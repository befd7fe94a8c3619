//! Instant-answer abstracts.

use super::{FetchContext, get_found, parse_json, with_params};
use crate::error::Result;

pub(crate) async fn fetch(ctx: &FetchContext<'_>, query: &str) -> Result<String> {
    let url = with_params(
        &ctx.endpoints.instant_answer,
        &[
            ("q", query),
            ("format", "json"),
            ("no_redirect", "1"),
            ("no_html", "1"),
        ],
    )?;
    let Some(page) = get_found(ctx, &url).await? else {
        return Ok(String::new());
    };
    parse_answer(&page.body)
}

/// `Abstract` when non-empty, else the text of the first related topic.
pub(crate) fn parse_answer(body: &str) -> Result<String> {
    let json = parse_json(body)?;

    let abstract_text = json
        .get("Abstract")
        .and_then(|a| a.as_str())
        .unwrap_or_default();
    if !abstract_text.is_empty() {
        return Ok(abstract_text.to_owned());
    }

    let related = json
        .get("RelatedTopics")
        .and_then(|t| t.as_array())
        .and_then(|topics| topics.first())
        .and_then(|topic| topic.get("Text"))
        .and_then(|t| t.as_str())
        .unwrap_or_default();
    Ok(related.to_owned())
}
