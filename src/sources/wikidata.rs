//! Wikidata entity descriptions.

use super::{FetchContext, get_found, parse_json};
use crate::error::Result;

pub(crate) async fn fetch(ctx: &FetchContext<'_>, query: &str) -> Result<String> {
    let url = format!(
        "{}/{}.json?flavor=simple",
        ctx.endpoints.wikidata.trim_end_matches('/'),
        urlencoding::encode(query)
    );
    let Some(page) = get_found(ctx, &url).await? else {
        return Ok(String::new());
    };
    parse_description(&page.body)
}

/// English description of the first entity in an entity-data response.
pub(crate) fn parse_description(body: &str) -> Result<String> {
    let json = parse_json(body)?;
    let description = json
        .get("entities")
        .and_then(|e| e.as_object())
        .and_then(|entities| entities.values().next())
        .and_then(|entity| entity.pointer("/descriptions/en/value"))
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    Ok(description.to_owned())
}
