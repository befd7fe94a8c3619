//! Abstracts from a DBpedia-style SPARQL endpoint.

use super::{FetchContext, get_found, parse_json, with_params};
use crate::error::Result;

pub(crate) async fn fetch(ctx: &FetchContext<'_>, query: &str) -> Result<String> {
    let sparql = abstract_query(query);
    let url = with_params(
        &ctx.endpoints.sparql,
        &[("query", sparql.as_str()), ("format", "json")],
    )?;
    let Some(page) = get_found(ctx, &url).await? else {
        return Ok(String::new());
    };
    parse_abstract(&page.body)
}

/// SPARQL selecting the English `dbo:abstract` of the resource named `name`.
pub(crate) fn abstract_query(name: &str) -> String {
    format!(
        "SELECT ?abs WHERE {{ dbr:{} dbo:abstract ?abs . FILTER(lang(?abs)='en') }} LIMIT 1",
        resource_slug(name)
    )
}

/// Resource local name: spaces become underscores and characters that are
/// not allowed bare in a prefixed name are backslash-escaped.
fn resource_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.trim().chars() {
        match c {
            ' ' => slug.push('_'),
            '~' | '.' | '-' | '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';'
            | '=' | '/' | '?' | '#' | '@' | '%' => {
                slug.push('\\');
                slug.push(c);
            }
            _ => slug.push(c),
        }
    }
    slug
}

/// Value of the first `abs` binding in a SPARQL JSON result.
pub(crate) fn parse_abstract(body: &str) -> Result<String> {
    let json = parse_json(body)?;
    let value = json
        .pointer("/results/bindings/0/abs/value")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    Ok(value.to_owned())
}
