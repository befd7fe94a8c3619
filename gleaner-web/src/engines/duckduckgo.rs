//! DuckDuckGo HTML results page: query URL construction and link parsing.
//!
//! Uses the HTML-only endpoint, which requires no JavaScript and is
//! tolerant of automated requests. Only the organic result links are
//! read; titles and engine snippets are not needed downstream.

use scraper::{Html, Selector};
use url::Url;

use crate::error::WebError;

/// Build the results page URL for `query` against `endpoint`.
///
/// # Errors
///
/// Returns [`WebError::Config`] if `endpoint` is not an absolute URL.
pub fn search_url(endpoint: &str, query: &str) -> Result<String, WebError> {
    let url = Url::parse_with_params(endpoint, &[("q", query)])
        .map_err(|e| WebError::Config(format!("invalid search endpoint: {e}")))?;
    Ok(url.into())
}

/// Resolve a result anchor's `href` to the page it points at.
///
/// Protocol-relative hrefs are given `https:`. Links through the
/// `duckduckgo.com/l/` redirector are unwrapped to their `uddg` target.
fn resolve_href(href: &str) -> Option<Url> {
    let absolute = match href.strip_prefix("//") {
        Some(rest) => Url::parse(&format!("https://{rest}")).ok()?,
        None => Url::parse(href).ok()?,
    };

    let redirected = absolute.domain() == Some("duckduckgo.com") && absolute.path().starts_with("/l/");
    if !redirected {
        return Some(absolute);
    }

    let target = absolute
        .query_pairs()
        .find_map(|(name, value)| (name == "uddg").then(|| value.into_owned()))?;
    Url::parse(&target).ok()
}

/// Parse up to `max_results` organic result links, in ranked order.
///
/// Ads (`.result--ad`) are skipped, as are anchors whose `href` cannot be
/// resolved to an absolute URL.
///
/// # Errors
///
/// Returns [`WebError::Parse`] if a selector fails to compile.
pub fn parse_result_links(html: &str, max_results: usize) -> Result<Vec<String>, WebError> {
    let document = Html::parse_document(html);

    let link_sel = Selector::parse("a.result__a")
        .map_err(|e| WebError::Parse(format!("invalid link selector: {e:?}")))?;
    let ad_sel = Selector::parse(".result--ad a.result__a")
        .map_err(|e| WebError::Parse(format!("invalid ad selector: {e:?}")))?;

    let ads: Vec<_> = document.select(&ad_sel).map(|el| el.id()).collect();

    let mut links: Vec<String> = Vec::new();
    for anchor in document.select(&link_sel) {
        if links.len() >= max_results {
            break;
        }
        if ads.contains(&anchor.id()) {
            continue;
        }
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if let Some(url) = resolve_href(href) {
            links.push(url.into());
        }
    }

    tracing::debug!(count = links.len(), "DuckDuckGo result links parsed");
    Ok(links)
}
