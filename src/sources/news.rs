//! News headlines from an RSS search feed.

use scraper::{Html, Selector};

use super::{FetchContext, get_found, with_params};
use crate::error::{CollectError, Result};

pub(crate) async fn fetch(ctx: &FetchContext<'_>, query: &str) -> Result<String> {
    let url = with_params(
        &ctx.endpoints.news,
        &[("q", query), ("hl", "en"), ("gl", "US"), ("ceid", "US:en")],
    )?;
    let Some(page) = get_found(ctx, &url).await? else {
        return Ok(String::new());
    };
    let headlines = parse_headlines(&page.body, ctx.news_items)?;
    Ok(headlines.join("\n"))
}

/// Titles of the first `limit` `<item>` elements of an RSS document.
///
/// Items without a title are skipped but still count toward `limit`.
pub(crate) fn parse_headlines(rss: &str, limit: usize) -> Result<Vec<String>> {
    let document = Html::parse_document(rss);
    let item_sel = Selector::parse("item")
        .map_err(|e| CollectError::Parse(format!("invalid item selector: {e:?}")))?;
    let title_sel = Selector::parse("title")
        .map_err(|e| CollectError::Parse(format!("invalid title selector: {e:?}")))?;

    let headlines = document
        .select(&item_sel)
        .take(limit)
        .filter_map(|item| item.select(&title_sel).next())
        .map(|title| unwrap_cdata(&title.text().collect::<String>()).to_owned())
        .filter(|title| !title.is_empty())
        .collect();
    Ok(headlines)
}

// The HTML parser keeps CDATA markers inside <title> as literal text.
fn unwrap_cdata(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix("<![CDATA[")
        .and_then(|inner| inner.strip_suffix("]]>"))
        .map_or(text, str::trim)
}
