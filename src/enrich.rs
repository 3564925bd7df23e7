//! Full-text enrichment: fetch each record's article page and flatten it
//! to plain text.
//!
//! Runs after all sources are gathered (and the feed source filtered).
//! Every record gets its own fetch; a failed or non-200 fetch leaves that
//! record's body as `None` and never bleeds content from a neighboring
//! row. Fetches are issued one at a time, in row order.

use futures::stream::{self, StreamExt};
use reqwest::Client;
use scraper::Html;
use tracing::{debug, instrument, warn};

use crate::models::{EnrichedRecord, NewsRecord};

/// Separator between a feed headline and its trailing publisher name,
/// e.g. `"Hernia repair breakthrough - Example Times"`.
const TITLE_SEPARATOR: &str = " -";

/// Enrich every record with the full text of its linked article.
///
/// Produces the narrowed final shape: `source` and `summary` are dropped,
/// a `header` label derived from the title is added. Row order is
/// preserved.
#[instrument(level = "info", skip_all, fields(count = records.len()))]
pub async fn enrich_records(client: &Client, records: Vec<NewsRecord>) -> Vec<EnrichedRecord> {
    stream::iter(records)
        .then(|record| async move {
            let body = fetch_body(client, &record.link).await;
            EnrichedRecord {
                header: header_from_title(&record.title),
                title: record.title,
                link: record.link,
                body,
                published: record.published,
            }
        })
        .collect()
        .await
}

/// Derive the short header label: everything before the first `" -"`.
pub(crate) fn header_from_title(title: &str) -> String {
    title.split(TITLE_SEPARATOR).next().unwrap_or(title).to_string()
}

/// Fetch one article page and extract its flattened text.
///
/// Any transport error or non-200 status yields `None` for this record
/// only; the pipeline carries on with the remaining rows.
async fn fetch_body(client: &Client, url: &str) -> Option<String> {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, %url, "Article fetch failed; leaving body empty");
            return None;
        }
    };

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        warn!(%status, %url, "Article fetch returned non-200 status; leaving body empty");
        return None;
    }

    match response.text().await {
        Ok(html) => {
            let body = flatten_body(&html);
            debug!(bytes = body.len(), %url, "Extracted article body");
            Some(body)
        }
        Err(e) => {
            warn!(error = %e, %url, "Reading article body failed; leaving body empty");
            None
        }
    }
}

/// Strip all markup and flatten the page to a single text blob.
///
/// Blank lines and lines containing a tab (navigation chrome, script
/// indentation) are dropped; the remaining lines are concatenated with no
/// separator.
pub(crate) fn flatten_body(html: &str) -> String {
    let document = Html::parse_document(html);
    let text: String = document.root_element().text().collect();
    text.split('\n')
        .filter(|line| !line.is_empty() && !line.contains('\t'))
        .collect()
}
