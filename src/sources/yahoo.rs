//! Yahoo News HTML search adapter.
//!
//! Yahoo News has no feed, so results are scraped from the search result
//! pages at `https://news.search.yahoo.com/search?p=<keywords>&b=<offset>`.
//! Two pages are fetched (offsets 1 and 11, ten results per page).
//!
//! # Redirector links
//!
//! Card links point at a Yahoo click-tracking redirector. The real target
//! is recovered by percent-decoding the href and pulling the URL out of
//! the `RU=<target>/RK` marker; a card whose link lacks the marker is
//! skipped as malformed.

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::error::ScrapeError;
use crate::models::NewsRecord;
use crate::sources::select_text;

pub(crate) const YAHOO_NEWS_SEARCH_BASE: &str = "https://news.search.yahoo.com/search";

/// Result offsets of the pages fetched per run (ten results per page).
const PAGE_OFFSETS: [u32; 2] = [1, 11];

/// Matches the redirect target inside a percent-decoded Yahoo click URL.
static REDIRECT_TARGET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"RU=(.+)/RK").unwrap());

/// Adapter for the Yahoo News search result pages.
pub struct YahooNewsSource {
    client: Client,
    base_url: String,
}

impl YahooNewsSource {
    /// `base_url` is the search root ([`YAHOO_NEWS_SEARCH_BASE`] in
    /// production, a mock server in tests).
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Fetch both result pages for `keywords` and return the deduplicated
    /// record set.
    ///
    /// A duplicate card (same resolved link seen earlier in the run, on
    /// either page) is suppressed entirely, snippet included.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::Http`] — network or TLS failure
    /// - [`ScrapeError::UnexpectedStatus`] — non-success HTTP status
    #[instrument(level = "info", skip(self))]
    pub async fn fetch(&self, keywords: &str) -> Result<Vec<NewsRecord>, ScrapeError> {
        let mut records = Vec::new();
        for offset in PAGE_OFFSETS {
            let url = format!(
                "{}?p={}&b={}",
                self.base_url,
                urlencoding::encode(keywords),
                offset
            );
            info!(%url, "Fetching Yahoo News results page");

            let response = self.client.get(&url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ScrapeError::UnexpectedStatus {
                    status: status.as_u16(),
                    url,
                });
            }

            let html = response.text().await?;
            records.extend(parse_cards(&html));
        }

        let records = dedupe_by_link(records);
        info!(count = records.len(), "Collected Yahoo News records");
        Ok(records)
    }
}

/// Parse all result cards on one page. Malformed cards are logged and
/// skipped; the rest of the page is still processed.
fn parse_cards(html: &str) -> Vec<NewsRecord> {
    let document = Html::parse_document(html);
    let card_selector = Selector::parse("div.NewsArticle").unwrap();

    document
        .select(&card_selector)
        .filter_map(|card| match extract_card(&card) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(error = %e, "Skipping malformed Yahoo result card");
                None
            }
        })
        .collect()
}

fn extract_card(card: &ElementRef<'_>) -> Result<NewsRecord, ScrapeError> {
    let title = select_text(card, "h4.s-title")?;
    let source = select_text(card, "span.s-source")?;
    let posted = select_text(card, "span.s-time")?
        .replace('·', "")
        .trim()
        .to_string();
    let summary = select_text(card, "p.s-desc")?;

    let anchor_selector = Selector::parse("a").unwrap();
    let raw_link = card
        .select(&anchor_selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .ok_or_else(|| ScrapeError::card("missing link anchor"))?;
    let link = resolve_redirect(raw_link)?;

    debug!(%title, %posted, %link, "Extracted Yahoo result card");
    Ok(NewsRecord {
        title,
        source,
        link,
        published: None,
        summary,
    })
}

/// Unwrap a Yahoo redirector href into the real article URL.
fn resolve_redirect(href: &str) -> Result<String, ScrapeError> {
    let unquoted = urlencoding::decode(href)
        .map_err(|_| ScrapeError::card("link href is not valid percent-encoding"))?;
    let target = REDIRECT_TARGET_RE
        .captures(unquoted.as_ref())
        .map(|captures| captures[1].to_string())
        .ok_or_else(|| ScrapeError::card("redirector link without RU= target"))?;
    Url::parse(&target)
        .map_err(|_| ScrapeError::card(format!("redirect target is not a URL: {target}")))?;
    Ok(target)
}

/// Suppress records whose link was already emitted earlier in the run,
/// keeping first occurrences in order.
fn dedupe_by_link(records: Vec<NewsRecord>) -> Vec<NewsRecord> {
    records
        .into_iter()
        .unique_by(|record| record.link.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn card(title: &str, target: &str) -> String {
        let wrapped = format!(
            "https://r.search.yahoo.com/_ylt=abc/RU={}/RK=2/RS=xyz-",
            urlencoding::encode(target)
        );
        format!(
            r#"<div class="NewsArticle">
              <a href="{wrapped}"><h4 class="s-title">{title}</h4></a>
              <span class="s-source">Example Times</span>
              <span class="s-time">· 2 hours ago</span>
              <p class="s-desc"> Snippet for {title}. </p>
            </div>"#
        )
    }

    #[test]
    fn test_resolve_redirect_unwraps_target() {
        let href = "https://r.search.yahoo.com/_ylt=abc/RU=https%3A%2F%2Fexample.com%2Fstory/RK=2/RS=xyz-";
        assert_eq!(
            resolve_redirect(href).unwrap(),
            "https://example.com/story"
        );
    }

    #[test]
    fn test_resolve_redirect_without_marker_is_a_card_error() {
        let err = resolve_redirect("https://example.com/plain-link").unwrap_err();
        assert!(matches!(err, ScrapeError::Card { .. }));
    }

    #[test]
    fn test_parse_cards_extracts_fields() {
        let html = format!("<html><body>{}</body></html>", card("First story", "https://example.com/s1"));
        let records = parse_cards(&html);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "First story");
        assert_eq!(records[0].source, "Example Times");
        assert_eq!(records[0].link, "https://example.com/s1");
        assert_eq!(records[0].published, None);
        assert_eq!(records[0].summary, "Snippet for First story.");
    }

    #[test]
    fn test_parse_cards_skips_malformed_card() {
        let html = format!(
            r#"<html><body>
            {}
            <div class="NewsArticle">
              <a href="https://example.com/not-a-redirector"><h4 class="s-title">Bad card</h4></a>
              <span class="s-source">X</span>
              <span class="s-time">1h</span>
              <p class="s-desc">d</p>
            </div>
            </body></html>"#,
            card("Good card", "https://example.com/good")
        );

        let records = parse_cards(&html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Good card");
    }

    #[test]
    fn test_duplicate_link_is_fully_suppressed() {
        let html = format!(
            "<html><body>{}{}{}</body></html>",
            card("First story", "https://example.com/s1"),
            card("Same story again", "https://example.com/s1"),
            card("Other story", "https://example.com/s2"),
        );

        let records = dedupe_by_link(parse_cards(&html));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "First story");
        assert_eq!(records[1].title, "Other story");
        // The duplicate's snippet is gone with it.
        assert!(records.iter().all(|r| r.summary != "Snippet for Same story again."));
    }

    #[tokio::test]
    async fn test_fetch_dedups_across_pages() {
        let server = MockServer::start().await;
        let page_one = format!(
            "<html><body>{}{}</body></html>",
            card("Story one", "https://example.com/s1"),
            card("Story two", "https://example.com/s2"),
        );
        // Page two repeats s2 and adds s3.
        let page_two = format!(
            "<html><body>{}{}</body></html>",
            card("Story two again", "https://example.com/s2"),
            card("Story three", "https://example.com/s3"),
        );

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("b", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(page_one))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("b", "11"))
            .respond_with(ResponseTemplate::new(200).set_body_string(page_two))
            .mount(&server)
            .await;

        let source =
            YahooNewsSource::new(Client::new(), format!("{}/search", server.uri()));
        let records = source.fetch("hernia").await.unwrap();

        let links: Vec<_> = records.iter().map(|r| r.link.as_str()).collect();
        assert_eq!(
            links,
            vec![
                "https://example.com/s1",
                "https://example.com/s2",
                "https://example.com/s3"
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_propagates_bad_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let source =
            YahooNewsSource::new(Client::new(), format!("{}/search", server.uri()));
        let err = source.fetch("hernia").await.unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::UnexpectedStatus { status: 403, .. }
        ));
    }
}
