//! Bing News HTML search adapter.
//!
//! Bing News results are scraped from the single search result page at
//! `https://www.bing.com/news/search?q=<keywords>`. Unlike Yahoo, card
//! links are direct article URLs, no redirector unwrapping is needed.

use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::error::ScrapeError;
use crate::models::NewsRecord;
use crate::sources::select_text;

pub(crate) const BING_NEWS_SEARCH_BASE: &str = "https://www.bing.com/news/search";

/// Adapter for the Bing News search result page.
pub struct BingNewsSource {
    client: Client,
    base_url: String,
}

impl BingNewsSource {
    /// `base_url` is the search root ([`BING_NEWS_SEARCH_BASE`] in
    /// production, a mock server in tests).
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Fetch the result page for `keywords`.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::Http`] — network or TLS failure
    /// - [`ScrapeError::UnexpectedStatus`] — non-success HTTP status
    #[instrument(level = "info", skip(self))]
    pub async fn fetch(&self, keywords: &str) -> Result<Vec<NewsRecord>, ScrapeError> {
        let url = format!("{}?q={}", self.base_url, urlencoding::encode(keywords));
        info!(%url, "Fetching Bing News results page");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let html = response.text().await?;
        let records = parse_cards(&html);
        info!(count = records.len(), "Collected Bing News records");
        Ok(records)
    }
}

/// Parse all result cards on the page. Malformed cards are logged and
/// skipped; the rest of the page is still processed.
fn parse_cards(html: &str) -> Vec<NewsRecord> {
    let document = Html::parse_document(html);
    let card_selector = Selector::parse(".card-with-cluster").unwrap();

    document
        .select(&card_selector)
        .filter_map(|card| match extract_card(&card) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(error = %e, "Skipping malformed Bing result card");
                None
            }
        })
        .collect()
}

fn extract_card(card: &ElementRef<'_>) -> Result<NewsRecord, ScrapeError> {
    let title_selector = Selector::parse(".title").unwrap();
    let title_el = card
        .select(&title_selector)
        .next()
        .ok_or_else(|| ScrapeError::card("missing element `.title`"))?;
    let title = title_el.text().collect::<String>().trim().to_string();
    let link = title_el
        .value()
        .attr("href")
        .ok_or_else(|| ScrapeError::card("title element without href"))?
        .to_string();
    Url::parse(&link)
        .map_err(|_| ScrapeError::card(format!("card link is not an absolute URL: {link}")))?;

    let summary = select_text(card, ".snippet")?;
    let source = select_text(card, ".source a")?;
    let posted = select_text(card, "#algocore span+ span")?;

    debug!(%title, %posted, %link, "Extracted Bing result card");
    Ok(NewsRecord {
        title,
        source,
        link,
        published: None,
        summary,
    })
}
