//! Google News RSS search adapter.
//!
//! Google News exposes keyword search as an RSS 2.0 feed at
//! `https://news.google.com/rss/search?q=<keywords>`. The optional `hl`
//! (language) and `gl` (country) parameters localize the results.
//!
//! This is the only source that carries a machine-readable publish date;
//! it is normalized to `YYYY-MM-DD` here, at the adapter boundary, so
//! downstream stages only ever see ISO dates or `None`.

use reqwest::Client;
use rss::Channel;
use tracing::{info, instrument, warn};

use crate::error::ScrapeError;
use crate::filter::normalize_pub_date;
use crate::models::NewsRecord;

pub(crate) const GOOGLE_NEWS_RSS_BASE: &str = "https://news.google.com/rss";

/// Adapter for the Google News RSS search feed.
pub struct GoogleNewsSource {
    client: Client,
    base_url: String,
}

impl GoogleNewsSource {
    /// `base_url` is the feed root ([`GOOGLE_NEWS_RSS_BASE`] in
    /// production, a mock server in tests).
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    fn search_url(&self, keywords: &str, location: Option<&str>, region: Option<&str>) -> String {
        let mut url = format!(
            "{}/search?q={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(keywords)
        );
        if let Some(hl) = location {
            url.push_str("&hl=");
            url.push_str(hl);
        }
        if let Some(gl) = region {
            url.push_str("&gl=");
            url.push_str(gl);
        }
        url
    }

    /// Fetch and map the search feed for `keywords`.
    ///
    /// A feed with zero entries yields an empty vec, not an error.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::Http`] — network or TLS failure
    /// - [`ScrapeError::UnexpectedStatus`] — non-success HTTP status
    /// - [`ScrapeError::Feed`] — response body is not parseable RSS
    #[instrument(level = "info", skip(self))]
    pub async fn fetch(
        &self,
        keywords: &str,
        location: Option<&str>,
        region: Option<&str>,
    ) -> Result<Vec<NewsRecord>, ScrapeError> {
        let url = self.search_url(keywords, location, region);
        info!(%url, "Fetching Google News search feed");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let bytes = response.bytes().await?;
        let channel = Channel::read_from(&bytes[..])?;
        let records = map_items(&channel);
        info!(count = records.len(), "Mapped Google News feed entries");
        Ok(records)
    }
}

/// Map feed items to [`NewsRecord`]s. Items without a title or link are
/// logged and skipped; those two fields are required downstream.
fn map_items(channel: &Channel) -> Vec<NewsRecord> {
    channel
        .items()
        .iter()
        .filter_map(|item| {
            let (Some(title), Some(link)) = (item.title(), item.link()) else {
                warn!("Skipping feed entry without title or link");
                return None;
            };
            Some(NewsRecord {
                title: title.to_string(),
                source: item
                    .source()
                    .and_then(|s| s.title())
                    .unwrap_or_default()
                    .to_string(),
                link: link.to_string(),
                published: item.pub_date().and_then(normalize_pub_date),
                summary: item.description().unwrap_or_default().to_string(),
            })
        })
        .collect()
}
