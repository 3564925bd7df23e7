//! The retrieval-and-normalization pipeline.
//!
//! One run: validate the request, fetch each source in order (Google News
//! feed, Yahoo, Bing), date-filter the feed records, enrich every record
//! with full article text, and concatenate the three groups into the
//! final table. Source fetches and per-article fetches happen one at a
//! time, so the assembled table keeps source-group order and row order.
//!
//! Only a validation failure aborts the run. A source whose fetch fails
//! contributes an empty record set; everything else degrades per record.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use tracing::{info, instrument, warn};

use crate::enrich::enrich_records;
use crate::error::ScrapeError;
use crate::filter::filter_by_date_range;
use crate::models::EnrichedRecord;
use crate::sources::bing::{BING_NEWS_SEARCH_BASE, BingNewsSource};
use crate::sources::google::{GOOGLE_NEWS_RSS_BASE, GoogleNewsSource};
use crate::sources::yahoo::{YAHOO_NEWS_SEARCH_BASE, YahooNewsSource};

/// Some of the search endpoints reject default client identifiers, so
/// every request goes out with a realistic browser user-agent.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/85.0.4183.83 Safari/537.36 Edg/85.0.564.44";

const REQUEST_TIMEOUT_SECS: u64 = 15;

/// One keyword search, with optional date bounds and locale hints.
///
/// Everything except `keywords` is optional. The date bounds only take
/// effect together; `location`/`region` are two-letter codes forwarded to
/// the Google News feed as its `hl`/`gl` parameters.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub keywords: String,
    /// Inclusive lower bound, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`.
    pub end_date: Option<String>,
    pub location: Option<String>,
    pub region: Option<String>,
}

impl SearchRequest {
    /// Gate a run before any network call.
    ///
    /// The keyword must be non-empty. When *both* date bounds are present
    /// each must parse as `YYYY-MM-DD`; a single bound is accepted
    /// unchecked because filtering is skipped unless both are present.
    /// No ordering check: an inverted range validates fine and simply
    /// filters to an empty set.
    pub fn validate(&self) -> Result<(), ScrapeError> {
        if self.keywords.trim().is_empty() {
            return Err(ScrapeError::Validation {
                reason: "Please provide keyword.".to_string(),
            });
        }

        if let (Some(start), Some(end)) = (&self.start_date, &self.end_date) {
            if !is_iso_date(start) || !is_iso_date(end) {
                return Err(ScrapeError::Validation {
                    reason: "Please use 'YYYY-MM-DD' date format".to_string(),
                });
            }
        }
        Ok(())
    }
}

fn is_iso_date(s: &str) -> bool {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

/// Where each adapter points. Swapped out for a mock server in tests.
pub(crate) struct SourceEndpoints {
    pub google: String,
    pub yahoo: String,
    pub bing: String,
}

impl Default for SourceEndpoints {
    fn default() -> Self {
        Self {
            google: GOOGLE_NEWS_RSS_BASE.to_string(),
            yahoo: YAHOO_NEWS_SEARCH_BASE.to_string(),
            bing: BING_NEWS_SEARCH_BASE.to_string(),
        }
    }
}

/// Run the full pipeline for one request and return the assembled table.
///
/// # Errors
///
/// [`ScrapeError::Validation`] when the request is invalid, and
/// [`ScrapeError::Http`] when the shared HTTP client cannot be built.
/// Source and per-article failures never surface here.
pub async fn run_search(request: &SearchRequest) -> Result<Vec<EnrichedRecord>, ScrapeError> {
    run_search_at(request, SourceEndpoints::default()).await
}

#[instrument(level = "info", skip_all, fields(keywords = %request.keywords))]
pub(crate) async fn run_search_at(
    request: &SearchRequest,
    endpoints: SourceEndpoints,
) -> Result<Vec<EnrichedRecord>, ScrapeError> {
    request.validate()?;
    let client = build_client()?;

    let google = GoogleNewsSource::new(client.clone(), endpoints.google);
    let feed_records = google
        .fetch(
            &request.keywords,
            request.location.as_deref(),
            request.region.as_deref(),
        )
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, "Google News fetch failed; continuing with empty set");
            Vec::new()
        });
    // Only the feed carries dates; the HTML sources bypass the filter.
    let feed_records = filter_by_date_range(
        feed_records,
        request.start_date.as_deref(),
        request.end_date.as_deref(),
    );

    let yahoo = YahooNewsSource::new(client.clone(), endpoints.yahoo);
    let yahoo_records = yahoo.fetch(&request.keywords).await.unwrap_or_else(|e| {
        warn!(error = %e, "Yahoo News fetch failed; continuing with empty set");
        Vec::new()
    });

    let bing = BingNewsSource::new(client.clone(), endpoints.bing);
    let bing_records = bing.fetch(&request.keywords).await.unwrap_or_else(|e| {
        warn!(error = %e, "Bing News fetch failed; continuing with empty set");
        Vec::new()
    });

    info!(
        google = feed_records.len(),
        yahoo = yahoo_records.len(),
        bing = bing_records.len(),
        "Fetched records from all sources"
    );

    let feed_rows = enrich_records(&client, feed_records).await;
    let yahoo_rows = enrich_records(&client, yahoo_records).await;
    let bing_rows = enrich_records(&client, bing_records).await;

    let table = assemble(feed_rows, yahoo_rows, bing_rows);
    info!(rows = table.len(), "Assembled combined result table");
    Ok(table)
}

fn build_client() -> Result<Client, ScrapeError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .user_agent(BROWSER_USER_AGENT)
        .build()?)
}

/// Concatenate the enriched groups in source order (feed, Yahoo, Bing),
/// preserving row order within each group. No cross-source dedup.
pub fn assemble(
    feed_rows: Vec<EnrichedRecord>,
    yahoo_rows: Vec<EnrichedRecord>,
    bing_rows: Vec<EnrichedRecord>,
) -> Vec<EnrichedRecord> {
    let mut table = feed_rows;
    table.extend(yahoo_rows);
    table.extend(bing_rows);
    table
}
