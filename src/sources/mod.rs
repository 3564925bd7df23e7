//! Source adapters for fetching news search results from various providers.
//!
//! Each adapter converts one provider's native response into the common
//! [`NewsRecord`](crate::models::NewsRecord) shape.
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | Google News | [`google`] | RSS search feed | Only source with a machine-readable publish date; honors locale/region hints |
//! | Yahoo News | [`yahoo`] | HTML scraping | Two result pages; links arrive wrapped in a redirector URL |
//! | Bing News | [`bing`] | HTML scraping | Single result page |
//!
//! # Common Patterns
//!
//! Each adapter exports a `fetch` method returning `Vec<NewsRecord>`.
//! Adapters use:
//! - A shared `reqwest::Client` with a browser user-agent (the search
//!   endpoints reject default client identifiers)
//! - Graceful per-card error handling: a malformed result card is logged
//!   and skipped, the rest of the page is still processed
//! - Per-adapter link dedup, so `link` is unique within one adapter's output

pub mod bing;
pub mod google;
pub mod yahoo;

use scraper::{ElementRef, Selector};

use crate::error::ScrapeError;

/// Extract the trimmed text of the first element matching `css` inside
/// `scope`, or a card error naming the missing element.
pub(crate) fn select_text(scope: &ElementRef<'_>, css: &str) -> Result<String, ScrapeError> {
    let selector = Selector::parse(css).unwrap();
    scope
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .ok_or_else(|| ScrapeError::card(format!("missing element `{css}`")))
}
