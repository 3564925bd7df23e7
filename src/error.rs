//! Error types for the search pipeline.
//!
//! Failures are contained close to where they happen: a validation error
//! aborts the whole run, a source fetch error degrades that source to an
//! empty record set, and a card error only skips the single result card
//! it came from. See the handling sites in [`crate::pipeline`] and the
//! source adapters.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Bad user input (missing keyword, malformed date). Fatal to the run.
    #[error("{reason}")]
    Validation { reason: String },

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A search or feed endpoint answered with a non-success status.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The Google News response body is not a parseable RSS document.
    #[error("feed parse error: {0}")]
    Feed(#[from] rss::Error),

    /// One HTML result card is malformed (missing element, bad link).
    /// The card is skipped; the rest of the page is still processed.
    #[error("malformed result card: {reason}")]
    Card { reason: String },
}

impl ScrapeError {
    pub fn card(reason: impl Into<String>) -> Self {
        ScrapeError::Card {
            reason: reason.into(),
        }
    }
}
