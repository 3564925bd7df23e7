//! Publish-date normalization and inclusive date-range filtering.
//!
//! Google News RSS carries publish dates in the RFC-822 style used by
//! RSS 2.0 (`"Fri, 12 Aug 2022 07:30:00 GMT"`). They are normalized to
//! `YYYY-MM-DD` at the adapter boundary so the `published` field is
//! always either ISO-shaped or `None`, whether or not a range filter was
//! requested. Filtering then compares the ISO strings lexicographically,
//! which orders the same as the dates themselves.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::models::NewsRecord;

/// Date format used by the Google News RSS `pubDate` field.
pub const FEED_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Normalize a feed-native date string to `YYYY-MM-DD`.
///
/// Returns `None` when the string does not match [`FEED_DATE_FORMAT`];
/// the caller treats that as "no usable date", not as an error.
pub fn normalize_pub_date(raw: &str) -> Option<String> {
    NaiveDateTime::parse_from_str(raw.trim(), FEED_DATE_FORMAT)
        .ok()
        .map(|dt| dt.format("%Y-%m-%d").to_string())
}

/// Retain records whose publish date falls in `[start, end]` (inclusive).
///
/// A no-op unless *both* bounds are given: a single bound skips filtering
/// entirely, mirroring the validation asymmetry in
/// [`crate::pipeline::SearchRequest::validate`]. Records without a
/// normalized date are dropped from filtered output.
pub fn filter_by_date_range(
    records: Vec<NewsRecord>,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Vec<NewsRecord> {
    let (Some(start), Some(end)) = (start_date, end_date) else {
        return records;
    };

    let before = records.len();
    let retained: Vec<NewsRecord> = records
        .into_iter()
        .filter(|record| {
            record
                .published
                .as_deref()
                .is_some_and(|published| start <= published && published <= end)
        })
        .collect();
    debug!(
        before,
        after = retained.len(),
        start,
        end,
        "Applied date range filter"
    );
    retained
}
