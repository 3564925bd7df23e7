//! Data models for news search results.
//!
//! This module defines the two record shapes that flow through the pipeline:
//! - [`NewsRecord`]: the normalized intermediate shape every source adapter
//!   produces, whatever its native response looks like
//! - [`EnrichedRecord`]: the narrowed final row after body enrichment,
//!   which is what gets written to the output CSV
//!
//! Each pipeline stage consumes its input set and produces a new one;
//! records are never shared or mutated across stages.

use serde::Serialize;

/// A normalized news search result from a single source adapter.
///
/// # Invariants
///
/// * `link` is unique within one adapter's output (adapters suppress
///   duplicates across their own pages before returning).
/// * `published`, when `Some`, is always `YYYY-MM-DD` and therefore
///   comparable lexicographically as a date. The HTML search sources
///   never carry a machine-readable date and always emit `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsRecord {
    /// The article headline.
    pub title: String,
    /// Publisher/site name, empty when the source does not provide one.
    pub source: String,
    /// Canonical article URL. Never a redirector URL; adapters that see
    /// wrapped links resolve them before emitting the record.
    pub link: String,
    /// Publish date normalized to `YYYY-MM-DD`, or `None` when unknown.
    pub published: Option<String>,
    /// Source-provided short description or snippet, may be empty.
    pub summary: String,
}

/// The final projected row after body enrichment.
///
/// This is a deliberately narrowed shape: the `source` and `summary`
/// fields of [`NewsRecord`] are dropped at this stage, and a short
/// `header` label derived from the title is added. Serializes directly
/// to the CSV columns `title,link,body,published,header` (with `None`
/// rendered as an empty field).
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedRecord {
    pub title: String,
    pub link: String,
    /// Full extracted article text, or `None` when the fetch failed or
    /// answered with a non-200 status.
    pub body: Option<String>,
    pub published: Option<String>,
    /// Portion of the title before the first `" -"` separator.
    pub header: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_news_record_creation() {
        let record = NewsRecord {
            title: "Hernia repair breakthrough".to_string(),
            source: "Example Times".to_string(),
            link: "https://example.com/article".to_string(),
            published: Some("2022-08-12".to_string()),
            summary: "A short summary".to_string(),
        };
        assert_eq!(record.link, "https://example.com/article");
        assert_eq!(record.published.as_deref(), Some("2022-08-12"));
    }

    #[test]
    fn test_enriched_record_csv_columns() {
        let row = EnrichedRecord {
            title: "Headline - Example Times".to_string(),
            link: "https://example.com/article".to_string(),
            body: None,
            published: None,
            header: "Headline".to_string(),
        };

        let mut writer = csv::Writer::from_writer(vec![]);
        writer.serialize(&row).unwrap();
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("title,link,body,published,header"));
        assert_eq!(
            lines.next(),
            Some("Headline - Example Times,https://example.com/article,,,Headline")
        );
    }
}
