//! Command-line interface definitions for newsgrab.
//!
//! This module defines the CLI arguments and options using the `clap` crate.

use clap::Parser;

/// Command-line arguments for the newsgrab application.
///
/// # Examples
///
/// ```sh
/// # Run a search once and write combined_result.csv
/// newsgrab -s "hernia repair"
///
/// # Restrict Google News results to a publish-date range
/// newsgrab -s hernia --start-date 2021-08-12 --end-date 2022-08-12
///
/// # Localized feed, run every day at 07:30
/// newsgrab -s hernie --location de --region DE --schedule-time 07:30
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Search keywords (quote multi-word or boolean queries). May be
    /// repeated; only the first value is used.
    #[arg(short = 's', long = "search", value_name = "KEYWORDS")]
    pub search_keywords: Vec<String>,

    /// Run the search once per day at this local time instead of once
    /// immediately
    #[arg(long, value_name = "HH:MM")]
    pub schedule_time: Option<String>,

    /// Inclusive start of the publish-date range (YYYY-MM-DD); only
    /// applied together with --end-date
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub start_date: Option<String>,

    /// Inclusive end of the publish-date range (YYYY-MM-DD); only
    /// applied together with --start-date
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub end_date: Option<String>,

    /// Two-letter language code for the Google News feed (hl parameter)
    #[arg(long)]
    pub location: Option<String>,

    /// Two-letter country code for the Google News feed (gl parameter)
    #[arg(long)]
    pub region: Option<String>,

    /// Path of the CSV file the combined table is written to
    #[arg(short, long, default_value = "combined_result.csv")]
    pub output: String,

    /// File each searched keyword is appended to
    #[arg(long, default_value = "search_keywords.txt")]
    pub keyword_log: String,
}
