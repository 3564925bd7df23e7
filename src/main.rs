//! # newsgrab
//!
//! Retrieves news articles matching a keyword from three web sources,
//! normalizes them into one tabular shape, and writes the result as CSV.
//!
//! ## Sources
//!
//! - Google News RSS search (the only source with publish dates; honors
//!   optional locale/region hints and an optional date-range filter)
//! - Yahoo News HTML search results (two pages, redirector links unwrapped)
//! - Bing News HTML search results (single page)
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Validation**: keyword presence and date format, before any network call
//! 2. **Retrieval**: each source adapter maps its native response into the
//!    common record shape
//! 3. **Filtering**: Google records pass through the optional date-range filter
//! 4. **Enrichment**: every record's article page is fetched and flattened
//!    to plain text
//! 5. **Output**: the concatenated table is written to a CSV file
//!
//! ## Usage
//!
//! ```sh
//! newsgrab -s "hernia repair"
//! newsgrab -s hernia --schedule-time 07:30
//! ```

use chrono::{Local, NaiveTime};
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod enrich;
mod error;
mod filter;
mod models;
mod outputs;
mod pipeline;
mod sources;
mod utils;

use cli::Cli;
use pipeline::SearchRequest;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!("newsgrab starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let request = SearchRequest {
        keywords: args.search_keywords.first().cloned().unwrap_or_default(),
        start_date: args.start_date.clone(),
        end_date: args.end_date.clone(),
        location: args.location.clone(),
        region: args.region.clone(),
    };

    // Fail fast on bad input before scheduling or touching the network.
    if let Err(e) = request.validate() {
        eprintln!("{e}");
        return Err(e.into());
    }

    utils::append_keyword_log(&args.keyword_log, &request.keywords).await?;

    match args.schedule_time.as_deref() {
        Some(raw) => {
            let target = NaiveTime::parse_from_str(raw, "%H:%M")
                .map_err(|_| format!("invalid --schedule-time '{raw}', expected HH:MM"))?;
            info!(%target, "Scheduling one run per day");
            loop {
                let wait = utils::duration_until(target, Local::now().naive_local());
                info!(
                    secs = wait.num_seconds(),
                    "Sleeping until next scheduled run"
                );
                tokio::time::sleep(wait.to_std()?).await;
                run_job(&request, &args.output).await;
            }
        }
        None => {
            run_job(&request, &args.output).await;
            Ok(())
        }
    }
}

/// One pipeline invocation: search, then persist the table.
///
/// Job failures are logged, never propagated; a scheduled run must not
/// take the daily loop down with it.
async fn run_job(request: &SearchRequest, output: &str) {
    let start_time = std::time::Instant::now();
    info!(keywords = %request.keywords, "Starting search run");

    match pipeline::run_search(request).await {
        Ok(table) => {
            if let Err(e) = outputs::csv::write_table(&table, output) {
                error!(path = %output, error = %e, "Failed writing CSV output");
            } else {
                info!(path = %output, rows = table.len(), "Wrote combined result");
            }
        }
        Err(e) => {
            error!(error = %e, "Search pipeline failed");
        }
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, secs = elapsed.as_secs(), "Run complete");
}
