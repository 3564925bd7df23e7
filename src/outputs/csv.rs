//! CSV output for the combined result table.
//!
//! One row per [`EnrichedRecord`], columns
//! `title,link,body,published,header`. Empty `body`/`published` fields
//! mean the fetch failed or the source carried no date; the row itself is
//! still part of the result.

use std::error::Error;

use tracing::{info, instrument};

use crate::models::EnrichedRecord;

/// Write the assembled table to `path`, overwriting any previous file.
#[instrument(level = "info", skip_all, fields(path = %path, rows = table.len()))]
pub fn write_table(table: &[EnrichedRecord], path: &str) -> Result<(), Box<dyn Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in table {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!("Wrote combined result CSV");
    Ok(())
}
