//! Output writers for the assembled result table.
//!
//! The pipeline itself only returns records; persistence lives here, on
//! the caller's side of the boundary.
//!
//! # Submodules
//!
//! - [`csv`]: Writes the enriched record table to a flat CSV file

pub mod csv;
