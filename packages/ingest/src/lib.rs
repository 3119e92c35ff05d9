#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Turns raw spreadsheet/JSON rows into the canonical [`IncidentRecord`]
//! working set.
//!
//! Three concerns live here: normalizing heterogeneous row shapes
//! ([`normalize`]), the tiered bundled-dataset loader ([`loader`]), and
//! user-upload validation ([`upload`]). Normalization never fails; only the
//! load and upload entry points surface errors.

pub mod loader;
pub mod normalize;
mod sheet;
pub mod upload;

use ops_map_incident_models::IncidentRecord;
use thiserror::Error;

pub use loader::{load_dataset, sample_records};
pub use normalize::normalize_rows;
pub use upload::import_upload;

/// Errors from a single bundled-source tier.
///
/// The tiered [`load_dataset`] sequence logs these and falls through to the
/// next tier; they surface only when a tier is invoked directly.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File could not be read.
    #[error("Failed to read data file: {0}")]
    Io(#[from] std::io::Error),

    /// Workbook could not be opened or parsed.
    #[error("Failed to parse workbook: {0}")]
    Workbook(#[from] calamine::Error),

    /// JSON file did not contain an array of row objects.
    #[error("Failed to parse JSON rows: {0}")]
    Json(#[from] serde_json::Error),

    /// The source parsed but produced no rows.
    #[error("Data source contains no rows")]
    Empty,
}

/// Errors from validating a user-uploaded spreadsheet.
///
/// All variants are user-visible rejections; the caller keeps its previous
/// working set when one is returned.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Not an Excel workbook by extension.
    #[error("Not a spreadsheet file (expected .xlsx or .xls): {name}")]
    InvalidFileType {
        /// File name as presented by the picker.
        name: String,
    },

    /// The first sheet has no data rows.
    #[error("The uploaded file is empty or contains no data rows")]
    EmptySheet,

    /// No row survived the coordinate-validity filter.
    #[error("No records with valid coordinates were found in the file")]
    NoMappableRecords,

    /// Workbook could not be opened or parsed.
    #[error("Failed to parse the uploaded workbook: {0}")]
    Workbook(#[from] calamine::Error),
}

/// Keeps only records carrying a valid coordinate pair.
///
/// Applied on the upload path, where the new working set must be mappable.
/// The general load path keeps unmappable records for counting purposes.
#[must_use]
pub fn filter_mappable(records: Vec<IncidentRecord>) -> Vec<IncidentRecord> {
    records
        .into_iter()
        .filter(IncidentRecord::has_coordinates)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_mappable_drops_coordinate_less_records() {
        let records = vec![
            IncidentRecord {
                latitude: Some(-34.6),
                longitude: Some(-58.4),
                ..Default::default()
            },
            IncidentRecord::default(),
        ];
        let mappable = filter_mappable(records);
        assert_eq!(mappable.len(), 1);
        assert!(mappable[0].has_coordinates());
    }
}
