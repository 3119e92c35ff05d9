//! User-upload validation.
//!
//! An uploaded workbook goes through the same sheet-to-rows conversion and
//! normalization as the bundled sources, then a stricter acceptance rule:
//! the new working set must be mappable, so rows without a valid coordinate
//! pair are dropped and an upload yielding zero mappable records is
//! rejected. On any rejection the caller keeps its previous working set.

use std::path::Path;

use ops_map_incident_models::IncidentRecord;

use crate::normalize::normalize_rows;
use crate::{UploadError, filter_mappable, sheet};

/// Parses and validates an uploaded spreadsheet, returning the replacement
/// working set.
///
/// # Errors
///
/// Returns [`UploadError::InvalidFileType`] before any I/O when the file is
/// not `.xlsx`/`.xls`, [`UploadError::EmptySheet`] when the first sheet has
/// no data rows, and [`UploadError::NoMappableRecords`] when no row carries
/// valid coordinates.
pub fn import_upload(path: &Path) -> Result<Vec<IncidentRecord>, UploadError> {
    if !is_spreadsheet(path) {
        return Err(UploadError::InvalidFileType {
            name: path
                .file_name()
                .map_or_else(|| path.display().to_string(), |n| {
                    n.to_string_lossy().into_owned()
                }),
        });
    }

    let rows = sheet::sheet_to_rows(path)?;
    if rows.is_empty() {
        return Err(UploadError::EmptySheet);
    }

    let records = filter_mappable(normalize_rows(&rows));
    if records.is_empty() {
        return Err(UploadError::NoMappableRecords);
    }

    log::info!(
        "Upload accepted: {} mappable records from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

/// Extension check, case-insensitive. Runs before the file is opened.
fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| ext == "xlsx" || ext == "xls")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_extension_before_io() {
        let err = import_upload(Path::new("informe.pdf")).unwrap_err();
        assert!(matches!(err, UploadError::InvalidFileType { ref name } if name == "informe.pdf"));
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(is_spreadsheet(Path::new("datos.XLSX")));
        assert!(is_spreadsheet(Path::new("datos.xls")));
        assert!(!is_spreadsheet(Path::new("datos.csv")));
        assert!(!is_spreadsheet(Path::new("datos")));
    }

    #[test]
    fn missing_workbook_surfaces_a_parse_error() {
        let err = import_upload(Path::new("/nonexistent/datos.xlsx")).unwrap_err();
        assert!(matches!(err, UploadError::Workbook(_)));
    }
}
