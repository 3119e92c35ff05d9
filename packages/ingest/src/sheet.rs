//! Workbook-to-rows conversion.
//!
//! Reads the first sheet of an `.xlsx`/`.xls` workbook, treats the first
//! row as the header, and emits one JSON object per data row. This mirrors
//! the sheet-to-JSON shape the rest of the pipeline normalizes from, so
//! bundled files, uploads, and JSON fixtures all flow through the same
//! [`crate::normalize`] path.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use serde_json::{Map, Number, Value};

use crate::normalize::RawRow;

/// Converts the first sheet of a workbook into raw row objects.
///
/// Columns under a blank header cell are dropped; rows with no populated
/// cells are skipped (trailing blank rows are common in real exports).
///
/// # Errors
///
/// Returns an error if the workbook cannot be opened or its first sheet
/// cannot be read. A workbook with no sheets yields an empty row list.
pub fn sheet_to_rows(path: &Path) -> Result<Vec<RawRow>, calamine::Error> {
    let mut workbook = open_workbook_auto(path)?;

    let Some(range) = workbook.worksheet_range_at(0) else {
        return Ok(Vec::new());
    };
    let range = range?;

    let mut row_iter = range.rows();
    let Some(header_row) = row_iter.next() else {
        return Ok(Vec::new());
    };

    let headers: Vec<Option<String>> = header_row
        .iter()
        .map(|cell| {
            let text = cell.to_string();
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect();

    let mut rows = Vec::new();
    for sheet_row in row_iter {
        let mut row = Map::new();
        for (header, cell) in headers.iter().zip(sheet_row) {
            let Some(key) = header else {
                continue;
            };
            if let Some(value) = cell_to_value(cell) {
                row.insert(key.clone(), value);
            }
        }
        if !row.is_empty() {
            rows.push(row);
        }
    }

    log::debug!("Converted sheet at {} into {} rows", path.display(), rows.len());
    Ok(rows)
}

/// Maps a cell to a JSON value. Empty and error cells map to `None`.
fn cell_to_value(cell: &Data) -> Option<Value> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(Value::String(s.clone())),
        Data::Float(f) => Number::from_f64(*f).map(Value::Number),
        Data::Int(i) => Some(Value::Number(Number::from(*i))),
        Data::Bool(b) => Some(Value::Bool(*b)),
        Data::DateTime(dt) => Number::from_f64(dt.as_f64()).map(Value::Number),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(Value::String(s.clone())),
    }
}
