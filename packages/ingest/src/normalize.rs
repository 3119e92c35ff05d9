//! Normalizes raw row objects into canonical [`IncidentRecord`] values.
//!
//! Rows arrive as string-keyed JSON objects, as produced by
//! sheet-to-JSON conversion. Key casing and naming vary between exports
//! (`LATITUD` vs `Latitud Decimal` vs `lat`), so every field is extracted
//! through a prioritized key list. Malformed values degrade to the field
//! default; no row is ever dropped or rejected here.

use chrono::NaiveDate;
use ops_map_incident_models::{IncidentRecord, UNSPECIFIED};
use serde_json::{Map, Value};

/// A raw row object: arbitrary string keys to JSON values.
pub type RawRow = Map<String, Value>;

const LATITUDE_KEYS: &[&str] = &["LATITUD", "Latitud Decimal", "latitud", "lat"];
const LONGITUDE_KEYS: &[&str] = &["LONGITUD", "longitud", "lng", "lon"];
const DATE_KEYS: &[&str] = &["FECHA", "fecha"];
const TIME_KEYS: &[&str] = &["HORA", "hora"];
const DESCRIPTION_KEYS: &[&str] = &["DESCRIPCIÓN", "DESCRIPCION", "descripcion"];
const INTERVENTION_KEYS: &[&str] = &["TIPO_INTERVENCION", "TIPO INTERVENCION", "tipo_intervencion"];
const OPERATION_ID_KEYS: &[&str] = &["ID_OPERATIVO", "id_operativo"];
const PROVINCE_KEYS: &[&str] = &["PROVINCIA", "provincia"];
const DEPARTMENT_KEYS: &[&str] = &[
    "DEPARTAMENTO O PARTIDO",
    "DEPARTAMENTO_O_PARTIDO",
    "departamento",
];

/// Normalizes a sequence of raw rows, one record per row, order preserved.
#[must_use]
pub fn normalize_rows(rows: &[RawRow]) -> Vec<IncidentRecord> {
    rows.iter().map(normalize_row).collect()
}

/// Normalizes a single raw row.
///
/// Coordinates hold the both-or-neither invariant: if only one axis yields
/// a finite number, both are dropped so the record is cleanly unmappable
/// rather than placed on an axis line.
#[must_use]
pub fn normalize_row(row: &RawRow) -> IncidentRecord {
    let latitude = coordinate_field(row, LATITUDE_KEYS);
    let longitude = coordinate_field(row, LONGITUDE_KEYS);
    let (latitude, longitude) = match (latitude, longitude) {
        (Some(lat), Some(lng)) => (Some(lat), Some(lng)),
        _ => (None, None),
    };

    IncidentRecord {
        date: parse_record_date(&text_field(row, DATE_KEYS)),
        time: text_field(row, TIME_KEYS),
        latitude,
        longitude,
        province: labeled_field(row, PROVINCE_KEYS),
        department: labeled_field(row, DEPARTMENT_KEYS),
        intervention_type: labeled_field(row, INTERVENTION_KEYS),
        description: text_field(row, DESCRIPTION_KEYS),
        operation_id: text_field(row, OPERATION_ID_KEYS),
    }
}

/// Parses a record date in `DD/MM/YYYY` or `YYYY-MM-DD` form.
///
/// Blank fields and the `"-"` placeholder seen in real exports yield `None`.
#[must_use]
pub fn parse_record_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() || s == "-" {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%d/%m/%Y") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    None
}

/// Extracts a text field, trying each key in priority order.
///
/// Numeric cell values are rendered as text (spreadsheets routinely store
/// identifiers as numbers). Missing keys yield the empty string.
fn text_field(row: &RawRow, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| row.get(*key).and_then(value_to_text))
        .unwrap_or_default()
}

/// Like [`text_field`], but blank values fall back to `"unspecified"` so
/// downstream grouping never sees an undefined key.
fn labeled_field(row: &RawRow, keys: &[&str]) -> String {
    let text = text_field(row, keys);
    if text.is_empty() {
        UNSPECIFIED.to_string()
    } else {
        text
    }
}

/// Extracts a coordinate, trying each key in priority order.
///
/// The first key holding a present, non-blank value wins; if that value is
/// not numeric the coordinate is `None`. Never 0.0 for a missing value.
fn coordinate_field(row: &RawRow, keys: &[&str]) -> Option<f64> {
    let value = keys.iter().find_map(|key| {
        row.get(*key).filter(|v| match v {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        })
    })?;

    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        // Spreadsheet exports from es-AR locales use comma decimals.
        Value::String(s) => s
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Renders a JSON cell value as trimmed text, `None` when blank or non-scalar.
fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> RawRow {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn normalizes_a_full_row() {
        let record = normalize_row(&row(json!({
            "FECHA": "15/01/2023",
            "HORA": "14:30",
            "LATITUD": -34.6118,
            "LONGITUD": -58.3960,
            "PROVINCIA": "Buenos Aires",
            "DEPARTAMENTO_O_PARTIDO": "La Plata",
            "TIPO_INTERVENCION": "Detención por robo",
            "DESCRIPCION": "Detención de persona por robo en vía pública",
            "ID_OPERATIVO": "OP-001",
        })));

        assert_eq!(record.date, NaiveDate::from_ymd_opt(2023, 1, 15));
        assert_eq!(record.time, "14:30");
        assert_eq!(record.province, "Buenos Aires");
        assert_eq!(record.department, "La Plata");
        assert_eq!(record.operation_id, "OP-001");
        let (lat, lng) = record.coordinates().unwrap();
        assert!((lat - -34.6118).abs() < f64::EPSILON);
        assert!((lng - -58.3960).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_coordinate_is_none_not_zero() {
        let record = normalize_row(&row(json!({ "PROVINCIA": "Córdoba" })));
        assert_eq!(record.latitude, None);
        assert_eq!(record.longitude, None);
    }

    #[test]
    fn lone_latitude_drops_both_axes() {
        let record = normalize_row(&row(json!({ "LATITUD": -34.6 })));
        assert_eq!(record.latitude, None);
        assert_eq!(record.longitude, None);
    }

    #[test]
    fn display_label_coordinate_variant_wins_when_canonical_absent() {
        let record = normalize_row(&row(json!({
            "Latitud Decimal": "-31.42",
            "LONGITUD": "-64.18",
        })));
        let (lat, lng) = record.coordinates().unwrap();
        assert!((lat - -31.42).abs() < f64::EPSILON);
        assert!((lng - -64.18).abs() < f64::EPSILON);
    }

    #[test]
    fn comma_decimal_coordinates_parse() {
        let record = normalize_row(&row(json!({
            "LATITUD": "-34,6118",
            "LONGITUD": "-58,3960",
        })));
        assert!(record.has_coordinates());
    }

    #[test]
    fn non_numeric_coordinate_degrades_to_none() {
        let record = normalize_row(&row(json!({
            "LATITUD": "s/d",
            "LONGITUD": -58.4,
        })));
        assert_eq!(record.latitude, None);
        assert_eq!(record.longitude, None);
    }

    #[test]
    fn accented_description_key_is_honored() {
        let record = normalize_row(&row(json!({
            "DESCRIPCIÓN": "Control vehicular",
        })));
        assert_eq!(record.description, "Control vehicular");
    }

    #[test]
    fn blank_grouping_fields_default_to_unspecified() {
        let record = normalize_row(&row(json!({ "PROVINCIA": "  " })));
        assert_eq!(record.province, UNSPECIFIED);
        assert_eq!(record.department, UNSPECIFIED);
        assert_eq!(record.intervention_type, UNSPECIFIED);
    }

    #[test]
    fn iso_dates_and_placeholder_dates() {
        assert_eq!(
            parse_record_date("2023-02-01"),
            NaiveDate::from_ymd_opt(2023, 2, 1)
        );
        assert_eq!(parse_record_date("-"), None);
        assert_eq!(parse_record_date("31/02/2023"), None);
        assert_eq!(parse_record_date(""), None);
    }

    #[test]
    fn order_is_preserved_and_no_row_dropped() {
        let rows = vec![
            row(json!({ "ID_OPERATIVO": "OP-001" })),
            row(json!({})),
            row(json!({ "ID_OPERATIVO": "OP-003" })),
        ];
        let records = normalize_rows(&rows);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].operation_id, "OP-001");
        assert_eq!(records[1].operation_id, "");
        assert_eq!(records[2].operation_id, "OP-003");
    }

    #[test]
    fn numeric_operation_id_renders_as_text() {
        let record = normalize_row(&row(json!({ "ID_OPERATIVO": 42 })));
        assert_eq!(record.operation_id, "42");
    }
}
