//! Tiered bundled-dataset loading.
//!
//! Sources are tried in order, first success wins: the bundled workbook
//! (`bd.xlsx`, first sheet), the bundled JSON (`bd.json`, array of row
//! objects), then a built-in ten-record sample. Each tier gets a single
//! attempt; failure is logged and falls through. Because the sample tier
//! always succeeds, the sequence as a whole is total.

use std::path::Path;

use ops_map_incident_models::IncidentRecord;
use serde_json::json;

use crate::normalize::{RawRow, normalize_rows};
use crate::{LoadError, sheet};

/// File name of the bundled workbook, tried first.
pub const BUNDLED_WORKBOOK: &str = "bd.xlsx";

/// File name of the bundled JSON fallback.
pub const BUNDLED_JSON: &str = "bd.json";

/// Loads the working set from the bundled sources under `data_dir`.
///
/// Falls through workbook → JSON → built-in sample. The returned collection
/// replaces the caller's working set wholesale.
#[must_use]
pub fn load_dataset(data_dir: &Path) -> Vec<IncidentRecord> {
    match load_bundled_workbook(&data_dir.join(BUNDLED_WORKBOOK)) {
        Ok(records) => {
            log::info!("Loaded {} records from bundled workbook", records.len());
            return records;
        }
        Err(err) => {
            log::warn!("Bundled workbook unavailable, trying JSON: {err}");
        }
    }

    match load_bundled_json(&data_dir.join(BUNDLED_JSON)) {
        Ok(records) => {
            log::info!("Loaded {} records from bundled JSON", records.len());
            return records;
        }
        Err(err) => {
            log::warn!("Bundled JSON unavailable, using sample data: {err}");
        }
    }

    sample_records()
}

/// Loads and normalizes the bundled workbook tier.
///
/// # Errors
///
/// Returns an error if the workbook cannot be opened or parsed, or if its
/// first sheet contains no data rows.
pub fn load_bundled_workbook(path: &Path) -> Result<Vec<IncidentRecord>, LoadError> {
    let rows = sheet::sheet_to_rows(path)?;
    if rows.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(normalize_rows(&rows))
}

/// Loads and normalizes the bundled JSON tier.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not an array of row
/// objects, or contains no rows.
pub fn load_bundled_json(path: &Path) -> Result<Vec<IncidentRecord>, LoadError> {
    let data = std::fs::read_to_string(path)?;
    let rows: Vec<RawRow> = serde_json::from_str(&data)?;
    if rows.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(normalize_rows(&rows))
}

/// The built-in illustrative dataset, used when no bundled file is
/// available. Ten records spanning several provinces and categories.
#[must_use]
pub fn sample_records() -> Vec<IncidentRecord> {
    normalize_rows(&sample_rows())
}

fn sample_rows() -> Vec<RawRow> {
    let rows = json!([
        {
            "FECHA": "15/01/2023",
            "HORA": "14:30",
            "LATITUD": -34.6118,
            "LONGITUD": -58.3960,
            "PROVINCIA": "Buenos Aires",
            "DEPARTAMENTO_O_PARTIDO": "La Plata",
            "TIPO_INTERVENCION": "Detención por robo",
            "DESCRIPCION": "Detención de persona por robo en vía pública",
            "ID_OPERATIVO": "OP-001",
        },
        {
            "FECHA": "20/01/2023",
            "HORA": "09:15",
            "LATITUD": -34.5997,
            "LONGITUD": -58.3731,
            "PROVINCIA": "Buenos Aires",
            "DEPARTAMENTO_O_PARTIDO": "Vicente López",
            "TIPO_INTERVENCION": "Control vehicular",
            "DESCRIPCION": "Control de documentación y estado del vehículo",
            "ID_OPERATIVO": "OP-002",
        },
        {
            "FECHA": "01/02/2023",
            "HORA": "22:45",
            "LATITUD": -31.4201,
            "LONGITUD": -64.1888,
            "PROVINCIA": "Córdoba",
            "DEPARTAMENTO_O_PARTIDO": "Capital",
            "TIPO_INTERVENCION": "Incautación de drogas",
            "DESCRIPCION": "Incautación de sustancias estupefacientes",
            "ID_OPERATIVO": "OP-003",
        },
        {
            "FECHA": "10/02/2023",
            "HORA": "16:20",
            "LATITUD": -32.8895,
            "LONGITUD": -68.8458,
            "PROVINCIA": "Mendoza",
            "DEPARTAMENTO_O_PARTIDO": "Capital",
            "TIPO_INTERVENCION": "Procedimiento por trata",
            "DESCRIPCION": "Operativo contra trata de personas",
            "ID_OPERATIVO": "OP-004",
        },
        {
            "FECHA": "15/02/2023",
            "HORA": "11:30",
            "LATITUD": -24.7821,
            "LONGITUD": -65.4232,
            "PROVINCIA": "Salta",
            "DEPARTAMENTO_O_PARTIDO": "Capital",
            "TIPO_INTERVENCION": "Enfrentamiento armado",
            "DESCRIPCION": "Enfrentamiento con delincuentes, un abatido",
            "ID_OPERATIVO": "OP-005",
        },
        {
            "FECHA": "01/03/2023",
            "HORA": "19:45",
            "LATITUD": -34.6037,
            "LONGITUD": -58.3816,
            "PROVINCIA": "Buenos Aires",
            "DEPARTAMENTO_O_PARTIDO": "Buenos Aires",
            "TIPO_INTERVENCION": "Detención por hurto",
            "DESCRIPCION": "Detención in fraganti por hurto",
            "ID_OPERATIVO": "OP-006",
        },
        {
            "FECHA": "05/03/2023",
            "HORA": "08:15",
            "LATITUD": -27.3678,
            "LONGITUD": -55.8960,
            "PROVINCIA": "Misiones",
            "DEPARTAMENTO_O_PARTIDO": "Posadas",
            "TIPO_INTERVENCION": "Control fronterizo",
            "DESCRIPCION": "Control en puesto fronterizo",
            "ID_OPERATIVO": "OP-007",
        },
        {
            "FECHA": "12/03/2023",
            "HORA": "15:30",
            "LATITUD": -34.6158,
            "LONGITUD": -58.5033,
            "PROVINCIA": "Buenos Aires",
            "DEPARTAMENTO_O_PARTIDO": "Tres de Febrero",
            "TIPO_INTERVENCION": "Procedimiento judicial",
            "DESCRIPCION": "Ejecución de orden judicial",
            "ID_OPERATIVO": "OP-008",
        },
        {
            "FECHA": "18/03/2023",
            "HORA": "20:00",
            "LATITUD": -38.0023,
            "LONGITUD": -57.5575,
            "PROVINCIA": "Buenos Aires",
            "DEPARTAMENTO_O_PARTIDO": "General Pueyrredón",
            "TIPO_INTERVENCION": "Víctima de violencia",
            "DESCRIPCION": "Atención a víctima de violencia doméstica",
            "ID_OPERATIVO": "OP-009",
        },
        {
            "FECHA": "25/03/2023",
            "HORA": "13:45",
            "LATITUD": -26.8241,
            "LONGITUD": -65.2226,
            "PROVINCIA": "Tucumán",
            "DEPARTAMENTO_O_PARTIDO": "Capital",
            "TIPO_INTERVENCION": "Incautación de armas",
            "DESCRIPCION": "Secuestro de armas de fuego",
            "ID_OPERATIVO": "OP-010",
        },
    ]);

    match rows {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::Object(map) => Some(map),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}
