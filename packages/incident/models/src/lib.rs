#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Canonical incident record and the operation category taxonomy.
//!
//! Every dataset source (bundled workbook, bundled JSON, user upload)
//! normalizes its rows into [`IncidentRecord`] values. Derived views
//! (statistics, categorized subsets, chart series, map clusters) are
//! recomputed from the working set and never stored back on the record.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Fallback bucket name for grouping fields the source row left blank.
pub const UNSPECIFIED: &str = "unspecified";

/// One normalized incident entry.
///
/// Fields always carry a defined default so downstream group-by operations
/// never see a missing key. Coordinates are either both valid finite numbers
/// or both absent; a record missing a coordinate is never placed at 0°,0°.
///
/// Records are immutable after normalization. Each load or upload replaces
/// the whole working set; there is no incremental merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRecord {
    /// Calendar date the operation occurred. `None` when the source field
    /// was missing or unparseable.
    pub date: Option<NaiveDate>,
    /// Free-text time of day as found in the source (e.g. `"14:30"`).
    pub time: String,
    /// Latitude (WGS84). `None` means "not mappable".
    pub latitude: Option<f64>,
    /// Longitude (WGS84). `None` means "not mappable".
    pub longitude: Option<f64>,
    /// Province name, `"unspecified"` when absent.
    pub province: String,
    /// Department or district name, `"unspecified"` when absent.
    pub department: String,
    /// Intervention type label, `"unspecified"` when absent.
    pub intervention_type: String,
    /// Free-text description of the operation. May be empty.
    pub description: String,
    /// Operation identifier from the source (e.g. `"OP-001"`). May be empty.
    pub operation_id: String,
}

impl Default for IncidentRecord {
    fn default() -> Self {
        Self {
            date: None,
            time: String::new(),
            latitude: None,
            longitude: None,
            province: UNSPECIFIED.to_string(),
            department: UNSPECIFIED.to_string(),
            intervention_type: UNSPECIFIED.to_string(),
            description: String::new(),
            operation_id: String::new(),
        }
    }
}

impl IncidentRecord {
    /// Returns `true` when the record carries a mappable coordinate pair.
    #[must_use]
    pub const fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    /// Returns `(latitude, longitude)` when both coordinates are present.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

/// The seven mutually exclusive operation categories.
///
/// Every record is assigned to exactly one category; there is no
/// "uncategorized" bucket. Declaration order is the keyword-match priority
/// order used by the categorizer.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Arrests and detentions
    Detained,
    /// Identity, vehicle, and checkpoint controls
    Controlled,
    /// Victims and otherwise affected persons
    Affected,
    /// Judicial and operational procedures
    Procedures,
    /// Armed confrontations and neutralized suspects
    Neutralized,
    /// Human trafficking and exploitation cases
    Trafficking,
    /// Seizures of drugs, weapons, and other contraband
    Seizures,
}

impl Category {
    /// All categories in keyword-match priority order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Detained,
            Self::Controlled,
            Self::Affected,
            Self::Procedures,
            Self::Neutralized,
            Self::Trafficking,
            Self::Seizures,
        ]
    }

    /// Lowercase keywords that assign a record to this category when found
    /// in its description or intervention type. Spanish, matching the
    /// source data.
    #[must_use]
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Detained => &["detención", "detenido", "arresto"],
            Self::Controlled => &["control", "verificación", "despliegue"],
            Self::Affected => &["afectado", "víctima", "damnificado", "herido"],
            Self::Procedures => &["procedimiento", "operativo", "intervención"],
            Self::Neutralized => &["abatido", "enfrentamiento", "tiroteo"],
            Self::Trafficking => &["trata", "tráfico", "explotación", "traficante"],
            Self::Seizures => &[
                "incautación",
                "secuestro",
                "decomiso",
                "droga",
                "arma",
                "narcótico",
            ],
        }
    }

    /// Maps a deterministic hash bucket in `0..100` to a category.
    ///
    /// Used by the categorizer's fallback rule to spread generic
    /// "police order" records across categories with a stable distribution.
    #[must_use]
    pub const fn from_fallback_bucket(bucket: u32) -> Self {
        match bucket {
            0..=14 => Self::Detained,
            15..=34 => Self::Controlled,
            35..=44 => Self::Affected,
            45..=74 => Self::Procedures,
            75..=79 => Self::Neutralized,
            80..=87 => Self::Trafficking,
            _ => Self::Seizures,
        }
    }
}

/// Presentation-ready chart data: parallel label and value sequences.
///
/// `labels` and `values` always have equal length with matching positional
/// correspondence. An empty input produces an empty series, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    /// Bucket labels in display order.
    pub labels: Vec<String>,
    /// Count per bucket, positionally matching `labels`.
    pub values: Vec<u64>,
}

impl ChartSeries {
    /// Number of buckets in the series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` when the series has no buckets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Aggregate counts over a working set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Total number of records.
    pub total: u64,
    /// Count per intervention type.
    pub by_intervention_type: BTreeMap<String, u64>,
    /// Count per province.
    pub by_province: BTreeMap<String, u64>,
}
