//! Display filtering by province and date range.
//!
//! Filters are recomputed from the working set on every input change
//! rather than cached incrementally; collections are small enough that a
//! fresh pass is cheaper than invalidation bookkeeping.

use chrono::NaiveDate;
use ops_map_incident_models::IncidentRecord;

/// Filter settings from the dashboard controls. All fields optional;
/// the default criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Exact province match, `None` for all provinces.
    pub province: Option<String>,
    /// Inclusive lower date bound.
    pub from: Option<NaiveDate>,
    /// Inclusive upper date bound.
    pub to: Option<NaiveDate>,
}

impl FilterCriteria {
    /// Returns `true` when the record passes every set bound.
    ///
    /// Undated records fail any date bound: a record that cannot be placed
    /// on the timeline is excluded from a time-bounded view.
    #[must_use]
    pub fn matches(&self, record: &IncidentRecord) -> bool {
        if let Some(province) = &self.province {
            if record.province != *province {
                return false;
            }
        }

        if self.from.is_some() || self.to.is_some() {
            let Some(date) = record.date else {
                return false;
            };
            if self.from.is_some_and(|from| date < from) {
                return false;
            }
            if self.to.is_some_and(|to| date > to) {
                return false;
            }
        }

        true
    }
}

/// Applies the criteria, returning the matching records in input order.
#[must_use]
pub fn apply_filter(records: &[IncidentRecord], criteria: &FilterCriteria) -> Vec<IncidentRecord> {
    records
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(province: &str, date: Option<&str>) -> IncidentRecord {
        IncidentRecord {
            province: province.to_string(),
            date: date.and_then(|d| NaiveDate::parse_from_str(d, "%d/%m/%Y").ok()),
            ..Default::default()
        }
    }

    #[test]
    fn default_criteria_match_everything() {
        let records = vec![record("Salta", Some("15/01/2023")), record("Jujuy", None)];
        let filtered = apply_filter(&records, &FilterCriteria::default());
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn province_filter_is_exact() {
        let records = vec![
            record("Buenos Aires", Some("15/01/2023")),
            record("Córdoba", Some("16/01/2023")),
        ];
        let criteria = FilterCriteria {
            province: Some("Córdoba".to_string()),
            ..Default::default()
        };
        let filtered = apply_filter(&records, &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].province, "Córdoba");
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let records = vec![
            record("Salta", Some("14/01/2023")),
            record("Salta", Some("15/01/2023")),
            record("Salta", Some("20/01/2023")),
            record("Salta", Some("21/01/2023")),
        ];
        let criteria = FilterCriteria {
            from: NaiveDate::from_ymd_opt(2023, 1, 15),
            to: NaiveDate::from_ymd_opt(2023, 1, 20),
            ..Default::default()
        };
        let filtered = apply_filter(&records, &criteria);
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn undated_records_drop_only_under_date_bounds() {
        let records = vec![record("Salta", None)];

        let by_province = FilterCriteria {
            province: Some("Salta".to_string()),
            ..Default::default()
        };
        assert_eq!(apply_filter(&records, &by_province).len(), 1);

        let by_date = FilterCriteria {
            from: NaiveDate::from_ymd_opt(2023, 1, 1),
            ..Default::default()
        };
        assert!(apply_filter(&records, &by_date).is_empty());
    }

    #[test]
    fn combined_criteria_intersect() {
        let records = vec![
            record("Salta", Some("15/01/2023")),
            record("Salta", Some("15/03/2023")),
            record("Jujuy", Some("15/01/2023")),
        ];
        let criteria = FilterCriteria {
            province: Some("Salta".to_string()),
            from: NaiveDate::from_ymd_opt(2023, 1, 1),
            to: NaiveDate::from_ymd_opt(2023, 1, 31),
        };
        let filtered = apply_filter(&records, &criteria);
        assert_eq!(filtered.len(), 1);
    }
}
