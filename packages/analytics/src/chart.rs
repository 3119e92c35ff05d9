//! Builds presentation-ready [`ChartSeries`] for one category's records.
//!
//! Time views bucket on the parsed record date, so ordering is calendar
//! order regardless of the source's `DD/MM/YYYY` formatting. Group-by views
//! keep first-encountered order, matching how the source rows read.

use std::collections::BTreeMap;

use chrono::Datelike;
use ops_map_incident_models::{ChartSeries, IncidentRecord};

/// Display cap for the department view: first ten groups encountered, not
/// a statistical top-10.
const DEPARTMENT_DISPLAY_CAP: usize = 10;

/// The requested chart shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartView {
    /// One bucket per calendar day; undated records are skipped.
    Daily,
    /// One bucket per `(year, month)`; undated records are skipped.
    Monthly,
    /// One bucket per province, all groups.
    ByProvince,
    /// One bucket per department, capped at the first ten groups.
    ByDepartment,
}

/// Builds the series for a record set and view.
///
/// Labels and values always have equal length and positional
/// correspondence; empty input yields an empty series.
#[must_use]
pub fn build_chart_series(records: &[IncidentRecord], view: ChartView) -> ChartSeries {
    match view {
        ChartView::Daily => daily_series(records),
        ChartView::Monthly => monthly_series(records),
        ChartView::ByProvince => grouped_series(records, |r| r.province.as_str(), None),
        ChartView::ByDepartment => {
            grouped_series(records, |r| r.department.as_str(), Some(DEPARTMENT_DISPLAY_CAP))
        }
    }
}

/// Daily buckets in chronological order, labeled `DD/MM/YYYY`.
///
/// The sort key is the parsed [`chrono::NaiveDate`], so ordering stays
/// chronological even though the display label would not sort that way
/// as a raw string.
fn daily_series(records: &[IncidentRecord]) -> ChartSeries {
    let mut buckets = BTreeMap::new();
    for record in records {
        let Some(date) = record.date else {
            continue;
        };
        *buckets.entry(date).or_insert(0u64) += 1;
    }

    let mut series = ChartSeries::default();
    for (date, count) in buckets {
        series.labels.push(date.format("%d/%m/%Y").to_string());
        series.values.push(count);
    }
    series
}

/// Monthly buckets in calendar order, labeled `MM/YYYY`.
fn monthly_series(records: &[IncidentRecord]) -> ChartSeries {
    let mut buckets = BTreeMap::new();
    for record in records {
        let Some(date) = record.date else {
            continue;
        };
        *buckets.entry((date.year(), date.month())).or_insert(0u64) += 1;
    }

    let mut series = ChartSeries::default();
    for ((year, month), count) in buckets {
        series.labels.push(format!("{month:02}/{year}"));
        series.values.push(count);
    }
    series
}

/// Group-by buckets in first-encountered order, optionally truncated.
fn grouped_series<'a>(
    records: &'a [IncidentRecord],
    key: impl Fn(&'a IncidentRecord) -> &'a str,
    cap: Option<usize>,
) -> ChartSeries {
    let mut groups: Vec<(&str, u64)> = Vec::new();
    for record in records {
        let group = key(record);
        match groups.iter_mut().find(|(name, _)| *name == group) {
            Some((_, count)) => *count += 1,
            None => groups.push((group, 1)),
        }
    }

    if let Some(cap) = cap {
        groups.truncate(cap);
    }

    let mut series = ChartSeries::default();
    for (name, count) in groups {
        series.labels.push(name.to_string());
        series.values.push(count);
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dated(date: &str, province: &str, department: &str) -> IncidentRecord {
        IncidentRecord {
            date: NaiveDate::parse_from_str(date, "%d/%m/%Y").ok(),
            province: province.to_string(),
            department: department.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_input_yields_empty_series() {
        for view in [
            ChartView::Daily,
            ChartView::Monthly,
            ChartView::ByProvince,
            ChartView::ByDepartment,
        ] {
            let series = build_chart_series(&[], view);
            assert!(series.is_empty());
        }
    }

    #[test]
    fn monthly_buckets_sort_chronologically_not_lexicographically() {
        let records = vec![
            dated("01/02/2023", "Buenos Aires", "Capital"),
            dated("15/01/2023", "Buenos Aires", "Capital"),
            dated("20/01/2023", "Buenos Aires", "Capital"),
        ];
        let series = build_chart_series(&records, ChartView::Monthly);
        assert_eq!(series.labels, vec!["01/2023", "02/2023"]);
        assert_eq!(series.values, vec![2, 1]);
    }

    #[test]
    fn monthly_buckets_cross_year_boundaries_in_calendar_order() {
        let records = vec![
            dated("10/01/2024", "Salta", "Capital"),
            dated("05/12/2023", "Salta", "Capital"),
        ];
        let series = build_chart_series(&records, ChartView::Monthly);
        assert_eq!(series.labels, vec!["12/2023", "01/2024"]);
    }

    #[test]
    fn daily_buckets_are_chronological_with_display_labels() {
        let records = vec![
            dated("01/02/2023", "Córdoba", "Capital"),
            dated("15/01/2023", "Córdoba", "Capital"),
            dated("15/01/2023", "Córdoba", "Capital"),
        ];
        let series = build_chart_series(&records, ChartView::Daily);
        // "01/02/2023" < "15/01/2023" lexicographically; chronological
        // order must win.
        assert_eq!(series.labels, vec!["15/01/2023", "01/02/2023"]);
        assert_eq!(series.values, vec![2, 1]);
    }

    #[test]
    fn undated_records_are_skipped_not_counted() {
        let records = vec![
            dated("15/01/2023", "Chaco", "Capital"),
            IncidentRecord::default(),
        ];
        let daily = build_chart_series(&records, ChartView::Daily);
        assert_eq!(daily.values, vec![1]);
        let monthly = build_chart_series(&records, ChartView::Monthly);
        assert_eq!(monthly.values, vec![1]);
    }

    #[test]
    fn province_view_keeps_first_encountered_order() {
        let records = vec![
            dated("15/01/2023", "Salta", "Capital"),
            dated("16/01/2023", "Buenos Aires", "La Plata"),
            dated("17/01/2023", "Salta", "Capital"),
        ];
        let series = build_chart_series(&records, ChartView::ByProvince);
        assert_eq!(series.labels, vec!["Salta", "Buenos Aires"]);
        assert_eq!(series.values, vec![2, 1]);
    }

    #[test]
    fn department_view_caps_at_first_ten_groups() {
        let mut records = Vec::new();
        for i in 0..12 {
            records.push(dated("15/01/2023", "Buenos Aires", &format!("Partido {i}")));
        }
        // A repeat of an early department keeps counting within the cap.
        records.push(dated("16/01/2023", "Buenos Aires", "Partido 0"));

        let series = build_chart_series(&records, ChartView::ByDepartment);
        assert_eq!(series.len(), 10);
        assert_eq!(series.labels[0], "Partido 0");
        assert_eq!(series.values[0], 2);
        assert!(!series.labels.contains(&"Partido 10".to_string()));
    }

    #[test]
    fn labels_and_values_stay_parallel() {
        let records = vec![
            dated("15/01/2023", "Salta", "Capital"),
            dated("-", "Jujuy", "Capital"),
        ];
        for view in [
            ChartView::Daily,
            ChartView::Monthly,
            ChartView::ByProvince,
            ChartView::ByDepartment,
        ] {
            let series = build_chart_series(&records, view);
            assert_eq!(series.labels.len(), series.values.len());
        }
    }
}
