//! Aggregate counts over the working set.

use ops_map_incident_models::{IncidentRecord, Statistics};

/// Computes total and group-by tallies in a single pass.
///
/// Missing grouping keys were already defaulted to `"unspecified"` at
/// normalization, so every record lands in a bucket and the bucket sums
/// equal `total` for both maps. Empty input yields the empty statistics.
#[must_use]
pub fn compute_statistics(records: &[IncidentRecord]) -> Statistics {
    let mut stats = Statistics::default();

    for record in records {
        stats.total += 1;
        *stats
            .by_intervention_type
            .entry(record.intervention_type.clone())
            .or_insert(0) += 1;
        *stats.by_province.entry(record.province.clone()).or_insert(0) += 1;
    }

    stats
}
