//! Assigns every record to exactly one of the seven categories.
//!
//! Keyword-first with a deterministic hash fallback: categories are tested
//! in the fixed priority order of [`Category::all`] against the lowercased
//! description and intervention type; the first keyword hit wins. Records
//! matching no keyword set follow the fallback rule — generic "police
//! order" interventions are spread across categories by a stable string
//! hash, everything else defaults to [`Category::Procedures`].
//!
//! Categorization is cheap, side-effect-free, and recomputed from record
//! content on every run; assignments are never stored on the record.

use std::collections::BTreeMap;

use ops_map_incident_models::{Category, IncidentRecord};

/// Intervention-type marker that routes a keyword miss into the hash rule.
const POLICE_ORDER_MARKER: &str = "orden policial";

/// Partitions records into the seven category buckets.
///
/// Every category key is always present, so an empty category renders as an
/// empty chart rather than a missing entry. The seven lists are pairwise
/// disjoint and together contain every input record exactly once.
#[must_use]
pub fn categorize_records(records: &[IncidentRecord]) -> BTreeMap<Category, Vec<IncidentRecord>> {
    let mut buckets: BTreeMap<Category, Vec<IncidentRecord>> = Category::all()
        .iter()
        .map(|category| (*category, Vec::new()))
        .collect();

    for record in records {
        let category = classify(record);
        if let Some(bucket) = buckets.get_mut(&category) {
            bucket.push(record.clone());
        }
    }

    log::debug!(
        "Categorized {} records into {} buckets",
        records.len(),
        buckets.len()
    );
    buckets
}

/// Classifies a single record. Deterministic and total: the same record
/// always yields the same category, and no record is left unassigned.
#[must_use]
pub fn classify(record: &IncidentRecord) -> Category {
    let description = record.description.to_lowercase();
    let intervention = record.intervention_type.to_lowercase();

    for category in Category::all() {
        let hit = category
            .keywords()
            .iter()
            .any(|keyword| description.contains(keyword) || intervention.contains(keyword));
        if hit {
            return *category;
        }
    }

    if intervention.contains(POLICE_ORDER_MARKER) {
        let key = format!("{}{description}{intervention}", record.operation_id);
        Category::from_fallback_bucket(simple_hash(&key) % 100)
    } else {
        Category::Procedures
    }
}

/// Polynomial rolling hash over UTF-16 code units, reduced to a 32-bit
/// signed integer with wrapping arithmetic, absolute value taken.
///
/// The exact recurrence is `h = (h << 5) - h + unit`, i.e. `h * 31 + unit`
/// in wrapping i32 space. Chosen for stability, not dispersion quality:
/// test fixtures predict fallback assignments by computing the same hash.
#[must_use]
pub fn simple_hash(s: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in s.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit));
    }
    hash.unsigned_abs()
}
