#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Groups nearby incident coordinates into map clusters at a zoom level.
//!
//! Greedy single-pass clustering in degree space: the clustering radius
//! shrinks as zoom increases, so a coarse world view aggregates sparse
//! points into few markers while a street-level view splits them apart.
//! Clusters have no persistent identity; they are recomputed whenever the
//! working set or zoom level changes.

use ops_map_incident_models::IncidentRecord;

/// Floor for the clustering radius in degrees, reached at high zoom.
const MIN_RADIUS_DEG: f64 = 0.1;

/// Radius numerator; at `BASE_ZOOM` the radius is exactly this many degrees.
const RADIUS_SCALE_DEG: f64 = 2.0;

/// Zoom level at which the radius equals [`RADIUS_SCALE_DEG`].
const BASE_ZOOM: i32 = 3;

/// Number of member descriptions exposed in an aggregate marker preview.
const PREVIEW_LEN: usize = 5;

/// A group of nearby records rendered as one map marker.
///
/// The anchor coordinate is the first member's position, not a running
/// centroid; for asymmetric point distributions the marker can sit off the
/// visual center of its members. A known, accepted approximation.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoCluster {
    /// Anchor latitude (the first member's latitude).
    pub center_lat: f64,
    /// Anchor longitude (the first member's longitude).
    pub center_lng: f64,
    /// Member records, first member being the anchor.
    pub members: Vec<IncidentRecord>,
}

impl GeoCluster {
    /// Number of member records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` when the cluster has no members. Never the case for
    /// clusters produced by [`cluster_records`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns `true` when this cluster renders as a plain single marker
    /// rather than an aggregate marker.
    #[must_use]
    pub fn is_single_marker(&self) -> bool {
        self.members.len() == 1
    }

    /// A bounded preview of member descriptions for the aggregate popup.
    #[must_use]
    pub fn description_preview(&self) -> Vec<&str> {
        self.members
            .iter()
            .take(PREVIEW_LEN)
            .map(|member| member.description.as_str())
            .collect()
    }
}

/// Clustering radius in degrees for a zoom level.
///
/// `max(0.1, 2 / 2^(zoom - 3))`: zoom 3 → 2°, zoom 10 → ~0.1° (floored),
/// zoom 18 → 0.1°.
#[must_use]
pub fn cluster_radius(zoom: u8) -> f64 {
    let radius = RADIUS_SCALE_DEG / 2f64.powi(i32::from(zoom) - BASE_ZOOM);
    radius.max(MIN_RADIUS_DEG)
}

/// Clusters the mappable records at the given zoom level.
///
/// Every record with valid coordinates lands in exactly one cluster;
/// records without coordinates are skipped and appear in no cluster.
/// Greedy O(n²): each unprocessed point anchors a new cluster and absorbs
/// every other unprocessed point within the radius (Euclidean distance in
/// degree space). Acceptable for hundreds to low thousands of records; a
/// grid or quad-tree index could replace the scan under the same contract.
#[must_use]
pub fn cluster_records(records: &[IncidentRecord], zoom: u8) -> Vec<GeoCluster> {
    let radius = cluster_radius(zoom);
    let mut processed = vec![false; records.len()];
    let mut clusters = Vec::new();

    for i in 0..records.len() {
        if processed[i] {
            continue;
        }
        processed[i] = true;

        let Some((lat, lng)) = records[i].coordinates() else {
            continue;
        };

        let mut members = vec![records[i].clone()];
        for j in (i + 1)..records.len() {
            if processed[j] {
                continue;
            }
            let Some((other_lat, other_lng)) = records[j].coordinates() else {
                processed[j] = true;
                continue;
            };

            let distance = (other_lat - lat).hypot(other_lng - lng);
            if distance < radius {
                members.push(records[j].clone());
                processed[j] = true;
            }
        }

        clusters.push(GeoCluster {
            center_lat: lat,
            center_lng: lng,
            members,
        });
    }

    log::debug!(
        "Clustered {} records into {} markers at zoom {zoom}",
        records.len(),
        clusters.len()
    );
    clusters
}
