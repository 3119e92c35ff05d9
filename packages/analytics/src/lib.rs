#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derived views over the incident working set.
//!
//! All functions here are pure and infallible: they take a record slice and
//! return a freshly computed value. Stale views are recomputed from the new
//! working set after every load or upload, never patched incrementally.

pub mod categorize;
pub mod chart;
pub mod filter;
pub mod stats;

pub use categorize::categorize_records;
pub use chart::{ChartView, build_chart_series};
pub use filter::{FilterCriteria, apply_filter};
pub use stats::compute_statistics;
