//! Result aggregation for the PD Risk Console prediction client.
//!
//! Turns one raw [`PredictionResponse`] into an [`AggregatedVerdict`] and a
//! capped, display-ready biomarker ranking. Pure arithmetic over an
//! already-computed result set; the only failure path is an inconsistent
//! response summary.

mod aggregate;

pub use aggregate::{MAX_RANKED_BIOMARKERS, aggregate, rank_biomarkers};
