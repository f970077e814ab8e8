//! Data model for the PD Risk Console prediction client.
//!
//! Wire types mirroring the prediction backend's JSON, plus the derived
//! verdict types computed from a prediction response.

pub mod error;
pub mod prediction;
pub mod verdict;

pub use error::{ModelError, Result};
pub use prediction::{
    BiomarkerImportance, PatientPrediction, PredictionResponse, PredictionSummary,
};
pub use verdict::{AggregatedVerdict, ConfidenceLevel, Direction, RankedBiomarker, RiskLevel};
