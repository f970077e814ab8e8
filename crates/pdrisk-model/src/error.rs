//! Error types for the prediction data model.

use thiserror::Error;

/// Errors raised while interpreting a prediction response.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// The summary counts do not agree with each other or with the
    /// per-patient list. Treated as a malformed response, never averaged
    /// over silently.
    #[error(
        "inconsistent prediction summary: total_patients={total_patients}, \
         pd_positive={pd_positive}, pd_negative={pd_negative}, patients={patient_rows}"
    )]
    InconsistentSummary {
        /// Total patient count reported by the server.
        total_patients: usize,
        /// Positive count reported by the server.
        pd_positive: usize,
        /// Negative count reported by the server.
        pd_negative: usize,
        /// Number of per-patient rows actually present.
        patient_rows: usize,
    },
}

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
