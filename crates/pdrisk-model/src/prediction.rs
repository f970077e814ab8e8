//! Wire types for the prediction backend's response.
//!
//! Field names follow the backend's JSON exactly; a handful of aliases
//! absorb the shape drift between backend versions (`feature` vs `name`,
//! `importance` vs `importance_normalized`).

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Aggregate counts reported alongside the per-patient predictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionSummary {
    /// Number of patients in the uploaded file.
    pub total_patients: usize,
    /// Patients the model classified as PD positive.
    pub pd_positive: usize,
    /// Patients the model classified as PD negative.
    pub pd_negative: usize,
}

/// One patient's prediction row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientPrediction {
    /// Optional row identifier assigned by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    /// Optional binary class label (0/1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<u8>,
    /// PD probability in percent, 0..=100.
    pub probability: f64,
}

/// One entry of the server-ranked feature importance list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomarkerImportance {
    /// Model feature key, e.g. `seq_12345`.
    #[serde(alias = "name")]
    pub feature: String,
    /// Human-readable protein name, when the backend knows one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_name: Option<String>,
    /// Raw importance score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<f64>,
    /// Normalized importance score (older backend versions).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance_normalized: Option<f64>,
    /// Protein category label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl BiomarkerImportance {
    /// Preferred display name: protein name when present, feature key otherwise.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.protein_name.as_deref().unwrap_or(&self.feature)
    }

    /// Importance with the raw score preferred over the normalized one,
    /// falling back to 0 when neither is present.
    #[must_use]
    pub fn effective_importance(&self) -> f64 {
        self.importance
            .or(self.importance_normalized)
            .unwrap_or(0.0)
    }
}

/// Full response of the `predict-csv` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Backend-side success flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    /// Aggregate counts.
    pub summary: PredictionSummary,
    /// Per-patient predictions, in file order.
    #[serde(default)]
    pub patients: Vec<PatientPrediction>,
    /// Server-ranked feature importance list, most important first.
    #[serde(default)]
    pub top_biomarkers: Vec<BiomarkerImportance>,
}

impl PredictionResponse {
    /// Verify that the summary counts agree with each other and with the
    /// per-patient list.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InconsistentSummary`] when
    /// `pd_positive + pd_negative != total_patients` or the patient list
    /// length differs from `total_patients`.
    pub fn check_consistency(&self) -> Result<()> {
        let summary = &self.summary;
        let consistent = summary.pd_positive + summary.pd_negative == summary.total_patients
            && self.patients.len() == summary.total_patients;
        if consistent {
            Ok(())
        } else {
            Err(ModelError::InconsistentSummary {
                total_patients: summary.total_patients,
                pd_positive: summary.pd_positive,
                pd_negative: summary.pd_negative,
                patient_rows: self.patients.len(),
            })
        }
    }
}
