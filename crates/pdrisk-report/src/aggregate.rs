//! Verdict derivation from a raw prediction response.

use tracing::debug;

use pdrisk_model::{
    AggregatedVerdict, BiomarkerImportance, ConfidenceLevel, Direction, PredictionResponse,
    RankedBiomarker, Result, RiskLevel,
};

/// Cap on the number of biomarkers surfaced for display.
pub const MAX_RANKED_BIOMARKERS: usize = 10;

/// Prefix on raw feature keys that is stripped when deriving a symbol.
const FEATURE_KEY_PREFIX: &str = "seq_";

/// Maximum symbol length after prefix stripping.
const SYMBOL_LEN: usize = 8;

/// Derive the overall verdict for one uploaded batch.
///
/// The summary counts are checked against each other and against the
/// per-patient list first; an inconsistent response is rejected rather
/// than averaged over.
///
/// # Errors
///
/// Returns [`pdrisk_model::ModelError::InconsistentSummary`] when the
/// response violates `pd_positive + pd_negative == total_patients ==
/// patients.len()`.
pub fn aggregate(response: &PredictionResponse) -> Result<AggregatedVerdict> {
    response.check_consistency()?;

    let summary = &response.summary;

    // Empty batch: no division, everything bottoms out at the lowest tier.
    let avg_probability = if summary.total_patients == 0 {
        0.0
    } else {
        let sum: f64 = response.patients.iter().map(|p| p.probability).sum();
        sum / summary.total_patients as f64
    };
    let avg_probability_decimal = avg_probability / 100.0;

    // Strict majority; a tie is negative.
    let is_positive = summary.pd_positive > summary.pd_negative;

    let confidence_level = ConfidenceLevel::from_probability(avg_probability);
    let risk_level = RiskLevel::from_probability(avg_probability);

    debug!(
        total_patients = summary.total_patients,
        avg_probability,
        %risk_level,
        %confidence_level,
        "aggregated prediction batch"
    );

    Ok(AggregatedVerdict {
        is_positive,
        confidence: avg_probability_decimal,
        risk_score: avg_probability_decimal,
        risk_level,
        confidence_level,
        probability: avg_probability,
        total_patients: summary.total_patients,
        pd_positive: summary.pd_positive,
        pd_negative: summary.pd_negative,
    })
}

/// Map the server-ranked importance list to display entries.
///
/// Takes the first [`MAX_RANKED_BIOMARKERS`] entries in server order (no
/// re-sorting) and assigns each a synthetic 1-based id. The `direction`
/// assignment is round-robin by index for display parity with the
/// original client; it carries no biological signal.
#[must_use]
pub fn rank_biomarkers(top_biomarkers: &[BiomarkerImportance]) -> Vec<RankedBiomarker> {
    top_biomarkers
        .iter()
        .take(MAX_RANKED_BIOMARKERS)
        .enumerate()
        .map(|(idx, bio)| {
            let importance = bio.effective_importance();
            RankedBiomarker {
                id: format!("protein-{}", idx + 1),
                name: bio.display_name().to_string(),
                symbol: derive_symbol(&bio.feature),
                importance,
                category: bio
                    .category
                    .clone()
                    .unwrap_or_else(|| "Biomarker".to_string()),
                description: format!("{} - Importance: {:.4}", bio.display_name(), importance),
                direction: if idx % 3 == 0 {
                    Direction::Elevated
                } else {
                    Direction::Decreased
                },
                value: importance,
            }
        })
        .collect()
}

/// Derive a short display symbol from a raw feature key: strip the
/// `seq_` prefix, upper-case, truncate to eight characters.
fn derive_symbol(feature: &str) -> String {
    let stripped = feature.strip_prefix(FEATURE_KEY_PREFIX).unwrap_or(feature);
    stripped.to_uppercase().chars().take(SYMBOL_LEN).collect()
}
