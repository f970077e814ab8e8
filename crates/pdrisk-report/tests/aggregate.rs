//! Integration tests for verdict aggregation and biomarker ranking.

use proptest::prelude::*;

use pdrisk_model::{
    BiomarkerImportance, ConfidenceLevel, ModelError, PatientPrediction, PredictionResponse,
    PredictionSummary, RiskLevel,
};
use pdrisk_report::{MAX_RANKED_BIOMARKERS, aggregate, rank_biomarkers};

fn response(probabilities: Vec<f64>, pd_positive: usize) -> PredictionResponse {
    let total = probabilities.len();
    PredictionResponse {
        success: Some(true),
        summary: PredictionSummary {
            total_patients: total,
            pd_positive,
            pd_negative: total - pd_positive,
        },
        patients: probabilities
            .into_iter()
            .map(|probability| PatientPrediction {
                patient_id: None,
                prediction: None,
                probability,
            })
            .collect(),
        top_biomarkers: vec![],
    }
}

fn biomarker(feature: &str, importance: f64) -> BiomarkerImportance {
    BiomarkerImportance {
        feature: feature.to_string(),
        protein_name: None,
        importance: Some(importance),
        importance_normalized: None,
        category: None,
    }
}

#[test]
fn test_uniform_probability_hits_each_risk_tier() {
    for (probability, expected) in [
        (75.0, RiskLevel::VeryHigh),
        (74.999, RiskLevel::High),
        (60.0, RiskLevel::High),
        (40.0, RiskLevel::Moderate),
        (39.999, RiskLevel::Low),
    ] {
        let verdict = aggregate(&response(vec![probability], 1)).unwrap();
        assert_eq!(verdict.risk_level, expected, "probability {probability}");
    }
}

#[test]
fn test_confidence_boundaries() {
    // delta 0.3 exactly (probability 80) stays Medium, delta 0.31 is High.
    let verdict = aggregate(&response(vec![80.0], 1)).unwrap();
    assert_eq!(verdict.confidence_level, ConfidenceLevel::Medium);

    let verdict = aggregate(&response(vec![81.0], 1)).unwrap();
    assert_eq!(verdict.confidence_level, ConfidenceLevel::High);

    // delta 0.15 exactly (probability 65) stays Low.
    let verdict = aggregate(&response(vec![65.0], 1)).unwrap();
    assert_eq!(verdict.confidence_level, ConfidenceLevel::Low);
}

#[test]
fn test_two_patient_positive_scenario() {
    let verdict = aggregate(&response(vec![80.0, 90.0], 2)).unwrap();
    assert_eq!(verdict.probability, 85.0);
    assert_eq!(verdict.confidence, 0.85);
    assert_eq!(verdict.risk_score, 0.85);
    assert!(verdict.is_positive);
    assert_eq!(verdict.risk_level, RiskLevel::VeryHigh);
    assert_eq!(verdict.confidence_level, ConfidenceLevel::High);
    assert_eq!(verdict.total_patients, 2);
}

#[test]
fn test_empty_batch_is_low_across_the_board() {
    let verdict = aggregate(&response(vec![], 0)).unwrap();
    assert_eq!(verdict.probability, 0.0);
    assert_eq!(verdict.risk_level, RiskLevel::Low);
    assert_eq!(verdict.confidence_level, ConfidenceLevel::Low);
    assert!(!verdict.is_positive);
}

#[test]
fn test_inconsistent_summary_is_rejected() {
    let mut bad = response(vec![50.0, 50.0], 1);
    bad.summary.pd_positive = 2; // 2 + 1 != 2
    assert!(matches!(
        aggregate(&bad),
        Err(ModelError::InconsistentSummary { .. })
    ));
}

#[test]
fn test_ranking_caps_at_ten_and_preserves_order() {
    let input: Vec<_> = (0..15)
        .map(|i| biomarker(&format!("seq_{i}"), 1.0 - i as f64 * 0.05))
        .collect();
    let ranked = rank_biomarkers(&input);

    assert_eq!(ranked.len(), MAX_RANKED_BIOMARKERS);
    for (idx, entry) in ranked.iter().enumerate() {
        assert_eq!(entry.id, format!("protein-{}", idx + 1));
        assert_eq!(entry.name, format!("seq_{idx}"));
        assert_eq!(entry.symbol, format!("{idx}"));
    }
}

#[test]
fn test_ranking_direction_round_robin() {
    let input: Vec<_> = (0..6).map(|i| biomarker(&format!("seq_{i}"), 0.5)).collect();
    let ranked = rank_biomarkers(&input);
    let elevated: Vec<_> = ranked
        .iter()
        .enumerate()
        .filter(|(_, b)| b.direction == pdrisk_model::Direction::Elevated)
        .map(|(idx, _)| idx)
        .collect();
    assert_eq!(elevated, vec![0, 3]);
}

#[test]
fn test_ranking_uses_protein_name_and_category_defaults() {
    let mut bio = biomarker("seq_7905_3", 0.1421);
    bio.protein_name = Some("DDC".to_string());
    let ranked = rank_biomarkers(&[bio]);

    assert_eq!(ranked[0].name, "DDC");
    assert_eq!(ranked[0].symbol, "7905_3");
    assert_eq!(ranked[0].category, "Biomarker");
    assert_eq!(ranked[0].description, "DDC - Importance: 0.1421");
}

proptest! {
    #[test]
    fn prop_tie_is_never_positive(probabilities in prop::collection::vec(0.0f64..=100.0, 0..40)) {
        let even: Vec<f64> = probabilities.iter().copied().take(probabilities.len() / 2 * 2).collect();
        let verdict = aggregate(&response(even.clone(), even.len() / 2)).unwrap();
        prop_assert!(!verdict.is_positive);
    }

    #[test]
    fn prop_risk_level_matches_thresholds(probabilities in prop::collection::vec(0.0f64..=100.0, 1..40)) {
        let n = probabilities.len();
        let verdict = aggregate(&response(probabilities, n)).unwrap();
        let expected = if verdict.probability >= 75.0 {
            RiskLevel::VeryHigh
        } else if verdict.probability >= 60.0 {
            RiskLevel::High
        } else if verdict.probability >= 40.0 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        };
        prop_assert_eq!(verdict.risk_level, expected);
    }

    #[test]
    fn prop_ranking_len_is_capped(count in 0usize..30) {
        let input: Vec<_> = (0..count).map(|i| biomarker(&format!("seq_{i}"), 0.1)).collect();
        let ranked = rank_biomarkers(&input);
        prop_assert_eq!(ranked.len(), count.min(MAX_RANKED_BIOMARKERS));
    }
}
