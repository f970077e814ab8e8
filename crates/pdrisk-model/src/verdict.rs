//! Derived verdict types: the aggregate classification for one uploaded
//! batch and the capped, display-ready biomarker ranking.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Qualitative risk bucket derived from the average PD probability.
///
/// Thresholds are inclusive at the lower bound of each tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Average probability below 40.
    Low,
    /// Average probability in 40..60.
    Moderate,
    /// Average probability in 60..75.
    High,
    /// Average probability 75 or above.
    VeryHigh,
}

impl RiskLevel {
    /// Bucket an average probability (percent, 0..=100).
    #[must_use]
    pub fn from_probability(avg_probability: f64) -> Self {
        if avg_probability >= 75.0 {
            Self::VeryHigh
        } else if avg_probability >= 60.0 {
            Self::High
        } else if avg_probability >= 40.0 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Qualitative confidence bucket derived from how far the average
/// probability sits from the 0.5 decision boundary.
///
/// Boundary deltas (exactly 0.3 or 0.15) fall to the lower tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    /// Delta of 0.15 or less.
    Low,
    /// Delta above 0.15 up to and including 0.3.
    Medium,
    /// Delta above 0.3.
    High,
}

impl ConfidenceLevel {
    /// Bucket an average probability (percent, 0..=100) by its distance
    /// from the 50% decision boundary.
    ///
    /// The comparison happens on the percent scale so that whole-percent
    /// inputs land exactly on the 0.30/0.15 delta thresholds instead of a
    /// rounding hair above them.
    #[must_use]
    pub fn from_probability(avg_probability: f64) -> Self {
        let delta = (avg_probability - 50.0).abs();
        if delta > 30.0 {
            Self::High
        } else if delta > 15.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Display direction assigned to a ranked biomarker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Shown as elevated relative to baseline.
    Elevated,
    /// Shown as decreased relative to baseline.
    Decreased,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Elevated => write!(f, "elevated"),
            Self::Decreased => write!(f, "decreased"),
        }
    }
}

/// Overall verdict for one uploaded batch, computed once per successful
/// prediction call and replaced wholesale on the next upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedVerdict {
    /// Strict-majority classification; a tie is negative.
    pub is_positive: bool,
    /// Average probability in 0..=1, for percentage display.
    pub confidence: f64,
    /// Average probability in 0..=1, for the risk meter.
    pub risk_score: f64,
    /// Bucketed risk label.
    pub risk_level: RiskLevel,
    /// Bucketed confidence label.
    pub confidence_level: ConfidenceLevel,
    /// Average probability in percent, 0..=100.
    pub probability: f64,
    /// Total patients in the batch.
    pub total_patients: usize,
    /// PD-positive count.
    pub pd_positive: usize,
    /// PD-negative count.
    pub pd_negative: usize,
}

/// One display-ready entry of the capped biomarker ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedBiomarker {
    /// Synthetic identifier, `protein-<rank>` with a 1-based rank.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short symbol derived from the feature key.
    pub symbol: String,
    /// Importance score.
    pub importance: f64,
    /// Category label, defaulting to "Biomarker".
    pub category: String,
    /// One-line description for detail views.
    pub description: String,
    /// Display direction.
    pub direction: Direction,
    /// Raw value shown next to the name (mirrors the importance score).
    pub value: f64,
}
