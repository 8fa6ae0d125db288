// ABOUTME: Movement screening types: movement kinds, fall risk, and analysis results
// ABOUTME: Defines the analysis response contract and the running assessment aggregate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Movements that can be screened from video
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    /// Walking gait
    Walking,
    /// Squat or sit-to-stand
    Squatting,
    /// Static balance test
    Balance,
}

impl MovementKind {
    /// All screenable movements in presentation order
    pub const ALL: [Self; 3] = [Self::Walking, Self::Squatting, Self::Balance];

    /// Lowercase identifier used in prompts and metrics keys
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Walking => "walking",
            Self::Squatting => "squatting",
            Self::Balance => "balance",
        }
    }

    /// Safer variant of the movement used when seated exercises are recommended
    #[must_use]
    pub const fn seated_variant(&self) -> &'static str {
        match self {
            Self::Walking => "short indoor walk with support nearby",
            Self::Squatting => "chair sit-to-stand",
            Self::Balance => "supported standing balance (hand on counter)",
        }
    }
}

impl Display for MovementKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "walking" | "walk" | "gait" => Ok(Self::Walking),
            "squatting" | "squat" | "sit-to-stand" => Ok(Self::Squatting),
            "balance" => Ok(Self::Balance),
            other => Err(AppError::invalid_input(format!(
                "Unknown movement '{other}' (expected walking, squatting, or balance)"
            ))),
        }
    }
}

/// Ordinal fall-risk severity; ordering is `Low < Medium < High`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FallRisk {
    /// Ordinal 1
    #[default]
    #[serde(alias = "Low", alias = "LOW")]
    Low,
    /// Ordinal 2
    #[serde(alias = "Medium", alias = "MEDIUM")]
    Medium,
    /// Ordinal 3
    #[serde(alias = "High", alias = "HIGH")]
    High,
}

impl FallRisk {
    /// Ordinal value: low=1, medium=2, high=3
    #[must_use]
    pub const fn ordinal(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    /// Lowercase label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl Display for FallRisk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Analysis of one movement video, exactly as returned by the analysis service
///
/// Deserialization enforces the response contract: exactly the keys
/// `metrics`, `weak_muscles`, and `fall_risk`, with numeric metric values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MovementResult {
    /// Open-schema quantitative metrics (counts, angles, times, scores)
    pub metrics: BTreeMap<String, f64>,
    /// Muscle groups suspected of underperforming
    pub weak_muscles: Vec<String>,
    /// Fall-risk estimate for this movement
    pub fall_risk: FallRisk,
}

/// Running fold over every movement analysed in the current session
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssessmentAggregate {
    /// Weak-muscle labels, deduplicated, first-seen order
    pub weak_muscles: Vec<String>,
    /// Highest fall risk seen so far
    pub fall_risk: FallRisk,
    /// Latest metrics per movement kind
    pub metrics: BTreeMap<MovementKind, BTreeMap<String, f64>>,
    /// Pain areas reported through the checklist
    pub pain_areas: Vec<String>,
}

impl AssessmentAggregate {
    /// Whether any finding has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weak_muscles.is_empty()
            && self.fall_risk == FallRisk::Low
            && self.metrics.is_empty()
            && self.pain_areas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fall_risk_ordering_matches_ordinals() {
        assert!(FallRisk::Low < FallRisk::Medium);
        assert!(FallRisk::Medium < FallRisk::High);
        assert_eq!(FallRisk::High.ordinal(), 3);
        assert_eq!(FallRisk::default(), FallRisk::Low);
    }

    #[test]
    fn test_movement_result_contract() {
        let ok = r#"{"metrics": {"squat_count": 5, "knee_asymmetry_deg": 7.5},
                     "weak_muscles": ["gluteus medius"], "fall_risk": "medium"}"#;
        let parsed: MovementResult = serde_json::from_str(ok).unwrap();
        assert_eq!(parsed.fall_risk, FallRisk::Medium);
        assert_eq!(parsed.metrics.get("squat_count"), Some(&5.0));

        let extra_key = r#"{"metrics": {}, "weak_muscles": [], "fall_risk": "low", "notes": "x"}"#;
        assert!(serde_json::from_str::<MovementResult>(extra_key).is_err());

        let missing_key = r#"{"metrics": {}, "weak_muscles": []}"#;
        assert!(serde_json::from_str::<MovementResult>(missing_key).is_err());

        let bad_risk = r#"{"metrics": {}, "weak_muscles": [], "fall_risk": "extreme"}"#;
        assert!(serde_json::from_str::<MovementResult>(bad_risk).is_err());

        let text_metric = r#"{"metrics": {"depth": "deep"}, "weak_muscles": [], "fall_risk": "low"}"#;
        assert!(serde_json::from_str::<MovementResult>(text_metric).is_err());
    }

    #[test]
    fn test_movement_kind_parsing() {
        assert_eq!("squat".parse::<MovementKind>().unwrap(), MovementKind::Squatting);
        assert_eq!("Walking".parse::<MovementKind>().unwrap(), MovementKind::Walking);
        assert!("jumping".parse::<MovementKind>().is_err());
    }
}
