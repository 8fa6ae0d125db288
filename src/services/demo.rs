// ABOUTME: Deterministic offline coaching service for demos and runs without network access
// ABOUTME: Returns fixed per-movement findings and a templated plan shaped by the assessment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::{CoachingService, PlanRequest, VideoClip};
use crate::constants::plan::MAX_EXERCISES;
use crate::errors::{AnalysisError, AppResult};
use crate::models::{ExercisePlan, FallRisk, MovementKind, MovementResult};

/// Offline stand-in for the AI service
///
/// Findings depend only on the movement kind, so repeated runs produce the
/// same session.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoCoachingService;

/// Generic targets used to fill the plan up to five entries
const FILLER_TARGETS: &[&str] = &["", "core", "calves", "glutes", "quadriceps", "hamstrings"];

impl DemoCoachingService {
    fn findings(kind: MovementKind) -> (Vec<(&'static str, f64)>, &'static [&'static str], FallRisk) {
        match kind {
            MovementKind::Walking => (
                vec![("step_count", 18.0), ("hip_asymmetry_deg", 4.0), ("cadence_spm", 96.0)],
                &["hip abductors", "calves"],
                FallRisk::Low,
            ),
            MovementKind::Squatting => (
                vec![("squat_count", 5.0), ("squat_depth_deg", 80.0), ("knee_asymmetry_deg", 6.0)],
                &["gluteus maximus", "quadriceps"],
                FallRisk::Medium,
            ),
            MovementKind::Balance => (
                vec![("balance_time_s", 9.0), ("wobble_score", 4.5)],
                &["ankle stabilizers", "core"],
                FallRisk::Medium,
            ),
        }
    }

    fn exercise_for(weakness: &str, seated: bool) -> String {
        let target = weakness.to_lowercase();
        let exercise = if target.contains("glute") || target.contains("hip") {
            if seated { "Seated hip abduction with band" } else { "Glute bridges" }
        } else if target.contains("quad") || target.contains("knee") {
            if seated { "Seated knee extensions" } else { "Chair sit-to-stand" }
        } else if target.contains("calf") || target.contains("calves") || target.contains("ankle") {
            if seated { "Seated heel and toe raises" } else { "Standing heel raises at the counter" }
        } else if target.contains("core") || target.contains("back") {
            if seated { "Seated marching with tall posture" } else { "Dead bugs" }
        } else if target.contains("hamstring") {
            if seated { "Seated hamstring stretch" } else { "Standing hamstring curls" }
        } else if seated {
            "Seated shoulder rolls and neck turns"
        } else {
            "Gentle full-body stretch"
        };
        format!("{exercise}: 2 sets of 10, easier with smaller range, harder with a slow lowering phase")
    }
}

#[async_trait]
impl CoachingService for DemoCoachingService {
    fn name(&self) -> &'static str {
        "demo"
    }

    async fn analyze_movement(
        &self,
        _video: &VideoClip,
        kind: MovementKind,
        variant: Option<&str>,
    ) -> Result<MovementResult, AnalysisError> {
        let (metrics, weak, fall_risk) = Self::findings(kind);
        let mut metrics: BTreeMap<String, f64> =
            metrics.into_iter().map(|(k, v)| (k.to_owned(), v)).collect();
        if variant.is_some() {
            metrics.insert("supported_variant".to_owned(), 1.0);
        }
        Ok(MovementResult {
            metrics,
            weak_muscles: weak.iter().map(|w| (*w).to_owned()).collect(),
            fall_risk,
        })
    }

    async fn suggest_plan(&self, request: &PlanRequest) -> AppResult<ExercisePlan> {
        let seated = request.profile.seated_recommended;
        let regressed = request
            .adjustment
            .as_ref()
            .map_or(&[][..], |adjustment| adjustment.regress.as_slice());
        let mut exercises: Vec<String> = Vec::with_capacity(MAX_EXERCISES);

        let targets = request
            .aggregate
            .weak_muscles
            .iter()
            .map(String::as_str)
            .chain(FILLER_TARGETS.iter().copied());
        for target in targets {
            if exercises.len() >= MAX_EXERCISES {
                break;
            }
            let exercise = Self::exercise_for(target, seated);
            if !exercises.contains(&exercise) && !regressed.contains(&exercise) {
                exercises.push(exercise);
            }
        }

        Ok(ExercisePlan::from_exercises(exercises))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssessmentAggregate, ComplaintType, Gender, PainLevel, UserProfile};

    fn profile(seated: bool) -> UserProfile {
        UserProfile {
            first_name: None,
            gender: Gender::PreferNotToSay,
            age: 40,
            baseline_pain: PainLevel::new(2).unwrap(),
            chief_complaint_type: ComplaintType::Pain,
            complaint: "knee".to_owned(),
            seated_recommended: seated,
            override_seated: false,
        }
    }

    #[tokio::test]
    async fn test_demo_plan_has_five_distinct_entries() {
        let aggregate = AssessmentAggregate {
            weak_muscles: vec!["quadriceps".to_owned(), "core".to_owned()],
            ..AssessmentAggregate::default()
        };
        let plan = DemoCoachingService
            .suggest_plan(&PlanRequest::new(profile(true), aggregate))
            .await
            .unwrap();
        assert_eq!(plan.len(), 5);
        assert!(plan.get(0).unwrap().starts_with("Seated knee extensions"));
    }

    #[tokio::test]
    async fn test_demo_analysis_is_deterministic() {
        let clip = VideoClip::new("a.mp4", "video/mp4", vec![1]).unwrap();
        let first = DemoCoachingService.analyze_movement(&clip, MovementKind::Squatting, None).await.unwrap();
        let second = DemoCoachingService.analyze_movement(&clip, MovementKind::Squatting, None).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.fall_risk, FallRisk::Medium);
    }
}
