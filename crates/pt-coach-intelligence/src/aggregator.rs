// ABOUTME: Folds per-movement analysis results and reported pain areas into the assessment
// ABOUTME: Union of weak muscles, max fall risk, last-write-wins metrics per movement
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

//! Assessment aggregation
//!
//! The aggregate only ever grows: weak-muscle labels are unioned in
//! first-seen order, fall risk only escalates, and pain areas are appended.
//! Folding the same result twice yields the same aggregate as folding it once.

use tracing::debug;

use crate::models::{AssessmentAggregate, FallRisk, MovementKind, MovementResult};

/// Result used in place of a failed analysis: contributes nothing
#[must_use]
pub fn zero_contribution() -> MovementResult {
    MovementResult {
        metrics: Default::default(),
        weak_muscles: Vec::new(),
        fall_risk: FallRisk::Low,
    }
}

/// Fold one movement's analysis into the aggregate
#[must_use]
pub fn fold_movement_result(
    aggregate: &AssessmentAggregate,
    result: &MovementResult,
    kind: MovementKind,
) -> AssessmentAggregate {
    let mut next = aggregate.clone();

    append_unique(&mut next.weak_muscles, result.weak_muscles.iter().map(String::as_str));
    next.fall_risk = next.fall_risk.max(result.fall_risk);
    next.metrics.insert(kind, result.metrics.clone());

    debug!(
        movement = %kind,
        fall_risk = %next.fall_risk,
        weak_muscles = next.weak_muscles.len(),
        "Folded movement result"
    );

    next
}

/// Label synthesized for a reported pain area
#[must_use]
pub fn pain_weakness_label(area: &str) -> String {
    format!("Pain in {} - target surrounding muscles", area.trim())
}

/// Add a synthesized weakness label for every reported pain area not yet represented
#[must_use]
pub fn derive_weakness_from_pain(
    aggregate: &AssessmentAggregate,
    pain_areas: &[String],
) -> AssessmentAggregate {
    let mut next = aggregate.clone();
    let labels: Vec<String> = pain_areas
        .iter()
        .filter(|area| !area.trim().is_empty())
        .map(|area| pain_weakness_label(area))
        .collect();
    append_unique(&mut next.weak_muscles, labels.iter().map(String::as_str));
    next
}

/// Append checklist pain areas to the aggregate and derive their weakness labels
#[must_use]
pub fn record_pain_areas(
    aggregate: &AssessmentAggregate,
    pain_areas: &[String],
) -> AssessmentAggregate {
    let mut next = aggregate.clone();
    append_unique(
        &mut next.pain_areas,
        pain_areas
            .iter()
            .map(|area| area.trim())
            .filter(|area| !area.is_empty()),
    );
    derive_weakness_from_pain(&next, pain_areas)
}

/// Push each label not already present, preserving order
fn append_unique<'a>(target: &mut Vec<String>, labels: impl Iterator<Item = &'a str>) {
    for label in labels {
        if !target.iter().any(|existing| existing == label) {
            target.push(label.to_owned());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn result(weak: &[&str], risk: FallRisk) -> MovementResult {
        MovementResult {
            metrics: BTreeMap::from([("count".to_owned(), 3.0)]),
            weak_muscles: weak.iter().map(|w| (*w).to_owned()).collect(),
            fall_risk: risk,
        }
    }

    #[test]
    fn test_fold_unions_in_first_seen_order() {
        let agg = AssessmentAggregate::default();
        let agg = fold_movement_result(&agg, &result(&["glutes", "quads"], FallRisk::Low), MovementKind::Walking);
        let agg = fold_movement_result(&agg, &result(&["core", "glutes"], FallRisk::Low), MovementKind::Squatting);
        assert_eq!(agg.weak_muscles, vec!["glutes", "quads", "core"]);
    }

    #[test]
    fn test_fold_is_idempotent() {
        let first = fold_movement_result(
            &AssessmentAggregate::default(),
            &result(&["hamstrings"], FallRisk::Medium),
            MovementKind::Balance,
        );
        let second = fold_movement_result(&first, &result(&["hamstrings"], FallRisk::Medium), MovementKind::Balance);
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_contribution_changes_nothing_but_metrics_slot() {
        let agg = fold_movement_result(
            &AssessmentAggregate::default(),
            &result(&["calves"], FallRisk::High),
            MovementKind::Walking,
        );
        let after = fold_movement_result(&agg, &zero_contribution(), MovementKind::Balance);
        assert_eq!(after.weak_muscles, agg.weak_muscles);
        assert_eq!(after.fall_risk, FallRisk::High);
    }

    #[test]
    fn test_record_pain_areas_dedupes_and_skips_blank() {
        let areas = vec!["Knee".to_owned(), "  ".to_owned(), "Knee".to_owned(), "Hip".to_owned()];
        let agg = record_pain_areas(&AssessmentAggregate::default(), &areas);
        assert_eq!(agg.pain_areas, vec!["Knee", "Hip"]);
        assert_eq!(
            agg.weak_muscles,
            vec![
                "Pain in Knee - target surrounding muscles",
                "Pain in Hip - target surrounding muscles"
            ]
        );
    }
}
