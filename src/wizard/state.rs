// ABOUTME: Wizard step enumeration and the strictly sequential transition order
// ABOUTME: Intake through SessionEnd, with the restart edge back to Intake
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Step of the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardState {
    /// Profile questions
    #[default]
    Intake,
    /// Optional movement videos
    MovementScreens,
    /// Red flags and pain areas
    SafetyCheck,
    /// Generated plan, rated exercise by exercise
    ExercisePlan,
    /// Post-session pain capture
    PostSession,
    /// Summary; the user may restart
    SessionEnd,
}

impl WizardState {
    /// Snake-case identifier used in logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Intake => "intake",
            Self::MovementScreens => "movement_screens",
            Self::SafetyCheck => "safety_check",
            Self::ExercisePlan => "exercise_plan",
            Self::PostSession => "post_session",
            Self::SessionEnd => "session_end",
        }
    }

    /// Heading shown to the user
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Intake => "Initial Assessment",
            Self::MovementScreens => "Movement Screens",
            Self::SafetyCheck => "Safety Checks",
            Self::ExercisePlan => "Exercise Session",
            Self::PostSession => "Post-Session Check-in",
            Self::SessionEnd => "Session Summary",
        }
    }

    /// The only state this one may advance to
    #[must_use]
    pub const fn next(&self) -> Self {
        match self {
            Self::Intake => Self::MovementScreens,
            Self::MovementScreens => Self::SafetyCheck,
            Self::SafetyCheck => Self::ExercisePlan,
            Self::ExercisePlan => Self::PostSession,
            Self::PostSession => Self::SessionEnd,
            Self::SessionEnd => Self::Intake,
        }
    }
}

impl Display for WizardState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_cycles_back_to_intake() {
        let mut state = WizardState::Intake;
        for _ in 0..6 {
            state = state.next();
        }
        assert_eq!(state, WizardState::Intake);
    }
}
