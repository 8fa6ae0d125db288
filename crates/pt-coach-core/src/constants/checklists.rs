// ABOUTME: Safety-step checklists: red-flag screening questions and pain areas
// ABOUTME: Red flags gate progression, pain areas feed weakness derivation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

/// Red-flag screening questions. Any "yes" answer becomes a pain flag.
pub const RED_FLAG_QUESTIONS: &[&str] = &[
    "Chest pain, pressure, or shortness of breath at rest",
    "Dizziness or fainting in the last week",
    "Numbness or tingling in the groin or inner thighs",
    "New loss of bladder or bowel control",
    "Fever, chills, or unexplained weight loss with your pain",
    "Severe pain at night that does not ease with rest or position change",
    "A fall or injury in the last two weeks",
    "Calf swelling, warmth, or redness",
];

/// Body areas offered in the pain-area checklist
pub const PAIN_AREAS: &[&str] = &[
    "Neck",
    "Shoulder",
    "Upper back",
    "Lower back",
    "Hip",
    "Knee",
    "Ankle",
    "Foot",
    "Wrist",
];

/// Look up a red-flag question by zero-based index
#[must_use]
pub fn red_flag(index: usize) -> Option<&'static str> {
    RED_FLAG_QUESTIONS.get(index).copied()
}

/// Look up a pain area by zero-based index
#[must_use]
pub fn pain_area(index: usize) -> Option<&'static str> {
    PAIN_AREAS.get(index).copied()
}
