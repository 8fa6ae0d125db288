// ABOUTME: Prints the red-flag questions and pain areas used at the safety check
// ABOUTME: Lets users and clinicians review the checklist before starting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

use pt_coach::constants::checklists::{PAIN_AREAS, RED_FLAG_QUESTIONS};

pub fn show() {
    println!("Red-flag questions (any \"yes\" pauses the session):");
    for (index, question) in RED_FLAG_QUESTIONS.iter().enumerate() {
        println!("  {}. {question}", index + 1);
    }
    println!("\nPain areas:");
    for area in PAIN_AREAS {
        println!("  - {area}");
    }
}
