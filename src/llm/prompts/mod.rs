// ABOUTME: Prompt templates for movement analysis and exercise suggestions
// ABOUTME: Templates are Markdown files included at compile time and filled by placeholder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

//! # Prompts
//!
//! Templates use `{{name}}` placeholders. Unknown placeholders are left as is.

/// System prompt shared by every coaching request
pub const COACH_SYSTEM_PROMPT: &str = "You are a cautious physical therapy assistant. \
Never diagnose. Prefer safe, low-impact options when in doubt.";

/// Movement analysis template (`movement`, `variant`)
pub const MOVEMENT_ANALYSIS_PROMPT: &str = include_str!("movement_analysis.md");

/// Exercise suggestion template
pub const EXERCISE_PLAN_PROMPT: &str = include_str!("exercise_plan.md");

/// Fill `{{key}}` placeholders in `template`
#[must_use]
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    values.iter().fold(template.to_owned(), |acc, (key, value)| {
        acc.replace(&format!("{{{{{key}}}}}"), value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_fills_known_placeholders() {
        let text = render("{{a}} and {{b}} and {{c}}", &[("a", "1"), ("b", "2")]);
        assert_eq!(text, "1 and 2 and {{c}}");
    }

    #[test]
    fn test_movement_template_names_all_keys() {
        for key in ["metrics", "weak_muscles", "fall_risk"] {
            assert!(MOVEMENT_ANALYSIS_PROMPT.contains(key));
        }
    }
}
