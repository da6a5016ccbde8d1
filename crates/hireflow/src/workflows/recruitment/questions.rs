use serde::Serialize;

use super::domain::{JobLevel, QuestionCategory};

/// One row of the template table before it is persisted against a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionSeed {
    pub text: String,
    pub category: QuestionCategory,
}

fn seed(text: impl Into<String>, category: QuestionCategory) -> QuestionSeed {
    QuestionSeed {
        text: text.into(),
        category,
    }
}

/// Interview questions for a job level, with the title interpolated into the text.
///
/// Pure and deterministic for a fixed `(level, title)` pair. Total over arbitrary
/// level strings: anything the level parser rejects falls back to a single
/// generic prompt that still mentions both title and level.
pub fn question_plan(level: &str, title: &str) -> Vec<QuestionSeed> {
    match JobLevel::parse(level) {
        Some(JobLevel::Entry) => vec![
            seed(
                format!("What are your key strengths for an entry-level {title} position?"),
                QuestionCategory::Objective,
            ),
            seed(
                "Describe a challenging project you worked on during your studies.",
                QuestionCategory::Objective,
            ),
            seed(
                "Where do you see yourself in 3 years?",
                QuestionCategory::Objective,
            ),
        ],
        Some(JobLevel::Professional) => vec![
            seed(
                format!("Describe a significant achievement in your previous role as a {title}."),
                QuestionCategory::Objective,
            ),
            seed(
                "How do you handle conflicting priorities in a team project?",
                QuestionCategory::RolePlay,
            ),
            seed(
                format!("What are the latest trends in the {title} field?"),
                QuestionCategory::CaseStudy,
            ),
        ],
        Some(JobLevel::Expert) => vec![
            seed(
                format!("Detail your experience leading complex projects in the {title} domain."),
                QuestionCategory::CaseStudy,
            ),
            seed(
                "Imagine you disagree with a key strategic decision in your area of expertise. \
                 How would you address this with senior leadership?",
                QuestionCategory::RolePlay,
            ),
        ],
        Some(JobLevel::CSuite) => vec![
            seed(
                format!("Outline your vision for the {title} function in a rapidly evolving market."),
                QuestionCategory::CaseStudy,
            ),
            seed(
                "Describe how you would lead organizational change following a major acquisition.",
                QuestionCategory::RolePlay,
            ),
        ],
        None => vec![seed(
            format!(
                "Tell us about yourself and why you are interested in the {title} role at the {level} level."
            ),
            QuestionCategory::Objective,
        )],
    }
}
