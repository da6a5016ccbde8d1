use rand::Rng;
use serde::Serialize;

use super::domain::{AnswerRecord, QuestionRecord};

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;

/// Score and feedback produced for one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradedAnswer {
    pub score: u8,
    pub feedback: String,
}

/// Seam for the scoring function. The lifecycle code only sees this trait, so
/// the placeholder below can be swapped for a real assessor without touching
/// the submission or grading flow.
pub trait AnswerGrader: Send + Sync {
    fn grade(&self, answer: &AnswerRecord, question: &QuestionRecord) -> GradedAnswer;
}

/// Placeholder grader: uniform random score in [1, 5] with canned feedback.
/// Carries no assessment semantics; it exists to exercise the surrounding flow.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomGrader;

impl AnswerGrader for RandomGrader {
    fn grade(&self, _answer: &AnswerRecord, _question: &QuestionRecord) -> GradedAnswer {
        let score = rand::thread_rng().gen_range(MIN_SCORE..=MAX_SCORE);
        GradedAnswer {
            score,
            feedback: feedback_for_score(score).to_string(),
        }
    }
}

/// Canned feedback derived purely from the score thresholds.
pub fn feedback_for_score(score: u8) -> &'static str {
    if score > 3 {
        "Looks promising. Good insights."
    } else if score == 3 {
        "Meets expectations, but could be more detailed."
    } else {
        "Lacks detail or clarity. Needs improvement."
    }
}
