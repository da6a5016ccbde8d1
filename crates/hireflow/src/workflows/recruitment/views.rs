use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{
    AnswerRecord, ApplicationId, ApplicationRecord, CandidateRecord, JobId, JobRecord,
    QuestionId, QuestionRecord,
};

/// Sanitized representation of one interview question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub id: QuestionId,
    pub text: String,
    pub category: &'static str,
}

impl From<&QuestionRecord> for QuestionView {
    fn from(record: &QuestionRecord) -> Self {
        Self {
            id: record.id,
            text: record.text.clone(),
            category: record.category.label(),
        }
    }
}

/// Job header used in listings.
#[derive(Debug, Clone, Serialize)]
pub struct JobSummary {
    pub id: JobId,
    pub title: String,
    pub level: &'static str,
    pub created_at: DateTime<Utc>,
}

impl From<&JobRecord> for JobSummary {
    fn from(record: &JobRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            level: record.level.label(),
            created_at: record.created_at,
        }
    }
}

/// Full job payload returned after creation, questions included.
#[derive(Debug, Clone, Serialize)]
pub struct JobView {
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub level: &'static str,
    pub created_at: DateTime<Utc>,
    pub questions: Vec<QuestionView>,
}

/// Candidate identity as self-reported through the apply flow.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateView {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl From<&CandidateRecord> for CandidateView {
    fn from(record: &CandidateRecord) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
        }
    }
}

/// One dashboard row joining an application to its job and candidate.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationSummary {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub job_title: String,
    pub candidate_name: Option<String>,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Everything the HR dashboard shows: jobs plus applications, newest
/// submissions first.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub jobs: Vec<JobSummary>,
    pub applications: Vec<ApplicationSummary>,
}

/// Answer as shown to HR reviewers.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerView {
    pub question_id: QuestionId,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl From<&AnswerRecord> for AnswerView {
    fn from(record: &AnswerRecord) -> Self {
        Self {
            question_id: record.question_id,
            text: record.text.clone(),
            score: record.score,
            feedback: record.feedback.clone(),
        }
    }
}

/// Question paired with whatever answer the candidate gave, if any.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionWithAnswer {
    pub id: QuestionId,
    pub text: String,
    pub category: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<AnswerView>,
}

/// HR-facing view of one application with questions in display order.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationDetailView {
    pub id: ApplicationId,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    pub job: JobSummary,
    pub candidate: CandidateView,
    pub questions: Vec<QuestionWithAnswer>,
}

/// Result of minting an application link for a job.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationInvite {
    pub application_id: ApplicationId,
    pub job_id: JobId,
    pub job_title: String,
    pub token: String,
    pub apply_path: String,
}

/// Candidate-facing view behind the token gate.
#[derive(Debug, Clone, Serialize)]
pub struct ApplyView {
    pub job_title: String,
    pub job_level: &'static str,
    pub already_submitted: bool,
    pub candidate: CandidateView,
    pub questions: Vec<QuestionView>,
}

/// Outcome of a candidate submission attempt. A repeat submission is a
/// no-op notice, not an error.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    Accepted {
        application_id: ApplicationId,
        job_title: String,
        answers_recorded: usize,
    },
    AlreadySubmitted {
        job_title: String,
    },
}

/// Per-answer result of a grading run.
#[derive(Debug, Clone, Serialize)]
pub struct GradedAnswerView {
    pub question_id: QuestionId,
    pub score: u8,
    pub feedback: String,
}

/// Summary of one grading pass over an application.
#[derive(Debug, Clone, Serialize)]
pub struct GradingReport {
    pub application_id: ApplicationId,
    pub status: &'static str,
    pub answers: Vec<GradedAnswerView>,
}

impl GradingReport {
    pub fn message(&self) -> &'static str {
        if self.answers.is_empty() {
            "Application has no answers to grade. Status set to 'Graded'."
        } else {
            "Application graded successfully."
        }
    }
}

pub(crate) fn summarize_application(
    application: &ApplicationRecord,
    job: &JobRecord,
    candidate: &CandidateRecord,
) -> ApplicationSummary {
    ApplicationSummary {
        id: application.id,
        job_id: job.id,
        job_title: job.title.clone(),
        candidate_name: candidate.name.clone(),
        status: application.status.label(),
        submitted_at: application.submitted_at,
    }
}
