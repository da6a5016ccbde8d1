//! Recruitment workflow: job postings with generated interview questions,
//! tokenized candidate intake, and the application lifecycle through grading.

pub mod domain;
pub mod grading;
pub mod questions;
pub mod repository;
pub mod router;
pub mod service;
pub mod sessions;
pub mod token;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{
    AccessToken, AnswerId, AnswerRecord, ApplicationId, ApplicationRecord, ApplicationStatus,
    CandidateId, CandidateRecord, HrUserId, InvalidTransition, JobId, JobLevel, JobRecord,
    QuestionCategory, QuestionId, QuestionRecord,
};
pub use grading::{feedback_for_score, AnswerGrader, GradedAnswer, RandomGrader, MAX_SCORE, MIN_SCORE};
pub use questions::{question_plan, QuestionSeed};
pub use repository::{
    NewAnswer, NewApplication, NewCandidate, NewJob, NewQuestion, RecruitmentRepository,
    RepositoryError,
};
pub use router::recruitment_router;
pub use service::{
    CreateJobRequest, FieldIssue, LoginRequest, RecruitmentService, RecruitmentServiceError,
    SubmissionForm,
};
pub use sessions::{HrAccount, HrDirectory, SessionRegistry};
pub use token::mint_access_token;
pub use views::{
    ApplicationDetailView, ApplicationInvite, ApplicationSummary, ApplyView, DashboardView,
    GradingReport, JobView, SubmissionOutcome,
};
