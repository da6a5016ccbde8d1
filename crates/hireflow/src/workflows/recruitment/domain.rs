use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrappers for repository-assigned rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnswerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HrUserId(pub u64);

/// Seniority bands a job can be posted at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobLevel {
    Entry,
    Professional,
    Expert,
    CSuite,
}

impl JobLevel {
    pub const fn label(self) -> &'static str {
        match self {
            JobLevel::Entry => "entry",
            JobLevel::Professional => "professional",
            JobLevel::Expert => "expert",
            JobLevel::CSuite => "c-suite",
        }
    }

    /// Parse the wire form of a level; unknown strings are rejected rather than guessed.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "entry" => Some(Self::Entry),
            "professional" => Some(Self::Professional),
            "expert" => Some(Self::Expert),
            "c-suite" | "csuite" => Some(Self::CSuite),
            _ => None,
        }
    }
}

/// Interview question flavors carried through from generation to grading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionCategory {
    Objective,
    RolePlay,
    CaseStudy,
}

impl QuestionCategory {
    pub const fn label(self) -> &'static str {
        match self {
            QuestionCategory::Objective => "objective",
            QuestionCategory::RolePlay => "role-play",
            QuestionCategory::CaseStudy => "case-study",
        }
    }
}

/// Lifecycle states of a candidate application. Transitions move strictly forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Submitted,
    Graded,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::Graded => "graded",
        }
    }

    /// Attempt a transition. Only Pending -> Submitted and Submitted -> Graded exist.
    pub fn advance(self, next: ApplicationStatus) -> Result<ApplicationStatus, InvalidTransition> {
        match (self, next) {
            (ApplicationStatus::Pending, ApplicationStatus::Submitted)
            | (ApplicationStatus::Submitted, ApplicationStatus::Graded) => Ok(next),
            _ => Err(InvalidTransition { from: self, to: next }),
        }
    }
}

/// Rejected lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot move application from '{}' to '{}'", .from.label(), .to.label())]
pub struct InvalidTransition {
    pub from: ApplicationStatus,
    pub to: ApplicationStatus,
}

/// Opaque bearer credential for the candidate-facing flow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessToken(pub String);

/// A posted role with an immutable set of generated interview questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub level: JobLevel,
    pub created_by: HrUserId,
    pub created_at: DateTime<Utc>,
}

/// Belongs to exactly one job; immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub job_id: JobId,
    pub text: String,
    pub category: QuestionCategory,
    pub guideline: Option<String>,
}

/// A person identified solely by their access token until they self-report name/email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: CandidateId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub token: AccessToken,
}

/// The join of one candidate to one job, carrying lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub candidate_id: CandidateId,
    pub status: ApplicationStatus,
    pub submitted_at: Option<DateTime<Utc>>,
}

/// A candidate's free-text response to one question, annotated once graded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub id: AnswerId,
    pub application_id: ApplicationId,
    pub question_id: QuestionId,
    pub text: String,
    pub score: Option<u8>,
    pub feedback: Option<String>,
}
