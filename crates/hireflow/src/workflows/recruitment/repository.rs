use chrono::{DateTime, Utc};

use super::domain::{
    AccessToken, AnswerRecord, ApplicationId, ApplicationRecord, CandidateId, CandidateRecord,
    HrUserId, JobId, JobLevel, JobRecord, QuestionCategory, QuestionId, QuestionRecord,
};

/// Insert payloads. Identifiers are assigned by the repository.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub level: JobLevel,
    pub created_by: HrUserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub job_id: JobId,
    pub text: String,
    pub category: QuestionCategory,
    pub guideline: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewCandidate {
    pub token: AccessToken,
}

#[derive(Debug, Clone)]
pub struct NewApplication {
    pub job_id: JobId,
    pub candidate_id: CandidateId,
}

#[derive(Debug, Clone)]
pub struct NewAnswer {
    pub application_id: ApplicationId,
    pub question_id: QuestionId,
    pub text: String,
}

/// Storage abstraction over the relational model. All relationship traversal
/// is spelled out as explicit foreign-key queries; there are no implicit
/// back-references. Callers hold the repository as an explicit handle.
pub trait RecruitmentRepository: Send + Sync {
    fn insert_job(&self, job: NewJob) -> Result<JobRecord, RepositoryError>;
    fn insert_question(&self, question: NewQuestion) -> Result<QuestionRecord, RepositoryError>;
    /// Fails with `Conflict` when the token is already taken by another candidate.
    fn insert_candidate(&self, candidate: NewCandidate) -> Result<CandidateRecord, RepositoryError>;
    fn insert_application(
        &self,
        application: NewApplication,
    ) -> Result<ApplicationRecord, RepositoryError>;
    fn insert_answer(&self, answer: NewAnswer) -> Result<AnswerRecord, RepositoryError>;

    fn update_candidate(&self, candidate: CandidateRecord) -> Result<(), RepositoryError>;
    fn update_application(&self, application: ApplicationRecord) -> Result<(), RepositoryError>;
    fn update_answer(&self, answer: AnswerRecord) -> Result<(), RepositoryError>;

    fn job(&self, id: JobId) -> Result<Option<JobRecord>, RepositoryError>;
    fn question(&self, id: QuestionId) -> Result<Option<QuestionRecord>, RepositoryError>;
    fn candidate(&self, id: CandidateId) -> Result<Option<CandidateRecord>, RepositoryError>;
    fn application(&self, id: ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;

    /// Direct equality match on the stored token.
    fn candidate_by_token(
        &self,
        token: &AccessToken,
    ) -> Result<Option<CandidateRecord>, RepositoryError>;
    /// The newest application owned by the candidate (highest id wins); older
    /// ones are unreachable through the token gate.
    fn latest_application_for_candidate(
        &self,
        candidate_id: CandidateId,
    ) -> Result<Option<ApplicationRecord>, RepositoryError>;

    /// Questions for a job, ordered by id.
    fn questions_for_job(&self, job_id: JobId) -> Result<Vec<QuestionRecord>, RepositoryError>;
    fn answers_for_application(
        &self,
        application_id: ApplicationId,
    ) -> Result<Vec<AnswerRecord>, RepositoryError>;
    fn answer_for_question(
        &self,
        application_id: ApplicationId,
        question_id: QuestionId,
    ) -> Result<Option<AnswerRecord>, RepositoryError>;

    fn jobs(&self) -> Result<Vec<JobRecord>, RepositoryError>;
    /// All applications, most recently submitted first; never-submitted ones last.
    fn applications_by_submission(&self) -> Result<Vec<ApplicationRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
