use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::domain::{
    AccessToken, ApplicationId, ApplicationRecord, ApplicationStatus, CandidateRecord, HrUserId,
    InvalidTransition, JobId, JobLevel, JobRecord, QuestionId,
};
use super::grading::AnswerGrader;
use super::questions::question_plan;
use super::repository::{
    NewAnswer, NewApplication, NewCandidate, NewJob, NewQuestion, RecruitmentRepository,
    RepositoryError,
};
use super::sessions::{HrDirectory, SessionRegistry};
use super::token::mint_access_token;
use super::views::{
    summarize_application, ApplicationDetailView, ApplicationInvite, ApplyView, CandidateView,
    DashboardView, GradedAnswerView, GradingReport, JobView, QuestionView, QuestionWithAnswer,
    SubmissionOutcome,
};

/// Bound on consecutive token collisions before the link mint gives up.
const TOKEN_MINT_ATTEMPTS: usize = 3;

/// Inbound payload for job creation. The level arrives as its wire label.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub description: String,
    pub level: String,
}

/// Inbound payload for the token-gated submission. Answers are keyed by
/// question id; questions absent from the map are simply skipped.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub answers: BTreeMap<u64, String>,
}

/// Login payload for the HR flow.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// One rejected field in an inbound payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: &'static str,
    pub message: String,
}

impl FieldIssue {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("{}: {}", issue.field, issue.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error raised by the recruitment service.
#[derive(Debug, thiserror::Error)]
pub enum RecruitmentServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Lifecycle(#[from] InvalidTransition),
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("a valid HR session is required")]
    Unauthorized,
    #[error("validation failed: {}", join_issues(.0))]
    Validation(Vec<FieldIssue>),
    #[error("application status is '{status}', not 'submitted'; cannot grade")]
    NotGradable { status: &'static str },
}

/// Service composing the repository, grading seam, and HR session handling.
/// Every operation takes the repository through the explicit handle held
/// here; there is no ambient storage context.
pub struct RecruitmentService<R, G> {
    repository: Arc<R>,
    grader: Arc<G>,
    directory: Arc<HrDirectory>,
    sessions: SessionRegistry,
}

impl<R, G> RecruitmentService<R, G>
where
    R: RecruitmentRepository + 'static,
    G: AnswerGrader + 'static,
{
    pub fn new(repository: Arc<R>, grader: Arc<G>, directory: Arc<HrDirectory>) -> Self {
        Self {
            repository,
            grader,
            directory,
            sessions: SessionRegistry::default(),
        }
    }

    // --- HR sessions ---

    pub fn login(&self, username: &str, password: &str) -> Result<String, RecruitmentServiceError> {
        let user = self
            .directory
            .verify(username, password)
            .ok_or(RecruitmentServiceError::InvalidCredentials)?;
        Ok(self.sessions.open(user))
    }

    pub fn logout(&self, session: &str) -> bool {
        self.sessions.close(session)
    }

    pub fn authorize(&self, session: Option<&str>) -> Result<HrUserId, RecruitmentServiceError> {
        session
            .and_then(|token| self.sessions.resolve(token))
            .ok_or(RecruitmentServiceError::Unauthorized)
    }

    // --- HR operations ---

    /// Create a job and persist its generated interview questions in one go.
    pub fn create_job(
        &self,
        created_by: HrUserId,
        request: CreateJobRequest,
    ) -> Result<JobView, RecruitmentServiceError> {
        let mut issues = Vec::new();
        let title = request.title.trim();
        if title.is_empty() {
            issues.push(FieldIssue::new("title", "must not be empty"));
        } else if title.len() > 120 {
            issues.push(FieldIssue::new("title", "must be at most 120 characters"));
        }
        if request.description.trim().is_empty() {
            issues.push(FieldIssue::new("description", "must not be empty"));
        }
        let level = match JobLevel::parse(&request.level) {
            Some(level) => Some(level),
            None => {
                issues.push(FieldIssue::new(
                    "level",
                    format!("unknown job level '{}'", request.level),
                ));
                None
            }
        };
        if !issues.is_empty() {
            return Err(RecruitmentServiceError::Validation(issues));
        }
        let Some(level) = level else {
            return Err(RecruitmentServiceError::Validation(issues));
        };

        let job = self.repository.insert_job(NewJob {
            title: title.to_string(),
            description: request.description.trim().to_string(),
            level,
            created_by,
            created_at: Utc::now(),
        })?;

        let mut questions = Vec::new();
        for seed in question_plan(level.label(), &job.title) {
            let question = self.repository.insert_question(NewQuestion {
                job_id: job.id,
                text: seed.text,
                category: seed.category,
                guideline: None,
            })?;
            questions.push(QuestionView::from(&question));
        }

        Ok(JobView {
            id: job.id,
            title: job.title,
            description: job.description,
            level: job.level.label(),
            created_at: job.created_at,
            questions,
        })
    }

    /// Mint a token, a blank candidate, and a pending application for a job.
    pub fn create_application_link(
        &self,
        job_id: JobId,
    ) -> Result<ApplicationInvite, RecruitmentServiceError> {
        let job = self
            .repository
            .job(job_id)?
            .ok_or(RepositoryError::NotFound)?;

        let candidate = self.mint_candidate()?;
        let application = self.repository.insert_application(NewApplication {
            job_id: job.id,
            candidate_id: candidate.id,
        })?;

        let token = candidate.token.0;
        Ok(ApplicationInvite {
            application_id: application.id,
            job_id: job.id,
            job_title: job.title,
            apply_path: format!("/api/v1/apply/{token}"),
            token,
        })
    }

    /// Jobs plus applications for the dashboard, newest submissions first.
    pub fn dashboard(&self) -> Result<DashboardView, RecruitmentServiceError> {
        let jobs = self.repository.jobs()?;
        let mut applications = Vec::new();
        for application in self.repository.applications_by_submission()? {
            let job = self
                .repository
                .job(application.job_id)?
                .ok_or(RepositoryError::NotFound)?;
            let candidate = self
                .repository
                .candidate(application.candidate_id)?
                .ok_or(RepositoryError::NotFound)?;
            applications.push(summarize_application(&application, &job, &candidate));
        }

        Ok(DashboardView {
            jobs: jobs.iter().map(Into::into).collect(),
            applications,
        })
    }

    /// Full HR view of one application: questions in id order, answers attached.
    pub fn application_view(
        &self,
        application_id: ApplicationId,
    ) -> Result<ApplicationDetailView, RecruitmentServiceError> {
        let application = self
            .repository
            .application(application_id)?
            .ok_or(RepositoryError::NotFound)?;
        let job = self
            .repository
            .job(application.job_id)?
            .ok_or(RepositoryError::NotFound)?;
        let candidate = self
            .repository
            .candidate(application.candidate_id)?
            .ok_or(RepositoryError::NotFound)?;

        let answers: HashMap<QuestionId, _> = self
            .repository
            .answers_for_application(application.id)?
            .into_iter()
            .map(|answer| (answer.question_id, answer))
            .collect();

        let questions = self
            .repository
            .questions_for_job(job.id)?
            .iter()
            .map(|question| QuestionWithAnswer {
                id: question.id,
                text: question.text.clone(),
                category: question.category.label(),
                answer: answers.get(&question.id).map(Into::into),
            })
            .collect();

        Ok(ApplicationDetailView {
            id: application.id,
            status: application.status.label(),
            submitted_at: application.submitted_at,
            job: (&job).into(),
            candidate: (&candidate).into(),
            questions,
        })
    }

    /// Grade every answer of a submitted application and advance it to Graded.
    ///
    /// An application with no answers still advances; there is just no
    /// per-answer work to do.
    pub fn grade_application(
        &self,
        application_id: ApplicationId,
    ) -> Result<GradingReport, RecruitmentServiceError> {
        let mut application = self
            .repository
            .application(application_id)?
            .ok_or(RepositoryError::NotFound)?;

        if application.status != ApplicationStatus::Submitted {
            return Err(RecruitmentServiceError::NotGradable {
                status: application.status.label(),
            });
        }

        let mut graded = Vec::new();
        for mut answer in self.repository.answers_for_application(application.id)? {
            let question = self
                .repository
                .question(answer.question_id)?
                .ok_or(RepositoryError::NotFound)?;
            let outcome = self.grader.grade(&answer, &question);
            answer.score = Some(outcome.score);
            answer.feedback = Some(outcome.feedback.clone());
            self.repository.update_answer(answer.clone())?;
            graded.push(GradedAnswerView {
                question_id: answer.question_id,
                score: outcome.score,
                feedback: outcome.feedback,
            });
        }

        application.status = application.status.advance(ApplicationStatus::Graded)?;
        self.repository.update_application(application.clone())?;

        Ok(GradingReport {
            application_id: application.id,
            status: application.status.label(),
            answers: graded,
        })
    }

    // --- Candidate flow (token gate) ---

    /// Candidate view behind the token gate, with prefill for a returning
    /// candidate and an already-submitted notice when the window has closed.
    pub fn candidate_view(
        &self,
        token: &AccessToken,
    ) -> Result<ApplyView, RecruitmentServiceError> {
        let (candidate, application, job) = self.resolve_token(token)?;
        let questions = self
            .repository
            .questions_for_job(job.id)?
            .iter()
            .map(Into::into)
            .collect();

        Ok(ApplyView {
            job_title: job.title,
            job_level: job.level.label(),
            already_submitted: application.status != ApplicationStatus::Pending,
            candidate: CandidateView::from(&candidate),
            questions,
        })
    }

    /// Accept a candidate submission: record KYC fields, upsert one answer
    /// per question present in the form, and flip the application to
    /// Submitted. Repeat submissions are a no-op notice.
    pub fn submit_application(
        &self,
        token: &AccessToken,
        form: SubmissionForm,
    ) -> Result<SubmissionOutcome, RecruitmentServiceError> {
        let (mut candidate, mut application, job) = self.resolve_token(token)?;

        if application.status != ApplicationStatus::Pending {
            return Ok(SubmissionOutcome::AlreadySubmitted {
                job_title: job.title,
            });
        }

        let issues = validate_submission(&form);
        if !issues.is_empty() {
            return Err(RecruitmentServiceError::Validation(issues));
        }

        candidate.name = Some(form.name.trim().to_string());
        candidate.email = Some(form.email.trim().to_string());
        self.repository.update_candidate(candidate)?;

        let mut answers_recorded = 0;
        for question in self.repository.questions_for_job(job.id)? {
            let Some(text) = form.answers.get(&question.id.0) else {
                continue;
            };
            match self
                .repository
                .answer_for_question(application.id, question.id)?
            {
                Some(mut existing) => {
                    existing.text = text.clone();
                    self.repository.update_answer(existing)?;
                }
                None => {
                    self.repository.insert_answer(NewAnswer {
                        application_id: application.id,
                        question_id: question.id,
                        text: text.clone(),
                    })?;
                }
            }
            answers_recorded += 1;
        }

        application.status = application.status.advance(ApplicationStatus::Submitted)?;
        application.submitted_at = Some(Utc::now());
        self.repository.update_application(application.clone())?;

        Ok(SubmissionOutcome::Accepted {
            application_id: application.id,
            job_title: job.title,
            answers_recorded,
        })
    }

    /// Token gate: token -> candidate -> latest application -> job. Any
    /// missing link surfaces as not-found.
    fn resolve_token(
        &self,
        token: &AccessToken,
    ) -> Result<(CandidateRecord, ApplicationRecord, JobRecord), RecruitmentServiceError> {
        let candidate = self
            .repository
            .candidate_by_token(token)?
            .ok_or(RepositoryError::NotFound)?;
        let application = self
            .repository
            .latest_application_for_candidate(candidate.id)?
            .ok_or(RepositoryError::NotFound)?;
        let job = self
            .repository
            .job(application.job_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok((candidate, application, job))
    }

    fn mint_candidate(&self) -> Result<CandidateRecord, RecruitmentServiceError> {
        for _ in 0..TOKEN_MINT_ATTEMPTS {
            match self.repository.insert_candidate(NewCandidate {
                token: mint_access_token(),
            }) {
                Ok(candidate) => return Ok(candidate),
                Err(RepositoryError::Conflict) => continue,
                Err(other) => return Err(other.into()),
            }
        }
        Err(RepositoryError::Conflict.into())
    }
}

fn validate_submission(form: &SubmissionForm) -> Vec<FieldIssue> {
    let mut issues = Vec::new();
    let name = form.name.trim();
    if name.len() < 2 || name.len() > 120 {
        issues.push(FieldIssue::new(
            "name",
            "must be between 2 and 120 characters",
        ));
    }
    let email = form.email.trim();
    if email.len() < 6 || email.len() > 120 || !email.contains('@') {
        issues.push(FieldIssue::new("email", "must be a plausible email address"));
    }
    issues
}
