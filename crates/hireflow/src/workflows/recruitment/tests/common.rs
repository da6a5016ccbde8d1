use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::recruitment::domain::{
    AccessToken, AnswerId, AnswerRecord, ApplicationId, ApplicationRecord, ApplicationStatus,
    CandidateId, CandidateRecord, HrUserId, JobId, JobRecord, QuestionId, QuestionRecord,
};
use crate::workflows::recruitment::grading::{feedback_for_score, AnswerGrader, GradedAnswer};
use crate::workflows::recruitment::repository::{
    NewAnswer, NewApplication, NewCandidate, NewJob, NewQuestion, RecruitmentRepository,
    RepositoryError,
};
use crate::workflows::recruitment::service::{CreateJobRequest, SubmissionForm};
use crate::workflows::recruitment::sessions::{HrAccount, HrDirectory};
use crate::workflows::recruitment::views::QuestionView;
use crate::workflows::recruitment::{RandomGrader, RecruitmentService};

pub(super) const HR_USERNAME: &str = "hr_user";
pub(super) const HR_PASSWORD: &str = "password";

#[derive(Default)]
struct Store {
    jobs: BTreeMap<u64, JobRecord>,
    questions: BTreeMap<u64, QuestionRecord>,
    candidates: BTreeMap<u64, CandidateRecord>,
    applications: BTreeMap<u64, ApplicationRecord>,
    answers: BTreeMap<u64, AnswerRecord>,
    next_job: u64,
    next_question: u64,
    next_candidate: u64,
    next_application: u64,
    next_answer: u64,
}

fn bump(counter: &mut u64) -> u64 {
    *counter += 1;
    *counter
}

/// In-memory repository backing the unit tests.
#[derive(Default)]
pub(super) struct MemoryRepository {
    store: Mutex<Store>,
}

impl RecruitmentRepository for MemoryRepository {
    fn insert_job(&self, job: NewJob) -> Result<JobRecord, RepositoryError> {
        let mut store = self.store.lock().expect("store mutex poisoned");
        let id = JobId(bump(&mut store.next_job));
        let record = JobRecord {
            id,
            title: job.title,
            description: job.description,
            level: job.level,
            created_by: job.created_by,
            created_at: job.created_at,
        };
        store.jobs.insert(id.0, record.clone());
        Ok(record)
    }

    fn insert_question(&self, question: NewQuestion) -> Result<QuestionRecord, RepositoryError> {
        let mut store = self.store.lock().expect("store mutex poisoned");
        let id = QuestionId(bump(&mut store.next_question));
        let record = QuestionRecord {
            id,
            job_id: question.job_id,
            text: question.text,
            category: question.category,
            guideline: question.guideline,
        };
        store.questions.insert(id.0, record.clone());
        Ok(record)
    }

    fn insert_candidate(&self, candidate: NewCandidate) -> Result<CandidateRecord, RepositoryError> {
        let mut store = self.store.lock().expect("store mutex poisoned");
        if store
            .candidates
            .values()
            .any(|existing| existing.token == candidate.token)
        {
            return Err(RepositoryError::Conflict);
        }
        let id = CandidateId(bump(&mut store.next_candidate));
        let record = CandidateRecord {
            id,
            name: None,
            email: None,
            token: candidate.token,
        };
        store.candidates.insert(id.0, record.clone());
        Ok(record)
    }

    fn insert_application(
        &self,
        application: NewApplication,
    ) -> Result<ApplicationRecord, RepositoryError> {
        let mut store = self.store.lock().expect("store mutex poisoned");
        let id = ApplicationId(bump(&mut store.next_application));
        let record = ApplicationRecord {
            id,
            job_id: application.job_id,
            candidate_id: application.candidate_id,
            status: ApplicationStatus::Pending,
            submitted_at: None,
        };
        store.applications.insert(id.0, record.clone());
        Ok(record)
    }

    fn insert_answer(&self, answer: NewAnswer) -> Result<AnswerRecord, RepositoryError> {
        let mut store = self.store.lock().expect("store mutex poisoned");
        let id = AnswerId(bump(&mut store.next_answer));
        let record = AnswerRecord {
            id,
            application_id: answer.application_id,
            question_id: answer.question_id,
            text: answer.text,
            score: None,
            feedback: None,
        };
        store.answers.insert(id.0, record.clone());
        Ok(record)
    }

    fn update_candidate(&self, candidate: CandidateRecord) -> Result<(), RepositoryError> {
        let mut store = self.store.lock().expect("store mutex poisoned");
        if !store.candidates.contains_key(&candidate.id.0) {
            return Err(RepositoryError::NotFound);
        }
        store.candidates.insert(candidate.id.0, candidate);
        Ok(())
    }

    fn update_application(&self, application: ApplicationRecord) -> Result<(), RepositoryError> {
        let mut store = self.store.lock().expect("store mutex poisoned");
        if !store.applications.contains_key(&application.id.0) {
            return Err(RepositoryError::NotFound);
        }
        store.applications.insert(application.id.0, application);
        Ok(())
    }

    fn update_answer(&self, answer: AnswerRecord) -> Result<(), RepositoryError> {
        let mut store = self.store.lock().expect("store mutex poisoned");
        if !store.answers.contains_key(&answer.id.0) {
            return Err(RepositoryError::NotFound);
        }
        store.answers.insert(answer.id.0, answer);
        Ok(())
    }

    fn job(&self, id: JobId) -> Result<Option<JobRecord>, RepositoryError> {
        let store = self.store.lock().expect("store mutex poisoned");
        Ok(store.jobs.get(&id.0).cloned())
    }

    fn question(&self, id: QuestionId) -> Result<Option<QuestionRecord>, RepositoryError> {
        let store = self.store.lock().expect("store mutex poisoned");
        Ok(store.questions.get(&id.0).cloned())
    }

    fn candidate(&self, id: CandidateId) -> Result<Option<CandidateRecord>, RepositoryError> {
        let store = self.store.lock().expect("store mutex poisoned");
        Ok(store.candidates.get(&id.0).cloned())
    }

    fn application(&self, id: ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let store = self.store.lock().expect("store mutex poisoned");
        Ok(store.applications.get(&id.0).cloned())
    }

    fn candidate_by_token(
        &self,
        token: &AccessToken,
    ) -> Result<Option<CandidateRecord>, RepositoryError> {
        let store = self.store.lock().expect("store mutex poisoned");
        Ok(store
            .candidates
            .values()
            .find(|candidate| &candidate.token == token)
            .cloned())
    }

    fn latest_application_for_candidate(
        &self,
        candidate_id: CandidateId,
    ) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let store = self.store.lock().expect("store mutex poisoned");
        Ok(store
            .applications
            .values()
            .filter(|application| application.candidate_id == candidate_id)
            .max_by_key(|application| application.id)
            .cloned())
    }

    fn questions_for_job(&self, job_id: JobId) -> Result<Vec<QuestionRecord>, RepositoryError> {
        let store = self.store.lock().expect("store mutex poisoned");
        Ok(store
            .questions
            .values()
            .filter(|question| question.job_id == job_id)
            .cloned()
            .collect())
    }

    fn answers_for_application(
        &self,
        application_id: ApplicationId,
    ) -> Result<Vec<AnswerRecord>, RepositoryError> {
        let store = self.store.lock().expect("store mutex poisoned");
        Ok(store
            .answers
            .values()
            .filter(|answer| answer.application_id == application_id)
            .cloned()
            .collect())
    }

    fn answer_for_question(
        &self,
        application_id: ApplicationId,
        question_id: QuestionId,
    ) -> Result<Option<AnswerRecord>, RepositoryError> {
        let store = self.store.lock().expect("store mutex poisoned");
        Ok(store
            .answers
            .values()
            .find(|answer| {
                answer.application_id == application_id && answer.question_id == question_id
            })
            .cloned())
    }

    fn jobs(&self) -> Result<Vec<JobRecord>, RepositoryError> {
        let store = self.store.lock().expect("store mutex poisoned");
        Ok(store.jobs.values().cloned().collect())
    }

    fn applications_by_submission(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let store = self.store.lock().expect("store mutex poisoned");
        let mut records: Vec<_> = store.applications.values().cloned().collect();
        records.sort_by(|a, b| match (&a.submitted_at, &b.submitted_at) {
            (Some(left), Some(right)) => right.cmp(left),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => b.id.cmp(&a.id),
        });
        Ok(records)
    }
}

/// Grader pinned to one score so feedback assertions are deterministic.
pub(super) struct FixedGrader {
    pub(super) score: u8,
}

impl AnswerGrader for FixedGrader {
    fn grade(&self, _answer: &AnswerRecord, _question: &QuestionRecord) -> GradedAnswer {
        GradedAnswer {
            score: self.score,
            feedback: feedback_for_score(self.score).to_string(),
        }
    }
}

pub(super) fn directory() -> Arc<HrDirectory> {
    Arc::new(HrDirectory::new(vec![HrAccount {
        id: HrUserId(1),
        username: HR_USERNAME.to_string(),
        password: HR_PASSWORD.to_string(),
        role: "HR".to_string(),
    }]))
}

pub(super) fn build_service() -> (
    RecruitmentService<MemoryRepository, RandomGrader>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = RecruitmentService::new(
        repository.clone(),
        Arc::new(RandomGrader),
        directory(),
    );
    (service, repository)
}

pub(super) fn build_service_with_grader(
    grader: FixedGrader,
) -> (
    RecruitmentService<MemoryRepository, FixedGrader>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = RecruitmentService::new(repository.clone(), Arc::new(grader), directory());
    (service, repository)
}

pub(super) fn backend_job_request() -> CreateJobRequest {
    CreateJobRequest {
        title: "Backend Engineer".to_string(),
        description: "Build and operate the services behind the hiring portal.".to_string(),
        level: "entry".to_string(),
    }
}

pub(super) fn submission_form(questions: &[QuestionView]) -> SubmissionForm {
    let answers: BTreeMap<u64, String> = questions
        .iter()
        .map(|question| {
            (
                question.id.0,
                format!("An answer covering: {}", question.text),
            )
        })
        .collect();
    SubmissionForm {
        name: "Jane Doe".to_string(),
        email: "jane.doe@example.com".to_string(),
        answers,
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
