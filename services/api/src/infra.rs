use hireflow::config::AuthConfig;
use hireflow::workflows::recruitment::domain::{
    AccessToken, AnswerId, AnswerRecord, ApplicationId, ApplicationRecord, ApplicationStatus,
    CandidateId, CandidateRecord, HrUserId, JobId, JobRecord, QuestionId, QuestionRecord,
};
use hireflow::workflows::recruitment::repository::{
    NewAnswer, NewApplication, NewCandidate, NewJob, NewQuestion, RecruitmentRepository,
    RepositoryError,
};
use hireflow::workflows::recruitment::{HrAccount, HrDirectory};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Directory with the single seeded HR account from configuration.
pub(crate) fn seeded_directory(auth: &AuthConfig) -> Arc<HrDirectory> {
    Arc::new(HrDirectory::new(vec![HrAccount {
        id: HrUserId(1),
        username: auth.hr_username.clone(),
        password: auth.hr_password.clone(),
        role: "HR".to_string(),
    }]))
}

#[derive(Default)]
struct Tables {
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

fn next(counter: &mut u64) -> u64 {
    *counter += 1;
    *counter
}

/// Process-local repository. Iteration over the BTreeMaps yields rows in id
/// order, which is the ordering the workflow expects from a real store.
#[derive(Default)]
pub(crate) struct InMemoryRecruitmentRepository {
    tables: Mutex<Tables>,
}

impl RecruitmentRepository for InMemoryRecruitmentRepository {
    fn insert_job(&self, job: NewJob) -> Result<JobRecord, RepositoryError> {
        let mut tables = self.tables.lock().expect("repository mutex poisoned");
        let id = JobId(next(&mut tables.next_job));
        let record = JobRecord {
            id,
            title: job.title,
            description: job.description,
            level: job.level,
            created_by: job.created_by,
            created_at: job.created_at,
        };
        tables.jobs.insert(id.0, record.clone());
        Ok(record)
    }

    fn insert_question(&self, question: NewQuestion) -> Result<QuestionRecord, RepositoryError> {
        let mut tables = self.tables.lock().expect("repository mutex poisoned");
        let id = QuestionId(next(&mut tables.next_question));
        let record = QuestionRecord {
            id,
            job_id: question.job_id,
            text: question.text,
            category: question.category,
            guideline: question.guideline,
        };
        tables.questions.insert(id.0, record.clone());
        Ok(record)
    }

    fn insert_candidate(&self, candidate: NewCandidate) -> Result<CandidateRecord, RepositoryError> {
        let mut tables = self.tables.lock().expect("repository mutex poisoned");
        if tables
            .candidates
            .values()
            .any(|existing| existing.token == candidate.token)
        {
            return Err(RepositoryError::Conflict);
        }
        let id = CandidateId(next(&mut tables.next_candidate));
        let record = CandidateRecord {
            id,
            name: None,
            email: None,
            token: candidate.token,
        };
        tables.candidates.insert(id.0, record.clone());
        Ok(record)
    }

    fn insert_application(
        &self,
        application: NewApplication,
    ) -> Result<ApplicationRecord, RepositoryError> {
        let mut tables = self.tables.lock().expect("repository mutex poisoned");
        let id = ApplicationId(next(&mut tables.next_application));
        let record = ApplicationRecord {
            id,
            job_id: application.job_id,
            candidate_id: application.candidate_id,
            status: ApplicationStatus::Pending,
            submitted_at: None,
        };
        tables.applications.insert(id.0, record.clone());
        Ok(record)
    }

    fn insert_answer(&self, answer: NewAnswer) -> Result<AnswerRecord, RepositoryError> {
        let mut tables = self.tables.lock().expect("repository mutex poisoned");
        let id = AnswerId(next(&mut tables.next_answer));
        let record = AnswerRecord {
            id,
            application_id: answer.application_id,
            question_id: answer.question_id,
            text: answer.text,
            score: None,
            feedback: None,
        };
        tables.answers.insert(id.0, record.clone());
        Ok(record)
    }

    fn update_candidate(&self, candidate: CandidateRecord) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().expect("repository mutex poisoned");
        if !tables.candidates.contains_key(&candidate.id.0) {
            return Err(RepositoryError::NotFound);
        }
        tables.candidates.insert(candidate.id.0, candidate);
        Ok(())
    }

    fn update_application(&self, application: ApplicationRecord) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().expect("repository mutex poisoned");
        if !tables.applications.contains_key(&application.id.0) {
            return Err(RepositoryError::NotFound);
        }
        tables.applications.insert(application.id.0, application);
        Ok(())
    }

    fn update_answer(&self, answer: AnswerRecord) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().expect("repository mutex poisoned");
        if !tables.answers.contains_key(&answer.id.0) {
            return Err(RepositoryError::NotFound);
        }
        tables.answers.insert(answer.id.0, answer);
        Ok(())
    }

    fn job(&self, id: JobId) -> Result<Option<JobRecord>, RepositoryError> {
        let tables = self.tables.lock().expect("repository mutex poisoned");
        Ok(tables.jobs.get(&id.0).cloned())
    }

    fn question(&self, id: QuestionId) -> Result<Option<QuestionRecord>, RepositoryError> {
        let tables = self.tables.lock().expect("repository mutex poisoned");
        Ok(tables.questions.get(&id.0).cloned())
    }

    fn candidate(&self, id: CandidateId) -> Result<Option<CandidateRecord>, RepositoryError> {
        let tables = self.tables.lock().expect("repository mutex poisoned");
        Ok(tables.candidates.get(&id.0).cloned())
    }

    fn application(&self, id: ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let tables = self.tables.lock().expect("repository mutex poisoned");
        Ok(tables.applications.get(&id.0).cloned())
    }

    fn candidate_by_token(
        &self,
        token: &AccessToken,
    ) -> Result<Option<CandidateRecord>, RepositoryError> {
        let tables = self.tables.lock().expect("repository mutex poisoned");
        Ok(tables
            .candidates
            .values()
            .find(|candidate| &candidate.token == token)
            .cloned())
    }

    fn latest_application_for_candidate(
        &self,
        candidate_id: CandidateId,
    ) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let tables = self.tables.lock().expect("repository mutex poisoned");
        Ok(tables
            .applications
            .values()
            .filter(|application| application.candidate_id == candidate_id)
            .max_by_key(|application| application.id)
            .cloned())
    }

    fn questions_for_job(&self, job_id: JobId) -> Result<Vec<QuestionRecord>, RepositoryError> {
        let tables = self.tables.lock().expect("repository mutex poisoned");
        Ok(tables
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
        let tables = self.tables.lock().expect("repository mutex poisoned");
        Ok(tables
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
        let tables = self.tables.lock().expect("repository mutex poisoned");
        Ok(tables
            .answers
            .values()
            .find(|answer| {
                answer.application_id == application_id && answer.question_id == question_id
            })
            .cloned())
    }

    fn jobs(&self) -> Result<Vec<JobRecord>, RepositoryError> {
        let tables = self.tables.lock().expect("repository mutex poisoned");
        Ok(tables.jobs.values().cloned().collect())
    }

    fn applications_by_submission(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let tables = self.tables.lock().expect("repository mutex poisoned");
        let mut records: Vec<_> = tables.applications.values().cloned().collect();
        records.sort_by(|a, b| match (&a.submitted_at, &b.submitted_at) {
            (Some(left), Some(right)) => right.cmp(left),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => b.id.cmp(&a.id),
        });
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hireflow::workflows::recruitment::mint_access_token;

    #[test]
    fn candidate_tokens_must_be_unique() {
        let repository = InMemoryRecruitmentRepository::default();
        let token = mint_access_token();
        repository
            .insert_candidate(NewCandidate {
                token: token.clone(),
            })
            .expect("first insert succeeds");

        match repository.insert_candidate(NewCandidate { token }) {
            Err(RepositoryError::Conflict) => {}
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn latest_application_wins_for_a_candidate() {
        let repository = InMemoryRecruitmentRepository::default();
        let candidate = repository
            .insert_candidate(NewCandidate {
                token: mint_access_token(),
            })
            .expect("candidate stored");

        let first = repository
            .insert_application(NewApplication {
                job_id: JobId(1),
                candidate_id: candidate.id,
            })
            .expect("first application");
        let second = repository
            .insert_application(NewApplication {
                job_id: JobId(2),
                candidate_id: candidate.id,
            })
            .expect("second application");
        assert!(second.id > first.id);

        let latest = repository
            .latest_application_for_candidate(candidate.id)
            .expect("lookup")
            .expect("application present");
        assert_eq!(latest.id, second.id);
    }
}
