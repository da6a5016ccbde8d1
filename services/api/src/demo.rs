use crate::infra::{seeded_directory, InMemoryRecruitmentRepository};
use clap::Args;
use hireflow::config::AuthConfig;
use hireflow::error::AppError;
use hireflow::workflows::recruitment::domain::AccessToken;
use hireflow::workflows::recruitment::{
    CreateJobRequest, RandomGrader, RecruitmentService, SubmissionForm, SubmissionOutcome,
};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Job title for the demo posting
    #[arg(long, default_value = "Backend Engineer")]
    pub(crate) job_title: String,
    /// Job level for the demo posting (entry, professional, expert, c-suite)
    #[arg(long, default_value = "entry")]
    pub(crate) job_level: String,
    /// Stop after the candidate submission, before grading
    #[arg(long)]
    pub(crate) skip_grading: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        job_title,
        job_level,
        skip_grading,
    } = args;

    println!("Recruitment workflow demo");

    let auth = AuthConfig {
        hr_username: "hr_user".to_string(),
        hr_password: "password".to_string(),
    };
    let repository = Arc::new(InMemoryRecruitmentRepository::default());
    let service = RecruitmentService::new(
        repository,
        Arc::new(RandomGrader),
        seeded_directory(&auth),
    );

    let session = service.login(&auth.hr_username, &auth.hr_password)?;
    let hr_user = service.authorize(Some(&session))?;
    println!("- HR session opened for '{}'", auth.hr_username);

    let job = service.create_job(
        hr_user,
        CreateJobRequest {
            title: job_title,
            description: "Demo posting driven from the command line.".to_string(),
            level: job_level,
        },
    )?;
    println!(
        "- Created job \"{}\" ({}) with {} generated questions",
        job.title,
        job.level,
        job.questions.len()
    );
    for question in &job.questions {
        println!("    [{}] {}", question.category, question.text);
    }

    let invite = service.create_application_link(job.id)?;
    println!(
        "- Minted application link for candidate intake: {}",
        invite.apply_path
    );

    let token = AccessToken(invite.token.clone());
    let view = service.candidate_view(&token)?;
    println!(
        "- Token gate resolves to \"{}\" ({} questions, already submitted: {})",
        view.job_title,
        view.questions.len(),
        view.already_submitted
    );

    let answers: BTreeMap<u64, String> = job
        .questions
        .iter()
        .map(|question| {
            (
                question.id.0,
                format!("Demo answer touching on: {}", question.text),
            )
        })
        .collect();
    let outcome = service.submit_application(
        &token,
        SubmissionForm {
            name: "Jane Doe".to_string(),
            email: "jane.doe@example.com".to_string(),
            answers,
        },
    )?;
    match &outcome {
        SubmissionOutcome::Accepted {
            answers_recorded, ..
        } => println!("- Candidate submitted {answers_recorded} answers"),
        SubmissionOutcome::AlreadySubmitted { .. } => {
            println!("- Candidate window already closed")
        }
    }

    if skip_grading {
        return Ok(());
    }

    let report = service.grade_application(invite.application_id)?;
    println!("- {}", report.message());
    for graded in &report.answers {
        println!(
            "    question {} -> score {} ({})",
            graded.question_id.0, graded.score, graded.feedback
        );
    }

    let detail = service.application_view(invite.application_id)?;
    match serde_json::to_string_pretty(&detail) {
        Ok(json) => println!("Final application view:\n{json}"),
        Err(err) => println!("Final application view unavailable: {err}"),
    }

    Ok(())
}
