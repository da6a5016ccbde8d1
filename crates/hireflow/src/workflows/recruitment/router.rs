use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::domain::{AccessToken, ApplicationId, JobId};
use super::grading::AnswerGrader;
use super::repository::{RecruitmentRepository, RepositoryError};
use super::service::{
    CreateJobRequest, LoginRequest, RecruitmentService, RecruitmentServiceError, SubmissionForm,
};
use super::views::SubmissionOutcome;

/// Router builder exposing the HR endpoints and the token-gated apply flow.
pub fn recruitment_router<R, G>(service: Arc<RecruitmentService<R, G>>) -> Router
where
    R: RecruitmentRepository + 'static,
    G: AnswerGrader + 'static,
{
    Router::new()
        .route("/", get(home_handler::<R, G>))
        .route(
            "/api/v1/login",
            get(login_prompt_handler).post(login_handler::<R, G>),
        )
        .route("/api/v1/logout", get(logout_handler::<R, G>))
        .route("/api/v1/hr/dashboard", get(dashboard_handler::<R, G>))
        .route("/api/v1/jobs", post(create_job_handler::<R, G>))
        .route(
            "/api/v1/jobs/:job_id/application-link",
            get(application_link_handler::<R, G>),
        )
        .route(
            "/api/v1/applications/:application_id",
            get(application_view_handler::<R, G>),
        )
        .route(
            "/api/v1/applications/:application_id/grade",
            post(grade_handler::<R, G>),
        )
        .route(
            "/api/v1/apply/:token",
            get(apply_view_handler::<R, G>).post(apply_submit_handler::<R, G>),
        )
        .with_state(service)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn error_response(error: RecruitmentServiceError) -> Response {
    let status = match &error {
        RecruitmentServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        RecruitmentServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        RecruitmentServiceError::InvalidCredentials | RecruitmentServiceError::Unauthorized => {
            StatusCode::UNAUTHORIZED
        }
        RecruitmentServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RecruitmentServiceError::NotGradable { .. } | RecruitmentServiceError::Lifecycle(_) => {
            StatusCode::BAD_REQUEST
        }
    };

    let payload = match error {
        RecruitmentServiceError::Validation(issues) => json!({
            "error": "validation failed",
            "issues": issues,
        }),
        other => json!({ "error": other.to_string() }),
    };
    (status, Json(payload)).into_response()
}

/// Entry point mirrors the auth state: HR sessions land on the dashboard,
/// everyone else is pointed at login.
async fn home_handler<R, G>(
    State(service): State<Arc<RecruitmentService<R, G>>>,
    headers: HeaderMap,
) -> Redirect
where
    R: RecruitmentRepository + 'static,
    G: AnswerGrader + 'static,
{
    match service.authorize(bearer_token(&headers)) {
        Ok(_) => Redirect::to("/api/v1/hr/dashboard"),
        Err(_) => Redirect::to("/api/v1/login"),
    }
}

async fn login_prompt_handler() -> Json<serde_json::Value> {
    Json(json!({
        "prompt": "login required",
        "fields": ["username", "password"],
    }))
}

async fn login_handler<R, G>(
    State(service): State<Arc<RecruitmentService<R, G>>>,
    Json(request): Json<LoginRequest>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    G: AnswerGrader + 'static,
{
    match service.login(&request.username, &request.password) {
        Ok(session_token) => (
            StatusCode::OK,
            Json(json!({
                "message": "Logged in successfully.",
                "session_token": session_token,
            })),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

async fn logout_handler<R, G>(
    State(service): State<Arc<RecruitmentService<R, G>>>,
    headers: HeaderMap,
) -> Response
where
    R: RecruitmentRepository + 'static,
    G: AnswerGrader + 'static,
{
    match bearer_token(&headers) {
        Some(session) if service.logout(session) => (
            StatusCode::OK,
            Json(json!({ "message": "You have been logged out." })),
        )
            .into_response(),
        _ => error_response(RecruitmentServiceError::Unauthorized),
    }
}

async fn dashboard_handler<R, G>(
    State(service): State<Arc<RecruitmentService<R, G>>>,
    headers: HeaderMap,
) -> Response
where
    R: RecruitmentRepository + 'static,
    G: AnswerGrader + 'static,
{
    if let Err(error) = service.authorize(bearer_token(&headers)) {
        return error_response(error);
    }
    match service.dashboard() {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn create_job_handler<R, G>(
    State(service): State<Arc<RecruitmentService<R, G>>>,
    headers: HeaderMap,
    Json(request): Json<CreateJobRequest>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    G: AnswerGrader + 'static,
{
    let user = match service.authorize(bearer_token(&headers)) {
        Ok(user) => user,
        Err(error) => return error_response(error),
    };
    match service.create_job(user, request) {
        Ok(view) => (StatusCode::CREATED, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn application_link_handler<R, G>(
    State(service): State<Arc<RecruitmentService<R, G>>>,
    headers: HeaderMap,
    Path(job_id): Path<u64>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    G: AnswerGrader + 'static,
{
    if let Err(error) = service.authorize(bearer_token(&headers)) {
        return error_response(error);
    }
    match service.create_application_link(JobId(job_id)) {
        Ok(invite) => (StatusCode::OK, Json(invite)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn application_view_handler<R, G>(
    State(service): State<Arc<RecruitmentService<R, G>>>,
    headers: HeaderMap,
    Path(application_id): Path<u64>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    G: AnswerGrader + 'static,
{
    if let Err(error) = service.authorize(bearer_token(&headers)) {
        return error_response(error);
    }
    match service.application_view(ApplicationId(application_id)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn grade_handler<R, G>(
    State(service): State<Arc<RecruitmentService<R, G>>>,
    headers: HeaderMap,
    Path(application_id): Path<u64>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    G: AnswerGrader + 'static,
{
    if let Err(error) = service.authorize(bearer_token(&headers)) {
        return error_response(error);
    }
    match service.grade_application(ApplicationId(application_id)) {
        Ok(report) => {
            let message = report.message();
            (
                StatusCode::OK,
                Json(json!({
                    "message": message,
                    "report": report,
                })),
            )
                .into_response()
        }
        Err(error) => error_response(error),
    }
}

async fn apply_view_handler<R, G>(
    State(service): State<Arc<RecruitmentService<R, G>>>,
    Path(token): Path<String>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    G: AnswerGrader + 'static,
{
    match service.candidate_view(&AccessToken(token)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn apply_submit_handler<R, G>(
    State(service): State<Arc<RecruitmentService<R, G>>>,
    Path(token): Path<String>,
    Json(form): Json<SubmissionForm>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    G: AnswerGrader + 'static,
{
    match service.submit_application(&AccessToken(token), form) {
        Ok(outcome) => {
            let message = match &outcome {
                SubmissionOutcome::Accepted { .. } => {
                    "Your application has been submitted successfully!"
                }
                SubmissionOutcome::AlreadySubmitted { .. } => {
                    "This application has already been submitted."
                }
            };
            (
                StatusCode::OK,
                Json(json!({
                    "message": message,
                    "result": outcome,
                })),
            )
                .into_response()
        }
        Err(error) => error_response(error),
    }
}
