use std::sync::Arc;

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::json;

use super::domain::{ApplicationId, ResumeFile, StatusChange, Submission};
use super::resume::{PublicOrigin, ResumeKey, ResumeUpload, UPLOAD_PREFIX};
use super::service::ApplicationService;
use super::views::{ApplicationView, Populate};
use crate::board::jobs::JobId;
use crate::http::{run_blocking, ApiError, CurrentUser, PortalState};

/// Router exposing application intake, review and resume delivery.
pub fn application_router(state: PortalState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .route(
            "/api/applications/apply",
            post(apply_handler).layer(upload_limit),
        )
        .route(
            "/api/applications/my-applications",
            get(my_applications_handler),
        )
        .route("/api/applications/job/:job_id", get(job_applications_handler))
        .route(
            "/api/applications/:application_id/status",
            put(status_handler),
        )
        .route(
            "/api/applications/resume/:application_id",
            get(resume_download_handler),
        )
        .route("/uploads/*path", get(stored_file_handler))
        .with_state(state)
}

pub(crate) async fn apply_handler(
    State(applications): State<Arc<ApplicationService>>,
    CurrentUser(actor): CurrentUser,
    origin: PublicOrigin,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let submission = read_submission(multipart?).await?;
    let details = run_blocking(move || applications.apply(&actor, submission)).await?;
    let payload = json!({
        "message": "Application submitted successfully",
        "application": ApplicationView::build(details, &origin, Populate::Job),
    });
    Ok((StatusCode::CREATED, Json(payload)).into_response())
}

async fn read_submission(mut multipart: Multipart) -> Result<Submission, ApiError> {
    let mut submission = Submission::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("jobId") => submission.job_id = Some(field.text().await?),
            Some("coverLetter") => submission.cover_letter = Some(field.text().await?),
            Some("resume") => {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await?;
                // Browsers send an empty, unnamed part when no file is chosen.
                if let Some(file_name) = file_name.filter(|name| !name.is_empty()) {
                    submission.resume = Some(ResumeUpload {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(submission)
}

pub(crate) async fn my_applications_handler(
    State(applications): State<Arc<ApplicationService>>,
    CurrentUser(actor): CurrentUser,
    origin: PublicOrigin,
) -> Result<Response, ApiError> {
    let details = applications.mine(&actor)?;
    let payload = json!({
        "applications": ApplicationView::list(details, &origin, Populate::Job),
    });
    Ok(Json(payload).into_response())
}

pub(crate) async fn job_applications_handler(
    State(applications): State<Arc<ApplicationService>>,
    CurrentUser(actor): CurrentUser,
    origin: PublicOrigin,
    Path(job_id): Path<String>,
) -> Result<Response, ApiError> {
    let received = applications.for_job(&actor, &JobId(job_id))?;
    let payload = json!({
        "job": received.job_title,
        "applications": ApplicationView::list(received.applications, &origin, Populate::Applicant),
    });
    Ok(Json(payload).into_response())
}

pub(crate) async fn status_handler(
    State(applications): State<Arc<ApplicationService>>,
    CurrentUser(actor): CurrentUser,
    origin: PublicOrigin,
    Path(application_id): Path<String>,
    payload: Result<Json<StatusChange>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(change) = payload?;
    let details = applications.set_status(
        &actor,
        &ApplicationId(application_id),
        change.label(),
    )?;
    let payload = json!({
        "message": "Application status updated",
        "application": ApplicationView::build(details, &origin, Populate::Both),
    });
    Ok(Json(payload).into_response())
}

pub(crate) async fn resume_download_handler(
    State(applications): State<Arc<ApplicationService>>,
    CurrentUser(actor): CurrentUser,
    Path(application_id): Path<String>,
) -> Result<Response, ApiError> {
    let application_id = ApplicationId(application_id);
    let file = run_blocking(move || applications.resume(&actor, &application_id)).await?;
    Ok(file_response(file, true))
}

pub(crate) async fn stored_file_handler(
    State(applications): State<Arc<ApplicationService>>,
    CurrentUser(actor): CurrentUser,
    Path(path): Path<String>,
) -> Result<Response, ApiError> {
    let key = ResumeKey(format!("{UPLOAD_PREFIX}/{path}"));
    let file = run_blocking(move || applications.stored_resume(&actor, &key)).await?;
    Ok(file_response(file, false))
}

fn file_response(file: ResumeFile, attachment: bool) -> Response {
    let content_type = mime_guess::from_path(&file.file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    let disposition = if attachment {
        format!("attachment; filename=\"{}\"", file.file_name)
    } else {
        format!("inline; filename=\"{}\"", file.file_name)
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
        .into_response()
}
