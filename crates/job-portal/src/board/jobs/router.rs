use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::json;

use super::domain::{JobChanges, JobDraft, JobId};
use super::service::JobService;
use super::views::{EmployerJobView, PostedJobView};
use crate::board::applications::{ApplicationView, Populate, PublicOrigin};
use crate::http::{ApiError, CurrentUser, PortalState};

/// Router for postings: public listing plus employer CRUD.
pub fn job_router(state: PortalState) -> Router {
    Router::new()
        .route("/api/jobs", get(list_handler))
        .route("/api/jobs/public", get(list_handler))
        .route("/api/jobs/mine", get(employer_board_handler))
        .route("/api/jobs/create", post(create_handler))
        .route("/api/jobs/:id", put(update_handler).delete(delete_handler))
        .with_state(state)
}

pub(crate) async fn list_handler(
    State(jobs): State<Arc<JobService>>,
) -> Result<Response, ApiError> {
    let listings: Vec<PostedJobView> = jobs
        .public_listings()?
        .into_iter()
        .map(PostedJobView::from)
        .collect();
    Ok(Json(listings).into_response())
}

pub(crate) async fn employer_board_handler(
    State(jobs): State<Arc<JobService>>,
    CurrentUser(actor): CurrentUser,
    origin: PublicOrigin,
) -> Result<Response, ApiError> {
    let board: Vec<EmployerJobView> = jobs
        .employer_board(&actor)?
        .into_iter()
        .map(|entry| {
            let applications =
                ApplicationView::list(entry.applications, &origin, Populate::Applicant);
            EmployerJobView::new(entry.listing, applications)
        })
        .collect();
    Ok(Json(board).into_response())
}

pub(crate) async fn create_handler(
    State(jobs): State<Arc<JobService>>,
    CurrentUser(actor): CurrentUser,
    payload: Result<Json<JobDraft>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(draft) = payload?;
    let listing = jobs.create(&actor, draft)?;
    let payload = json!({
        "message": "Job created successfully",
        "job": PostedJobView::from(listing),
    });
    Ok((StatusCode::CREATED, Json(payload)).into_response())
}

pub(crate) async fn update_handler(
    State(jobs): State<Arc<JobService>>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<String>,
    payload: Result<Json<JobChanges>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(changes) = payload?;
    let listing = jobs.update(&actor, &JobId(id), changes)?;
    let payload = json!({
        "message": "Job updated successfully",
        "job": PostedJobView::from(listing),
    });
    Ok(Json(payload).into_response())
}

pub(crate) async fn delete_handler(
    State(jobs): State<Arc<JobService>>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    jobs.delete(&actor, &JobId(id))?;
    Ok(Json(json!({ "message": "Job deleted successfully" })).into_response())
}
