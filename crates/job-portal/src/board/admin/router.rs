use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde_json::json;

use super::service::AdminService;
use crate::board::applications::{ApplicationView, Populate, PublicOrigin};
use crate::board::identity::UserId;
use crate::board::jobs::{AdminJobView, JobId};
use crate::http::{ApiError, CurrentUser, PortalState};

/// Admin console endpoints.
pub fn admin_router(state: PortalState) -> Router {
    Router::new()
        .route("/api/admin/users", get(users_handler))
        .route("/api/admin/users/:id", delete(remove_user_handler))
        .route("/api/admin/jobs", get(jobs_handler))
        .route("/api/admin/jobs/:id/applicants", get(applicants_handler))
        .with_state(state)
}

pub(crate) async fn users_handler(
    State(admin): State<Arc<AdminService>>,
    CurrentUser(actor): CurrentUser,
) -> Result<Response, ApiError> {
    let users = admin.users(&actor)?;
    Ok(Json(json!({ "users": users })).into_response())
}

pub(crate) async fn remove_user_handler(
    State(admin): State<Arc<AdminService>>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let removed = admin.remove_user(&actor, &UserId(id))?;
    let message = format!("User {} ({}) has been removed.", removed.name, removed.role);
    Ok(Json(json!({ "message": message })).into_response())
}

pub(crate) async fn jobs_handler(
    State(admin): State<Arc<AdminService>>,
    CurrentUser(actor): CurrentUser,
) -> Result<Response, ApiError> {
    let jobs: Vec<AdminJobView> = admin
        .jobs(&actor)?
        .into_iter()
        .map(|row| AdminJobView::new(row.listing, row.applicant_count))
        .collect();
    Ok(Json(json!({ "jobs": jobs })).into_response())
}

pub(crate) async fn applicants_handler(
    State(admin): State<Arc<AdminService>>,
    CurrentUser(actor): CurrentUser,
    origin: PublicOrigin,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let details = admin.applicants(&actor, &JobId(id))?;
    let payload = json!({
        "applications": ApplicationView::list(details, &origin, Populate::Both),
    });
    Ok(Json(payload).into_response())
}
