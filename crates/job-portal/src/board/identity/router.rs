use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use super::domain::{Credentials, Registration};
use super::service::AccountService;
use crate::http::{run_blocking, ApiError, CurrentUser, PortalState};

/// Sign-up, sign-in and "who am I".
pub fn auth_router(state: PortalState) -> Router {
    Router::new()
        .route("/api/auth/register", post(register_handler))
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/me", get(me_handler))
        .with_state(state)
}

pub(crate) async fn register_handler(
    State(accounts): State<Arc<AccountService>>,
    payload: Result<Json<Registration>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(registration) = payload?;
    let session = run_blocking(move || accounts.register(registration)).await?;
    Ok((StatusCode::CREATED, Json(session)).into_response())
}

pub(crate) async fn login_handler(
    State(accounts): State<Arc<AccountService>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(credentials) = payload?;
    let session = run_blocking(move || accounts.login(credentials)).await?;
    Ok(Json(session).into_response())
}

pub(crate) async fn me_handler(
    State(accounts): State<Arc<AccountService>>,
    CurrentUser(actor): CurrentUser,
) -> Result<Response, ApiError> {
    let profile = accounts.profile(&actor)?;
    Ok(Json(json!({ "user": profile })).into_response())
}
