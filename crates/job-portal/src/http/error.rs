use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

use crate::board::access::AccessError;
use crate::board::admin::AdminServiceError;
use crate::board::applications::ApplicationServiceError;
use crate::board::identity::AccountServiceError;
use crate::board::jobs::JobServiceError;

pub(crate) const NO_TOKEN: &str = "Not authorized, no token";
pub(crate) const TOKEN_FAILED: &str = "Not authorized, token failed";

/// Failure returned by a handler, rendered as `{"message": ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    Validation(String),
    Unauthenticated(&'static str),
    Forbidden(String),
    NotFound(String),
    /// Logged in full; clients only see a generic message.
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn internal(err: impl std::fmt::Display) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Validation(message)
            | ApiError::Forbidden(message)
            | ApiError::NotFound(message) => message,
            ApiError::Unauthenticated(message) => message.to_string(),
            ApiError::Internal(detail) => {
                error!(error = %detail, "request failed");
                "Server error".to_string()
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl From<AccessError> for ApiError {
    fn from(value: AccessError) -> Self {
        ApiError::Forbidden(value.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        ApiError::Validation(value.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(value: MultipartRejection) -> Self {
        warn!(error = %value, "request is not multipart");
        ApiError::Validation(value.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(value: MultipartError) -> Self {
        warn!(error = %value, "multipart body rejected");
        ApiError::Validation(value.body_text())
    }
}

impl From<AccountServiceError> for ApiError {
    fn from(value: AccountServiceError) -> Self {
        match value {
            AccountServiceError::MissingFields
            | AccountServiceError::InvalidRole
            | AccountServiceError::EmailTaken
            | AccountServiceError::InvalidCredentials => ApiError::Validation(value.to_string()),
            AccountServiceError::Rejected(_) | AccountServiceError::UnknownAccount => {
                ApiError::Unauthenticated(TOKEN_FAILED)
            }
            AccountServiceError::Token(_)
            | AccountServiceError::Password(_)
            | AccountServiceError::Repository(_) => ApiError::internal(value),
        }
    }
}

impl From<JobServiceError> for ApiError {
    fn from(value: JobServiceError) -> Self {
        match value {
            JobServiceError::Access(err) => err.into(),
            JobServiceError::NotFound => ApiError::NotFound(value.to_string()),
            JobServiceError::MissingFields | JobServiceError::BlankField(_) => {
                ApiError::Validation(value.to_string())
            }
            JobServiceError::Repository(_) => ApiError::internal(value),
        }
    }
}

impl From<ApplicationServiceError> for ApiError {
    fn from(value: ApplicationServiceError) -> Self {
        match value {
            ApplicationServiceError::Access(err) => err.into(),
            ApplicationServiceError::JobNotFound
            | ApplicationServiceError::ApplicationNotFound
            | ApplicationServiceError::ResumeMissing => ApiError::NotFound(value.to_string()),
            ApplicationServiceError::AlreadyApplied | ApplicationServiceError::InvalidStatus => {
                ApiError::Validation(value.to_string())
            }
            ApplicationServiceError::Resume(_) | ApplicationServiceError::Repository(_) => {
                ApiError::internal(value)
            }
        }
    }
}

impl From<AdminServiceError> for ApiError {
    fn from(value: AdminServiceError) -> Self {
        match value {
            AdminServiceError::Access(err) => err.into(),
            AdminServiceError::UserNotFound => ApiError::NotFound(value.to_string()),
            AdminServiceError::Repository(_) => ApiError::internal(value),
        }
    }
}
