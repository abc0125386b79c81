use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::auth::errors::AuthError;
use service::tasks::errors::TaskError;
use thiserror::Error;
use tracing::error;

pub const BASIC_CHALLENGE: &str = "Basic realm=\"accounts\"";

/// Errors surfaced to HTTP clients. Bodies are opaque on purpose; the
/// underlying reason is only logged.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("registration failed")]
    RegistrationFailed,
    #[error("invalid credentials")]
    Unauthorized,
    #[error("not found")]
    NotFound,
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::RegistrationFailed => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::RegistrationFailed => ApiError::RegistrationFailed,
            AuthError::AuthenticationFailed => ApiError::Unauthorized,
            other => {
                error!(code = other.code(), error = %other, "auth service failure");
                ApiError::Internal
            }
        }
    }
}

impl From<TaskError> for ApiError {
    fn from(e: TaskError) -> Self {
        match e {
            // the caller is authenticated, so a vanished owner reads as a missing resource
            TaskError::TaskNotFound | TaskError::UserNotFound => ApiError::NotFound,
            TaskError::Internal(_) => {
                error!(code = e.code(), error = %e, "task service failure");
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(serde_json::json!({"error": self.to_string()}));
        match self {
            ApiError::Unauthorized => {
                (status, [(header::WWW_AUTHENTICATE, BASIC_CHALLENGE)], body).into_response()
            }
            _ => (status, body).into_response(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
