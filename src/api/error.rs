use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{error, warn};
use thiserror::Error;

use super::envelope::Envelope;
use crate::services::auth::AuthError;

/// Failure of a request, rendered as an error envelope.
///
/// This is the only place request failures get logged.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    MethodNotAllowed(String),

    #[error("{message}")]
    Internal {
        message: String,
        cause: anyhow::Error,
    },
}

impl ApiError {
    pub fn internal(message: impl Into<String>, cause: anyhow::Error) -> Self {
        ApiError::Internal {
            message: message.into(),
            cause,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidInput(_) => ApiError::BadRequest(err.to_string()),
            AuthError::EmailTaken => ApiError::Conflict(err.to_string()),
            AuthError::InvalidCredentials | AuthError::MissingToken | AuthError::InvalidToken => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::Store(cause) => ApiError::internal("Error de autenticación", cause),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body: Envelope<()> = match self {
            ApiError::Internal { message, cause } => {
                let detail = format!("{cause:#}");
                error!("{message}: {detail}");
                Envelope::failure(message, Some(detail))
            }
            other => {
                warn!("Rejected request ({status}): {other}");
                Envelope::failure(other.to_string(), None)
            }
        };

        (status, body).into_response()
    }
}
