use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Too many requests: {0}")]
    TooManyRequests(String, Option<u64>),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(anyhow::Error::new(err))
    }
}

impl AppError {
    /// Stable machine-readable kind, paired with a human message in the body.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) | AppError::InvalidArgument(_) => "invalid-argument",
            AppError::Unauthenticated(_) => "unauthenticated",
            AppError::PermissionDenied(_) => "permission-denied",
            AppError::TooManyRequests(..) => "too-many-requests",
            AppError::Internal(_) => "internal",
            AppError::ConfigError(_) => "config",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorBody {
            error: &'static str,
            message: String,
        }

        let kind = self.kind();
        let (status, message, retry_after) = match self {
            AppError::ValidationError(err) => {
                (StatusCode::BAD_REQUEST, format!("Validation error: {}", err), None)
            }
            AppError::InvalidArgument(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::Unauthenticated(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            AppError::PermissionDenied(msg) => (StatusCode::FORBIDDEN, msg, None),
            AppError::TooManyRequests(msg, retry) => (StatusCode::TOO_MANY_REQUESTS, msg, retry),
            // The underlying message is surfaced as-is so upstream failures
            // reach the caller unmodified.
            AppError::Internal(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string(), None),
            AppError::ConfigError(err) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string(), None)
            }
        };

        let mut res = (status, Json(ErrorBody { error: kind, message })).into_response();

        if let Some(retry) = retry_after {
            res.headers_mut()
                .insert(axum::http::header::RETRY_AFTER, retry.into());
        }

        res
    }
}
