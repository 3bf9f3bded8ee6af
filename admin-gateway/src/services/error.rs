use service_core::error::AppError;
use thiserror::Error;

use super::DirectoryError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    PermissionDenied(String),

    #[error("Email is required.")]
    EmailRequired,

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::PermissionDenied(msg) => AppError::PermissionDenied(msg),
            ServiceError::EmailRequired => {
                AppError::InvalidArgument("Email is required.".to_string())
            }
            // Directory failures surface as internal errors with the
            // underlying message intact.
            ServiceError::Directory(e) => AppError::Internal(anyhow::Error::new(e)),
        }
    }
}
