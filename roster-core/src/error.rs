//! Core error types

use roster_client::ClientError;
use shared::types::EntityId;
use thiserror::Error;

use crate::validation::FieldErrors;

/// Client storage failures
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Form submission and editing failures
#[derive(Debug, Error)]
pub enum FormError {
    /// One or more fields failed validation; nothing was sent
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// The backend call failed; the form keeps its values
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Entity not found: {0}")]
    NotFound(EntityId),

    #[error("Unknown field: {0}")]
    UnknownField(String),
}

/// Desktop build download failures
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
