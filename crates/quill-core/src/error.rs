//! Domain-level error types.

use thiserror::Error;

use crate::domain::PostId;
use crate::ports::UploadError;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Post not found: {0}")]
    PostNotFound(PostId),

    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] RepoError),

    #[error(transparent)]
    Upload(#[from] UploadError),
}

/// Store-level errors.
///
/// Reads and writes are kept apart so callers can tell a failed listing
/// from a failed mutation.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Store read failed: {0}")]
    Read(String),

    #[error("Store write failed: {0}")]
    Write(String),
}
