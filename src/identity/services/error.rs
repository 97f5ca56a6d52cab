//! Error type shared by identity services.

use crate::identity::domain::IdentityId;
use crate::identity::ports::{IdentityRepositoryError, PasswordHashError};
use crate::task::ports::TaskRepositoryError;
use crate::validation::FieldErrors;
use thiserror::Error;

/// Message reported when a username is already taken.
pub const DUPLICATE_USERNAME_MESSAGE: &str = "A user with that username already exists.";

/// Service-level errors for identity operations.
#[derive(Debug, Error)]
pub enum IdentityServiceError {
    /// One or more request fields are invalid.
    #[error(transparent)]
    Validation(FieldErrors),
    /// The request collides with existing state.
    #[error("conflict: {0}")]
    Conflict(FieldErrors),
    /// The caller lacks staff rights.
    #[error("staff rights required")]
    Forbidden,
    /// The identity does not exist.
    #[error("identity not found: {0}")]
    NotFound(IdentityId),
    /// Password hashing failed.
    #[error(transparent)]
    Hashing(#[from] PasswordHashError),
    /// Identity repository operation failed.
    #[error(transparent)]
    Repository(IdentityRepositoryError),
    /// Task repository operation failed during a cascade.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
}

impl From<IdentityRepositoryError> for IdentityServiceError {
    fn from(err: IdentityRepositoryError) -> Self {
        match err {
            IdentityRepositoryError::DuplicateUsername(_) => {
                Self::Conflict(FieldErrors::single("username", DUPLICATE_USERNAME_MESSAGE))
            }
            IdentityRepositoryError::NotFound(id) => Self::NotFound(id),
            other @ IdentityRepositoryError::Persistence(_) => Self::Repository(other),
        }
    }
}

/// Result type for identity service operations.
pub type IdentityServiceResult<T> = Result<T, IdentityServiceError>;
