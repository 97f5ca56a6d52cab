//! Port for one-way password hashing.

use crate::identity::domain::{Password, PasswordHash};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Hashes and verifies account passwords.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Produces a salted hash of `password`.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError`] when hashing fails.
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError>;

    /// Returns `true` when `candidate` matches `hash`.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError`] when the stored hash is malformed.
    async fn verify(&self, candidate: &str, hash: &PasswordHash)
    -> Result<bool, PasswordHashError>;
}

/// Password hashing failure.
#[derive(Debug, Clone, Error)]
#[error("password hashing failed: {0}")]
pub struct PasswordHashError(pub Arc<dyn std::error::Error + Send + Sync>);

impl PasswordHashError {
    /// Wraps an underlying hashing error.
    pub fn wrap(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}
