//! Repository port for identity persistence and lookup.

use crate::identity::domain::{Identity, IdentityId, NewIdentity, Username};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for identity repository operations.
pub type IdentityRepositoryResult<T> = Result<T, IdentityRepositoryError>;

/// Identity persistence contract.
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Stores a new identity and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityRepositoryError::DuplicateUsername`] when the
    /// username is already taken.
    async fn create(&self, identity: &NewIdentity) -> IdentityRepositoryResult<Identity>;

    /// Finds an identity by identifier.
    ///
    /// Returns `None` when the identity does not exist.
    async fn find_by_id(&self, id: IdentityId) -> IdentityRepositoryResult<Option<Identity>>;

    /// Finds an identity by username.
    ///
    /// Returns `None` when no identity uses the username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> IdentityRepositoryResult<Option<Identity>>;

    /// Returns all identities ordered by identifier.
    async fn list(&self) -> IdentityRepositoryResult<Vec<Identity>>;

    /// Persists changes to an existing identity.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityRepositoryError::NotFound`] when the identity does
    /// not exist or [`IdentityRepositoryError::DuplicateUsername`] when the
    /// new username collides with another account.
    async fn update(&self, identity: &Identity) -> IdentityRepositoryResult<()>;

    /// Removes an identity.
    ///
    /// Returns `false` when no identity had the identifier.
    async fn delete(&self, id: IdentityId) -> IdentityRepositoryResult<bool>;
}

/// Errors returned by identity repository implementations.
#[derive(Debug, Clone, Error)]
pub enum IdentityRepositoryError {
    /// Another identity already uses the username.
    #[error("duplicate username: {0}")]
    DuplicateUsername(Username),

    /// The identity was not found.
    #[error("identity not found: {0}")]
    NotFound(IdentityId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
