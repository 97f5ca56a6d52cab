//! `bcrypt` implementation of the password hashing port.
//!
//! Hashing is CPU-bound, so both operations run on the blocking pool.

use crate::identity::{
    domain::{Password, PasswordHash},
    ports::{PasswordHashError, PasswordHasher},
};
use async_trait::async_trait;

/// Password hasher backed by `bcrypt`.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Creates a hasher with an explicit work factor.
    #[must_use]
    pub const fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError> {
        let plaintext = password.expose().to_owned();
        let cost = self.cost;
        let encoded = tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost))
            .await
            .map_err(PasswordHashError::wrap)?
            .map_err(PasswordHashError::wrap)?;
        Ok(PasswordHash::new(encoded))
    }

    async fn verify(
        &self,
        candidate: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let plaintext = candidate.to_owned();
        let encoded = hash.as_str().to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &encoded))
            .await
            .map_err(PasswordHashError::wrap)?
            .map_err(PasswordHashError::wrap)
    }
}
