//! Error type for credential issuance and verification.

use super::TokenKind;
use crate::identity::ports::{IdentityRepositoryError, PasswordHashError};
use thiserror::Error;

/// Errors returned by the authentication service.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown username, wrong password, inactive account, or an account
    /// without a password.
    #[error("No active account found with the given credentials")]
    InvalidCredentials,
    /// The token is malformed, expired, badly signed, of the wrong kind, or
    /// refers to an account that no longer exists or is inactive.
    #[error("Given token not valid for any token type")]
    InvalidToken,
    /// The configured lifetime pushes the expiry past the representable
    /// range.
    #[error("{kind:?} token expiry is out of range")]
    ExpiryOutOfRange {
        /// Kind of token being issued.
        kind: TokenKind,
    },
    /// Token encoding failed.
    #[error("token encoding failed: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
    /// Password verification failed to run.
    #[error(transparent)]
    Hashing(#[from] PasswordHashError),
    /// Identity lookup failed.
    #[error(transparent)]
    Repository(#[from] IdentityRepositoryError),
}

impl AuthError {
    /// Returns `true` for failures caused by the presented credentials
    /// rather than by the server.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::InvalidCredentials | Self::InvalidToken)
    }
}
