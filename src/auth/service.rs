//! Credential exchange and bearer token resolution.

use super::{AuthError, IssuedToken, TokenCodec, TokenKind};
use crate::identity::{
    domain::{Caller, Identity, IdentityId, Username},
    ports::{IdentityRepository, PasswordHasher},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info};

/// An access token together with its refresh token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access: IssuedToken,
    /// Longer-lived refresh token.
    pub refresh: IssuedToken,
}

/// Issues tokens for valid credentials and resolves tokens into callers.
pub struct AuthService<R, H, C>
where
    R: IdentityRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    C: Clock + Send + Sync,
{
    identities: Arc<R>,
    hasher: Arc<H>,
    codec: Arc<TokenCodec>,
    clock: Arc<C>,
}

impl<R, H, C> Clone for AuthService<R, H, C>
where
    R: IdentityRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            identities: Arc::clone(&self.identities),
            hasher: Arc::clone(&self.hasher),
            codec: Arc::clone(&self.codec),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, H, C> AuthService<R, H, C>
where
    R: IdentityRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new authentication service.
    #[must_use]
    pub const fn new(
        identities: Arc<R>,
        hasher: Arc<H>,
        codec: Arc<TokenCodec>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            identities,
            hasher,
            codec,
            clock,
        }
    }

    /// Exchanges a username and password for an access/refresh pair.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] unless the username names an
    /// active account whose stored hash matches `password`.
    pub async fn obtain_pair(
        &self,
        username: &str,
        password: &str,
    ) -> Result<TokenPair, AuthError> {
        let lookup = Username::new(username).map_err(|_| AuthError::InvalidCredentials)?;
        let identity = self
            .identities
            .find_by_username(&lookup)
            .await?
            .filter(Identity::is_active)
            .ok_or(AuthError::InvalidCredentials)?;
        let hash = identity
            .password_hash()
            .ok_or(AuthError::InvalidCredentials)?;
        if !self.hasher.verify(password, hash).await? {
            debug!(username = %lookup, "password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let now = self.clock.utc();
        let pair = TokenPair {
            access: self.codec.issue(TokenKind::Access, identity.id(), now)?,
            refresh: self.codec.issue(TokenKind::Refresh, identity.id(), now)?,
        };
        info!(identity_id = %identity.id(), "token pair issued");
        Ok(pair)
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] when the refresh token is invalid
    /// or its account is gone or inactive.
    pub async fn refresh(&self, refresh_token: &str) -> Result<IssuedToken, AuthError> {
        let claims = self.codec.verify(refresh_token, TokenKind::Refresh)?;
        let identity = self.active_identity(claims.subject()).await?;
        self.codec
            .issue(TokenKind::Access, identity.id(), self.clock.utc())
    }

    /// Resolves an access token into the caller it was issued to.
    ///
    /// The account is reloaded so staff and active flag changes apply
    /// immediately.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] when the token is invalid or its
    /// account is gone or inactive.
    pub async fn authenticate(&self, access_token: &str) -> Result<Caller, AuthError> {
        let claims = self.codec.verify(access_token, TokenKind::Access)?;
        let identity = self.active_identity(claims.subject()).await?;
        Ok(Caller::from(&identity))
    }

    async fn active_identity(&self, id: IdentityId) -> Result<Identity, AuthError> {
        self.identities
            .find_by_id(id)
            .await?
            .filter(Identity::is_active)
            .ok_or(AuthError::InvalidToken)
    }
}
