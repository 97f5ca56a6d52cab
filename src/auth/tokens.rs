//! HS256 bearer tokens.
//!
//! Access and refresh tokens share one signing key and are told apart by the
//! `token_type` claim.

use super::AuthError;
use crate::identity::domain::IdentityId;
use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Default access token lifetime.
pub const DEFAULT_ACCESS_LIFETIME: TimeDelta = TimeDelta::minutes(30);
/// Default refresh token lifetime.
pub const DEFAULT_REFRESH_LIFETIME: TimeDelta = TimeDelta::days(1);

/// Distinguishes short-lived access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Presented on every authenticated request.
    Access,
    /// Exchanged for a new access token.
    Refresh,
}

/// Claims carried by every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Identifier of the authenticated identity.
    pub user_id: i64,
    /// Token kind.
    pub token_type: TokenKind,
    /// Expiry as a Unix timestamp.
    pub exp: i64,
    /// Issue time as a Unix timestamp.
    pub iat: i64,
    /// Unique token identifier.
    pub jti: String,
}

impl Claims {
    /// Returns the identity the token was issued to.
    #[must_use]
    pub const fn subject(&self) -> IdentityId {
        IdentityId::new(self.user_id)
    }
}

/// An encoded token with its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Encoded JWT.
    pub token: String,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
}

/// Signing secret and lifetimes for issued tokens.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenSettings {
    /// HMAC signing secret.
    pub secret: String,
    /// Access token lifetime.
    pub access_lifetime: TimeDelta,
    /// Refresh token lifetime.
    pub refresh_lifetime: TimeDelta,
}

impl TokenSettings {
    /// Creates settings with the default lifetimes.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_lifetime: DEFAULT_ACCESS_LIFETIME,
            refresh_lifetime: DEFAULT_REFRESH_LIFETIME,
        }
    }
}

impl fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &"<redacted>")
            .field("access_lifetime", &self.access_lifetime)
            .field("refresh_lifetime", &self.refresh_lifetime)
            .finish()
    }
}

/// Encodes and verifies HS256 tokens.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    access_lifetime: TimeDelta,
    refresh_lifetime: TimeDelta,
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("access_lifetime", &self.access_lifetime)
            .field("refresh_lifetime", &self.refresh_lifetime)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Creates a codec from settings.
    #[must_use]
    pub fn new(settings: &TokenSettings) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(settings.secret.as_bytes()),
            decoding: DecodingKey::from_secret(settings.secret.as_bytes()),
            validation,
            access_lifetime: settings.access_lifetime,
            refresh_lifetime: settings.refresh_lifetime,
        }
    }

    /// Issues a token of `kind` for `subject`, valid from `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::ExpiryOutOfRange`] when the expiry cannot be
    /// represented and [`AuthError::Encoding`] when signing fails.
    pub fn issue(
        &self,
        kind: TokenKind,
        subject: IdentityId,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthError> {
        let lifetime = match kind {
            TokenKind::Access => self.access_lifetime,
            TokenKind::Refresh => self.refresh_lifetime,
        };
        let expires_at = now
            .checked_add_signed(lifetime)
            .ok_or(AuthError::ExpiryOutOfRange { kind })?;
        let claims = Claims {
            user_id: subject.value(),
            token_type: kind,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().simple().to_string(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok(IssuedToken { token, expires_at })
    }

    /// Verifies signature, expiry, and kind, returning the claims.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] for any verification failure.
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|_| AuthError::InvalidToken)?;
        if data.claims.token_type != expected {
            return Err(AuthError::InvalidToken);
        }
        Ok(data.claims)
    }
}
