//! Identity aggregate root and validated account attributes.

use super::{IdentityDomainError, IdentityId};
use crate::validation::{FieldErrors, is_valid_email};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use std::fmt;

/// Maximum character count for usernames and personal names.
pub const MAX_NAME_LENGTH: usize = 150;

/// Unique login handle made of letters, digits, and `@.+-_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Creates a validated username from trimmed input.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError`] when the value is blank, too long, or
    /// contains characters outside the allowed set.
    pub fn new(value: impl AsRef<str>) -> Result<Self, IdentityDomainError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(IdentityDomainError::BlankUsername);
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(IdentityDomainError::UsernameTooLong {
                max: MAX_NAME_LENGTH,
            });
        }
        if !trimmed.chars().all(is_username_char) {
            return Err(IdentityDomainError::InvalidUsername);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the username as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_username_char(character: char) -> bool {
    character.is_alphanumeric() || matches!(character, '@' | '.' | '+' | '-' | '_')
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A plaintext password accepted for hashing.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Accepts any non-blank password. Surrounding whitespace is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::BlankPassword`] for empty or
    /// whitespace-only input.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(IdentityDomainError::BlankPassword);
        }
        Ok(Self(raw))
    }

    /// Exposes the plaintext for hashing or verification.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Stored password hash in modular crypt format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wraps an encoded hash produced by a password hasher.
    #[must_use]
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Returns the encoded hash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Unvalidated account attributes as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityDraft {
    /// Requested username.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email, possibly empty.
    pub email: String,
    /// Staff flag.
    pub is_staff: bool,
    /// Active flag.
    pub is_active: bool,
}

/// Validated account attributes shared by creation and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityProfile {
    username: Username,
    first_name: String,
    last_name: String,
    email: String,
    is_staff: bool,
    is_active: bool,
}

impl IdentityProfile {
    /// Validates every field and reports all failures together.
    ///
    /// # Errors
    ///
    /// Returns [`FieldErrors`] keyed by request field name.
    pub fn parse(fields: IdentityDraft) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let parsed_username = match Username::new(&fields.username) {
            Ok(username) => Some(username),
            Err(err) => {
                errors.add(err.field(), err.to_string());
                None
            }
        };
        let first_name = check_name("first_name", &fields.first_name, &mut errors);
        let last_name = check_name("last_name", &fields.last_name, &mut errors);

        let email = fields.email.trim().to_owned();
        if !email.is_empty() && !is_valid_email(&email) {
            let err = IdentityDomainError::InvalidEmail;
            errors.add(err.field(), err.to_string());
        }

        errors.into_result()?;
        let Some(username) = parsed_username else {
            return Err(FieldErrors::single(
                "username",
                IdentityDomainError::BlankUsername.to_string(),
            ));
        };

        Ok(Self {
            username,
            first_name,
            last_name,
            email,
            is_staff: fields.is_staff,
            is_active: fields.is_active,
        })
    }

    /// Returns the username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the given name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the family name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Returns the email address, possibly empty.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns whether the account has staff rights.
    #[must_use]
    pub const fn is_staff(&self) -> bool {
        self.is_staff
    }

    /// Returns whether the account may authenticate.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }
}

fn check_name(field: &'static str, value: &str, errors: &mut FieldErrors) -> String {
    let trimmed = value.trim();
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        let err = IdentityDomainError::NameTooLong {
            field,
            max: MAX_NAME_LENGTH,
        };
        errors.add(err.field(), err.to_string());
    }
    trimmed.to_owned()
}

/// An account awaiting its store-assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIdentity {
    profile: IdentityProfile,
    password_hash: Option<PasswordHash>,
    date_joined: DateTime<Utc>,
}

impl NewIdentity {
    /// Creates a draft joined at the current clock time.
    #[must_use]
    pub fn new(
        profile: IdentityProfile,
        password_hash: Option<PasswordHash>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            profile,
            password_hash,
            date_joined: clock.utc(),
        }
    }

    /// Returns the validated profile.
    #[must_use]
    pub const fn profile(&self) -> &IdentityProfile {
        &self.profile
    }

    /// Returns the password hash, if any.
    #[must_use]
    pub const fn password_hash(&self) -> Option<&PasswordHash> {
        self.password_hash.as_ref()
    }

    /// Returns the join timestamp.
    #[must_use]
    pub const fn date_joined(&self) -> DateTime<Utc> {
        self.date_joined
    }

    /// Attaches the store-assigned identifier.
    #[must_use]
    pub fn into_identity(self, id: IdentityId) -> Identity {
        Identity {
            id,
            profile: self.profile,
            password_hash: self.password_hash,
            date_joined: self.date_joined,
        }
    }
}

/// User account aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    id: IdentityId,
    profile: IdentityProfile,
    password_hash: Option<PasswordHash>,
    date_joined: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedIdentityData {
    /// Persisted identifier.
    pub id: IdentityId,
    /// Persisted username.
    pub username: Username,
    /// Persisted given name.
    pub first_name: String,
    /// Persisted family name.
    pub last_name: String,
    /// Persisted email address.
    pub email: String,
    /// Persisted staff flag.
    pub is_staff: bool,
    /// Persisted active flag.
    pub is_active: bool,
    /// Persisted password hash, if any.
    pub password_hash: Option<PasswordHash>,
    /// Persisted join timestamp.
    pub date_joined: DateTime<Utc>,
}

impl Identity {
    /// Reconstructs an identity from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedIdentityData) -> Self {
        Self {
            id: data.id,
            profile: IdentityProfile {
                username: data.username,
                first_name: data.first_name,
                last_name: data.last_name,
                email: data.email,
                is_staff: data.is_staff,
                is_active: data.is_active,
            },
            password_hash: data.password_hash,
            date_joined: data.date_joined,
        }
    }

    /// Returns the identity identifier.
    #[must_use]
    pub const fn id(&self) -> IdentityId {
        self.id
    }

    /// Returns the validated profile.
    #[must_use]
    pub const fn profile(&self) -> &IdentityProfile {
        &self.profile
    }

    /// Returns the username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.profile.username
    }

    /// Returns the given name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.profile.first_name
    }

    /// Returns the family name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.profile.last_name
    }

    /// Returns the email address, possibly empty.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.profile.email
    }

    /// Returns whether the account has staff rights.
    #[must_use]
    pub const fn is_staff(&self) -> bool {
        self.profile.is_staff
    }

    /// Returns whether the account may authenticate.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.profile.is_active
    }

    /// Returns the stored password hash, if any.
    #[must_use]
    pub const fn password_hash(&self) -> Option<&PasswordHash> {
        self.password_hash.as_ref()
    }

    /// Returns the join timestamp.
    #[must_use]
    pub const fn date_joined(&self) -> DateTime<Utc> {
        self.date_joined
    }

    /// Replaces the editable profile attributes.
    pub fn apply_profile(&mut self, profile: IdentityProfile) {
        self.profile = profile;
    }

    /// Replaces the stored password hash.
    pub fn set_password_hash(&mut self, hash: PasswordHash) {
        self.password_hash = Some(hash);
    }

    /// Grants staff rights and reactivates the account.
    pub const fn promote_to_staff(&mut self) {
        self.profile.is_staff = true;
        self.profile.is_active = true;
    }
}
