//! Self-service account registration behind a consent gate.

use super::{DUPLICATE_USERNAME_MESSAGE, IdentityServiceError, IdentityServiceResult};
use crate::identity::{
    domain::{Identity, IdentityDraft, IdentityProfile, NewIdentity, Password},
    ports::{IdentityRepository, PasswordHasher},
};
use crate::validation::FieldErrors;
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

/// Message reported when the privacy policy was not accepted.
pub const CONSENT_REQUIRED_MESSAGE: &str = "You must accept the privacy policy.";

/// Unvalidated registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationRequest {
    /// Requested username.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email, possibly empty.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Whether the privacy policy was accepted.
    pub consent_given: bool,
}

/// Creates non-staff identities from registration forms.
pub struct RegistrationService<R, H, C>
where
    R: IdentityRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    C: Clock + Send + Sync,
{
    identities: Arc<R>,
    hasher: Arc<H>,
    clock: Arc<C>,
}

impl<R, H, C> Clone for RegistrationService<R, H, C>
where
    R: IdentityRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            identities: Arc::clone(&self.identities),
            hasher: Arc::clone(&self.hasher),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, H, C> RegistrationService<R, H, C>
where
    R: IdentityRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new registration service.
    #[must_use]
    pub const fn new(identities: Arc<R>, hasher: Arc<H>, clock: Arc<C>) -> Self {
        Self {
            identities,
            hasher,
            clock,
        }
    }

    /// Registers a new active, non-staff identity.
    ///
    /// Consent is checked before anything else; all other field errors are
    /// reported together.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Validation`] for a missing consent or
    /// invalid fields and [`IdentityServiceError::Conflict`] when the
    /// username is taken.
    pub async fn register(&self, request: RegistrationRequest) -> IdentityServiceResult<Identity> {
        if !request.consent_given {
            return Err(IdentityServiceError::Validation(FieldErrors::single(
                "consent_given",
                CONSENT_REQUIRED_MESSAGE,
            )));
        }

        let RegistrationRequest {
            username,
            first_name,
            last_name,
            email,
            password: raw_password,
            ..
        } = request;

        let parsed_profile = IdentityProfile::parse(IdentityDraft {
            username,
            first_name,
            last_name,
            email,
            is_staff: false,
            is_active: true,
        });
        let (profile, password) = match (parsed_profile, Password::new(raw_password)) {
            (Ok(profile), Ok(password)) => (profile, password),
            (profile_result, password_result) => {
                let mut errors = FieldErrors::new();
                if let Err(field_errors) = profile_result {
                    errors.merge(field_errors);
                }
                if let Err(err) = password_result {
                    errors.add(err.field(), err.to_string());
                }
                return Err(IdentityServiceError::Validation(errors));
            }
        };

        if self
            .identities
            .find_by_username(profile.username())
            .await?
            .is_some()
        {
            return Err(IdentityServiceError::Conflict(FieldErrors::single(
                "username",
                DUPLICATE_USERNAME_MESSAGE,
            )));
        }

        let hash = self.hasher.hash(&password).await?;
        let draft = NewIdentity::new(profile, Some(hash), &*self.clock);
        let identity = self.identities.create(&draft).await?;
        info!(
            identity_id = %identity.id(),
            username = %identity.username(),
            "identity registered"
        );
        Ok(identity)
    }
}
