//! Staff-only account management and the startup staff bootstrap.

use super::{IdentityServiceError, IdentityServiceResult};
use crate::identity::{
    domain::{
        Caller, Identity, IdentityDraft, IdentityId, IdentityProfile, NewIdentity, Password,
    },
    ports::{IdentityRepository, PasswordHasher},
};
use crate::task::ports::TaskRepository;
use crate::validation::FieldErrors;
use mockable::Clock;
use std::sync::Arc;
use tracing::{info, warn};

/// Account management service.
///
/// All operations except [`Self::profile`] and [`Self::ensure_staff`]
/// require a staff caller.
pub struct IdentityAdministrationService<R, T, H, C>
where
    R: IdentityRepository + ?Sized,
    T: TaskRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    C: Clock + Send + Sync,
{
    identities: Arc<R>,
    tasks: Arc<T>,
    hasher: Arc<H>,
    clock: Arc<C>,
}

impl<R, T, H, C> Clone for IdentityAdministrationService<R, T, H, C>
where
    R: IdentityRepository + ?Sized,
    T: TaskRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            identities: Arc::clone(&self.identities),
            tasks: Arc::clone(&self.tasks),
            hasher: Arc::clone(&self.hasher),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, T, H, C> IdentityAdministrationService<R, T, H, C>
where
    R: IdentityRepository + ?Sized,
    T: TaskRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new administration service.
    #[must_use]
    pub const fn new(identities: Arc<R>, tasks: Arc<T>, hasher: Arc<H>, clock: Arc<C>) -> Self {
        Self {
            identities,
            tasks,
            hasher,
            clock,
        }
    }

    /// Returns the caller's own account.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::NotFound`] when the account has been
    /// removed since the caller authenticated.
    pub async fn profile(&self, caller: &Caller) -> IdentityServiceResult<Identity> {
        self.load(caller.id()).await
    }

    /// Lists every account ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Forbidden`] for non-staff callers.
    pub async fn list(&self, caller: &Caller) -> IdentityServiceResult<Vec<Identity>> {
        require_staff(caller)?;
        Ok(self.identities.list().await?)
    }

    /// Returns one account.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Forbidden`] for non-staff callers and
    /// [`IdentityServiceError::NotFound`] for unknown identifiers.
    pub async fn get(&self, caller: &Caller, id: IdentityId) -> IdentityServiceResult<Identity> {
        require_staff(caller)?;
        self.load(id).await
    }

    /// Creates an account without a password.
    ///
    /// The account cannot log in until a password is set.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Forbidden`] for non-staff callers,
    /// [`IdentityServiceError::Validation`] for invalid fields, and
    /// [`IdentityServiceError::Conflict`] for a taken username.
    pub async fn create(
        &self,
        caller: &Caller,
        draft: IdentityDraft,
    ) -> IdentityServiceResult<Identity> {
        require_staff(caller)?;
        let profile = IdentityProfile::parse(draft).map_err(IdentityServiceError::Validation)?;
        let identity = self
            .identities
            .create(&NewIdentity::new(profile, None, &*self.clock))
            .await?;
        info!(
            identity_id = %identity.id(),
            created_by = caller.username(),
            "identity created by staff"
        );
        Ok(identity)
    }

    /// Replaces the editable attributes of an account.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Forbidden`] for non-staff callers,
    /// [`IdentityServiceError::NotFound`] for unknown identifiers,
    /// [`IdentityServiceError::Validation`] for invalid fields, and
    /// [`IdentityServiceError::Conflict`] for a taken username.
    pub async fn update(
        &self,
        caller: &Caller,
        id: IdentityId,
        draft: IdentityDraft,
    ) -> IdentityServiceResult<Identity> {
        require_staff(caller)?;
        let mut identity = self.load(id).await?;
        let profile = IdentityProfile::parse(draft).map_err(IdentityServiceError::Validation)?;
        identity.apply_profile(profile);
        self.identities.update(&identity).await?;
        Ok(identity)
    }

    /// Deletes an account together with every task it owns.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Forbidden`] for non-staff callers and
    /// [`IdentityServiceError::NotFound`] for unknown identifiers.
    pub async fn delete(&self, caller: &Caller, id: IdentityId) -> IdentityServiceResult<()> {
        require_staff(caller)?;
        let identity = self.load(id).await?;
        if !self.identities.delete(identity.id()).await? {
            return Err(IdentityServiceError::NotFound(id));
        }
        // Stores with a cascading foreign key have already removed the tasks.
        let removed_tasks = self.tasks.delete_owned_by(identity.id()).await?;
        info!(
            identity_id = %id,
            removed_tasks,
            deleted_by = caller.username(),
            "identity deleted"
        );
        Ok(())
    }

    /// Creates or promotes a staff account with the given password.
    ///
    /// An existing account with the username is promoted, reactivated, and
    /// given the new password.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Validation`] when the username or
    /// password is invalid.
    pub async fn ensure_staff(
        &self,
        username: &str,
        password: &str,
    ) -> IdentityServiceResult<Identity> {
        let profile = IdentityProfile::parse(IdentityDraft {
            username: username.to_owned(),
            is_staff: true,
            is_active: true,
            ..IdentityDraft::default()
        })
        .map_err(IdentityServiceError::Validation)?;
        let secret = Password::new(password).map_err(|err| {
            IdentityServiceError::Validation(FieldErrors::single(err.field(), err.to_string()))
        })?;
        let hash = self.hasher.hash(&secret).await?;

        if let Some(mut existing) = self.identities.find_by_username(profile.username()).await? {
            if !existing.is_staff() {
                warn!(username = %existing.username(), "promoting existing identity to staff");
            }
            existing.promote_to_staff();
            existing.set_password_hash(hash);
            self.identities.update(&existing).await?;
            return Ok(existing);
        }

        let identity = self
            .identities
            .create(&NewIdentity::new(profile, Some(hash), &*self.clock))
            .await?;
        info!(username = %identity.username(), "staff identity bootstrapped");
        Ok(identity)
    }

    async fn load(&self, id: IdentityId) -> IdentityServiceResult<Identity> {
        self.identities
            .find_by_id(id)
            .await?
            .ok_or(IdentityServiceError::NotFound(id))
    }
}

const fn require_staff(caller: &Caller) -> IdentityServiceResult<()> {
    if caller.is_staff() {
        Ok(())
    } else {
        Err(IdentityServiceError::Forbidden)
    }
}
