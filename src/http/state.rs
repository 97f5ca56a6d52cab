//! Shared handler state.

use crate::auth::{AuthService, TokenCodec, TokenSettings};
use crate::contact::{ports::Mailer, services::ContactRelay};
use crate::identity::{
    ports::{IdentityRepository, PasswordHasher},
    services::{IdentityAdministrationService, RegistrationService},
};
use crate::task::{ports::TaskRepository, services::TaskService};
use mockable::DefaultClock;
use std::sync::Arc;

/// Port implementations selected at start-up.
pub struct Backends {
    /// Identity store.
    pub identities: Arc<dyn IdentityRepository>,
    /// Task store.
    pub tasks: Arc<dyn TaskRepository>,
    /// Password hasher.
    pub hasher: Arc<dyn PasswordHasher>,
    /// Outbound mail transport.
    pub mailer: Arc<dyn Mailer>,
}

/// Services shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub(super) tasks: TaskService<dyn TaskRepository, DefaultClock>,
    pub(super) registration:
        RegistrationService<dyn IdentityRepository, dyn PasswordHasher, DefaultClock>,
    pub(super) identities: IdentityAdministrationService<
        dyn IdentityRepository,
        dyn TaskRepository,
        dyn PasswordHasher,
        DefaultClock,
    >,
    pub(super) auth: AuthService<dyn IdentityRepository, dyn PasswordHasher, DefaultClock>,
    pub(super) contact: ContactRelay<dyn Mailer>,
    pub(super) owners: Arc<dyn IdentityRepository>,
    pub(super) clock: Arc<DefaultClock>,
    pub(super) page_size: u32,
}

impl AppState {
    /// Wires the services over `backends`.
    ///
    /// `mailbox` is both sender and recipient of contact mail.
    #[must_use]
    pub fn new(
        backends: Backends,
        tokens: &TokenSettings,
        mailbox: impl Into<String>,
        page_size: u32,
    ) -> Self {
        let Backends {
            identities,
            tasks,
            hasher,
            mailer,
        } = backends;
        let clock = Arc::new(DefaultClock);
        let codec = Arc::new(TokenCodec::new(tokens));
        Self {
            tasks: TaskService::new(Arc::clone(&tasks), Arc::clone(&clock)),
            registration: RegistrationService::new(
                Arc::clone(&identities),
                Arc::clone(&hasher),
                Arc::clone(&clock),
            ),
            identities: IdentityAdministrationService::new(
                Arc::clone(&identities),
                tasks,
                Arc::clone(&hasher),
                Arc::clone(&clock),
            ),
            auth: AuthService::new(
                Arc::clone(&identities),
                hasher,
                codec,
                Arc::clone(&clock),
            ),
            contact: ContactRelay::new(mailer, mailbox),
            owners: identities,
            clock,
            page_size,
        }
    }

    /// Returns the staff-account service, used for the start-up bootstrap.
    #[must_use]
    pub const fn administration(
        &self,
    ) -> &IdentityAdministrationService<
        dyn IdentityRepository,
        dyn TaskRepository,
        dyn PasswordHasher,
        DefaultClock,
    > {
        &self.identities
    }
}
