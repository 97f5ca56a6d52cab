//! Shared fixtures for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskflow::auth::{AuthService, TokenCodec, TokenSettings};
use taskflow::identity::{
    adapters::{hasher::BcryptPasswordHasher, memory::InMemoryIdentityRepository},
    domain::Caller,
    services::{IdentityAdministrationService, RegistrationRequest, RegistrationService},
};
use taskflow::task::{adapters::memory::InMemoryTaskRepository, services::TaskService};

/// Lowest bcrypt cost, keeping hashing fast in tests.
pub const TEST_BCRYPT_COST: u32 = 4;

/// Password used by every registered test account.
pub const PASSWORD: &str = "correct horse battery staple";

/// Every service wired over one pair of in-memory stores.
pub struct Stack {
    pub tasks: Arc<InMemoryTaskRepository>,
    pub registration:
        RegistrationService<InMemoryIdentityRepository, BcryptPasswordHasher, DefaultClock>,
    pub administration: IdentityAdministrationService<
        InMemoryIdentityRepository,
        InMemoryTaskRepository,
        BcryptPasswordHasher,
        DefaultClock,
    >,
    pub auth: AuthService<InMemoryIdentityRepository, BcryptPasswordHasher, DefaultClock>,
    pub task_service: TaskService<InMemoryTaskRepository, DefaultClock>,
}

/// Provides a fresh service stack for each test.
#[fixture]
pub fn stack() -> Stack {
    let identities = Arc::new(InMemoryIdentityRepository::new());
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let hasher = Arc::new(BcryptPasswordHasher::new(TEST_BCRYPT_COST));
    let clock = Arc::new(DefaultClock);
    let codec = Arc::new(TokenCodec::new(&TokenSettings::new("integration-secret")));
    Stack {
        registration: RegistrationService::new(
            Arc::clone(&identities),
            Arc::clone(&hasher),
            Arc::clone(&clock),
        ),
        administration: IdentityAdministrationService::new(
            Arc::clone(&identities),
            Arc::clone(&tasks),
            Arc::clone(&hasher),
            Arc::clone(&clock),
        ),
        auth: AuthService::new(
            identities,
            hasher,
            codec,
            Arc::clone(&clock),
        ),
        task_service: TaskService::new(Arc::clone(&tasks), clock),
        tasks,
    }
}

impl Stack {
    /// Registers `username` and logs in, returning the resolved caller.
    ///
    /// # Errors
    ///
    /// Returns an error if registration, login, or token resolution fails.
    pub async fn sign_up(&self, username: &str) -> Result<Caller, eyre::Report> {
        self.registration
            .register(RegistrationRequest {
                username: username.to_owned(),
                email: format!("{username}@example.com"),
                password: PASSWORD.to_owned(),
                consent_given: true,
                ..RegistrationRequest::default()
            })
            .await?;
        self.log_in(username).await
    }

    /// Logs in as `username` and resolves the access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected.
    pub async fn log_in(&self, username: &str) -> Result<Caller, eyre::Report> {
        let pair = self.auth.obtain_pair(username, PASSWORD).await?;
        Ok(self.auth.authenticate(&pair.access.token).await?)
    }
}
