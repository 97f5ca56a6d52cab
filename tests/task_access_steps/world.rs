//! Shared world state for task access BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use taskflow::identity::{
    adapters::memory::InMemoryIdentityRepository,
    domain::{Caller, IdentityDraft, IdentityProfile, NewIdentity},
    ports::IdentityRepository,
};
use taskflow::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    services::{TaskService, TaskServiceError},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestTaskService = TaskService<InMemoryTaskRepository, DefaultClock>;

/// Scenario world for task access behaviour tests.
pub struct TaskAccessWorld {
    pub identities: InMemoryIdentityRepository,
    pub service: TestTaskService,
    pub callers: HashMap<String, Caller>,
    pub current_task: Option<Task>,
    pub last_listing: Vec<Task>,
    pub last_result: Option<Result<Task, TaskServiceError>>,
}

impl TaskAccessWorld {
    /// Creates a world with no members and no tasks.
    #[must_use]
    pub fn new() -> Self {
        Self {
            identities: InMemoryIdentityRepository::new(),
            service: TaskService::new(
                Arc::new(InMemoryTaskRepository::new()),
                Arc::new(DefaultClock),
            ),
            callers: HashMap::new(),
            current_task: None,
            last_listing: Vec::new(),
            last_result: None,
        }
    }

    /// Stores an identity and remembers it as a caller under `username`.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile is invalid or the store rejects it.
    pub fn add_member(&mut self, username: &str, is_staff: bool) -> Result<(), eyre::Report> {
        let profile = IdentityProfile::parse(IdentityDraft {
            username: username.to_owned(),
            is_staff,
            is_active: true,
            ..IdentityDraft::default()
        })
        .map_err(|err| eyre::eyre!("invalid member profile: {err}"))?;
        let identity = run_async(
            self.identities
                .create(&NewIdentity::new(profile, None, &DefaultClock)),
        )?;
        self.callers
            .insert(username.to_owned(), Caller::from(&identity));
        Ok(())
    }

    /// Returns the caller registered under `username`.
    ///
    /// # Errors
    ///
    /// Returns an error if no member with that name exists.
    pub fn caller(&self, username: &str) -> Result<Caller, eyre::Report> {
        self.callers
            .get(username)
            .cloned()
            .ok_or_else(|| eyre::eyre!("unknown member {username} in scenario world"))
    }

    /// Returns the task created in the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if no task has been created yet.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.current_task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing created task in scenario world"))
    }
}

impl Default for TaskAccessWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskAccessWorld {
    TaskAccessWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
