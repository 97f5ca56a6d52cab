//! In-memory identity repository for tests and local development.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::identity::{
    domain::{Identity, IdentityId, NewIdentity, Username},
    ports::{IdentityRepository, IdentityRepositoryError, IdentityRepositoryResult},
};

/// Thread-safe in-memory identity repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityRepository {
    state: Arc<RwLock<InMemoryIdentityState>>,
}

#[derive(Debug, Default)]
struct InMemoryIdentityState {
    last_id: i64,
    identities: BTreeMap<IdentityId, Identity>,
}

impl InMemoryIdentityState {
    fn username_taken(&self, username: &Username, except: Option<IdentityId>) -> bool {
        self.identities
            .values()
            .any(|identity| identity.username() == username && Some(identity.id()) != except)
    }
}

impl InMemoryIdentityRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> IdentityRepositoryResult<RwLockReadGuard<'_, InMemoryIdentityState>> {
        self.state.read().map_err(|err| {
            IdentityRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> IdentityRepositoryResult<RwLockWriteGuard<'_, InMemoryIdentityState>> {
        self.state.write().map_err(|err| {
            IdentityRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn create(&self, identity: &NewIdentity) -> IdentityRepositoryResult<Identity> {
        let mut state = self.write()?;
        let username = identity.profile().username();
        if state.username_taken(username, None) {
            return Err(IdentityRepositoryError::DuplicateUsername(
                username.clone(),
            ));
        }

        state.last_id += 1;
        let created = identity.clone().into_identity(IdentityId::new(state.last_id));
        state.identities.insert(created.id(), created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: IdentityId) -> IdentityRepositoryResult<Option<Identity>> {
        Ok(self.read()?.identities.get(&id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> IdentityRepositoryResult<Option<Identity>> {
        let state = self.read()?;
        Ok(state
            .identities
            .values()
            .find(|identity| identity.username() == username)
            .cloned())
    }

    async fn list(&self) -> IdentityRepositoryResult<Vec<Identity>> {
        Ok(self.read()?.identities.values().cloned().collect())
    }

    async fn update(&self, identity: &Identity) -> IdentityRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.identities.contains_key(&identity.id()) {
            return Err(IdentityRepositoryError::NotFound(identity.id()));
        }
        if state.username_taken(identity.username(), Some(identity.id())) {
            return Err(IdentityRepositoryError::DuplicateUsername(
                identity.username().clone(),
            ));
        }
        state.identities.insert(identity.id(), identity.clone());
        Ok(())
    }

    async fn delete(&self, id: IdentityId) -> IdentityRepositoryResult<bool> {
        Ok(self.write()?.identities.remove(&id).is_some())
    }
}
