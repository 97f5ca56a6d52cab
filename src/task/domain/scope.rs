//! Task visibility policy.

use super::Task;
use crate::identity::domain::{Caller, IdentityId};

/// The set of task records a caller may see and operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskScope {
    /// Every task, regardless of owner.
    All,
    /// Only tasks owned by the given identity.
    OwnedBy(IdentityId),
}

impl TaskScope {
    /// Staff callers see everything; everyone else sees only their own tasks.
    #[must_use]
    pub const fn for_caller(caller: &Caller) -> Self {
        if caller.is_staff() {
            Self::All
        } else {
            Self::OwnedBy(caller.id())
        }
    }

    /// Returns `true` when `task` falls inside this scope.
    #[must_use]
    pub fn permits(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::OwnedBy(owner) => task.owner_id() == *owner,
        }
    }
}
