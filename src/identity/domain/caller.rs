//! The authenticated principal passed into every service call.

use super::{Identity, IdentityId};

/// An authenticated identity resolved from a bearer credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    id: IdentityId,
    username: String,
    is_staff: bool,
}

impl Caller {
    /// Creates a caller from resolved identity attributes.
    #[must_use]
    pub fn new(id: IdentityId, username: impl Into<String>, is_staff: bool) -> Self {
        Self {
            id,
            username: username.into(),
            is_staff,
        }
    }

    /// Returns the caller's identity identifier.
    #[must_use]
    pub const fn id(&self) -> IdentityId {
        self.id
    }

    /// Returns the caller's username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns whether the caller has staff rights.
    #[must_use]
    pub const fn is_staff(&self) -> bool {
        self.is_staff
    }
}

impl From<&Identity> for Caller {
    fn from(identity: &Identity) -> Self {
        Self::new(
            identity.id(),
            identity.username().as_str(),
            identity.is_staff(),
        )
    }
}
