//! Domain model for user accounts.
//!
//! Identities own tasks, carry the staff flag used by the task access
//! policy, and hold the password hash used for credential issuance.

mod caller;
mod error;
mod identity;
mod ids;

pub use caller::Caller;
pub use error::IdentityDomainError;
pub use identity::{
    Identity, IdentityDraft, IdentityProfile, MAX_NAME_LENGTH, NewIdentity, Password,
    PasswordHash, PersistedIdentityData, Username,
};
pub use ids::IdentityId;
