//! Port contracts for identity storage and credential hashing.

pub mod password;
pub mod repository;

pub use password::{PasswordHashError, PasswordHasher};
pub use repository::{IdentityRepository, IdentityRepositoryError, IdentityRepositoryResult};
