//! In-memory adapters for identity storage.

mod identity;

pub use identity::InMemoryIdentityRepository;
