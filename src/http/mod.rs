//! JSON-over-HTTP surface.
//!
//! Handlers resolve the [`Caller`](crate::identity::domain::Caller) through
//! an extractor, call one service operation, and translate its error into an
//! [`ApiError`]. Nothing here holds business rules.

mod contact;
mod error;
mod extract;
mod router;
mod state;
mod tasks;
mod token;
mod users;

pub use error::{ApiError, CREDENTIALS_MISSING_MESSAGE, PERMISSION_DENIED_MESSAGE};
pub use router::router;
pub use state::{AppState, Backends};
