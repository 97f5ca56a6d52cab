//! Bearer credential issuance and verification.
//!
//! [`AuthService`] exchanges a username and password for a signed
//! access/refresh pair and resolves access tokens into a
//! [`Caller`](crate::identity::domain::Caller).

mod error;
mod service;
mod tokens;

pub use error::AuthError;
pub use service::{AuthService, TokenPair};
pub use tokens::{
    Claims, DEFAULT_ACCESS_LIFETIME, DEFAULT_REFRESH_LIFETIME, IssuedToken, TokenCodec,
    TokenKind, TokenSettings,
};

#[cfg(test)]
mod tests;
