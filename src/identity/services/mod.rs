//! Application services for account registration and administration.

mod administration;
mod error;
mod registration;

pub use administration::IdentityAdministrationService;
pub use error::{DUPLICATE_USERNAME_MESSAGE, IdentityServiceError, IdentityServiceResult};
pub use registration::{CONSENT_REQUIRED_MESSAGE, RegistrationRequest, RegistrationService};
