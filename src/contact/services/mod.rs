//! Application services for the contact form.

mod relay;

pub use relay::{ContactError, ContactRelay};
