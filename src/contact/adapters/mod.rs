//! Adapter implementations for the mail transport port.

pub mod log;
pub mod ses;

pub use log::LogMailer;
pub use ses::SesMailer;
