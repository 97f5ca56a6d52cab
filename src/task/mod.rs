//! Per-user task lists.
//!
//! Each task belongs to exactly one identity. Non-staff callers operate only
//! on their own tasks; staff callers see every task. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
