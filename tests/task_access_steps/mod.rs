//! Step definitions for task access BDD scenarios.

pub mod given;
pub mod when;
pub mod world;
