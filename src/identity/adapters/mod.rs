//! Adapter implementations for identity ports.

pub mod hasher;
pub mod memory;
pub mod postgres;
