//! Taskflow: a multi-user task list service.
//!
//! This crate provides per-user task lists behind bearer-token
//! authentication, staff account administration, and a public contact form
//! relayed by email.
//!
//! # Architecture
//!
//! Taskflow follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, mail, hashing)
//!
//! # Modules
//!
//! - [`task`]: Owner-scoped task CRUD
//! - [`identity`]: Registration and staff account administration
//! - [`auth`]: Access and refresh token issuance
//! - [`contact`]: Contact-form validation and relay
//! - [`http`]: axum routes and error translation

pub mod auth;
pub mod config;
pub mod contact;
pub mod database;
pub mod http;
pub mod identity;
pub mod task;
pub mod telemetry;
pub mod validation;
