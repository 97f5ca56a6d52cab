//! Unit tests for the contact context.
