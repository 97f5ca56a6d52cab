//! Unit tests for the identity context.
