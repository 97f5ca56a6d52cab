//! Unit tests for token handling and the authentication service.
