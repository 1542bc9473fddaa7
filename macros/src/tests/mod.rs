//! Tests for the Record derive macro
//!
//! Expansion is checked on the token level here; the generated impls are
//! exercised end to end by the main crate's integration tests.
