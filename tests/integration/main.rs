//! Cross-layer integration tests for tagtale
//!
//! Tests that verify correct interaction between multiple crates.

mod sessions;
