//! Integration tests for Layer 0: Foundation
//!
//! Tests for identifiers, tag interning, and error types.

mod interning;
