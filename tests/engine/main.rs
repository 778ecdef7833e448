//! Integration tests for Layer 3: Engine
//!
//! Tests for matching, firing, and the tick loop.

mod properties;
