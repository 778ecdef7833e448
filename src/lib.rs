//! tagtale - Tag-based production rules that tell stories
//!
//! This crate re-exports all layers of the tagtale system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: tagtale_runtime    - World files, sessions, CLI
//! Layer 3: tagtale_engine     - Matching, firing, narration, the clock
//! Layer 2: tagtale_language   - Rule grammar, templates, validation
//! Layer 1: tagtale_storage    - Entities, relations, decay
//! Layer 0: tagtale_foundation - Core types (EntityId, TagId, Error)
//! ```

pub use tagtale_engine as engine;
pub use tagtale_foundation as foundation;
pub use tagtale_language as language;
pub use tagtale_runtime as runtime;
pub use tagtale_storage as storage;
