//! Rule grammar for tagtale.
//!
//! Rules are written in a compact line-oriented text format:
//!
//! ```text
//! ### Dwarf drinks
//! > {X} drinks from the {Y}.
//! X +dwarf -drunk!
//! Y +glass
//! X +hold Y
//! ->
//! X +drunk!
//! ```
//!
//! This crate provides:
//! - [`parse`] / [`parse_str`] - Line parser producing [`Rule`] records
//! - [`Template`] - Narrative templates with `{bind}` placeholders
//! - [`validate`] - Load-time structural checks
//! - [`load`] - Parse and validate in one step
//! - [`pretty`] - Serialize rules back to source text

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod parser;
pub mod pretty;
pub mod span;
pub mod template;
pub mod validate;

pub use ast::{Condition, Constraint, RelConstraint, Rule, TagConstraint};
pub use parser::{ConstraintLine, parse, parse_str, tokenize_constraint};
pub use span::Span;
pub use template::{Segment, Template};
pub use validate::{validate, validate_all};

use tagtale_foundation::Result;

/// Parses rule source and validates every rule.
///
/// # Errors
/// Returns the first grammar or validation error.
pub fn load(source: &str) -> Result<Vec<Rule>> {
    let rules = parse_str(source)?;
    validate_all(&rules)?;
    Ok(rules)
}
