//! Core identifiers, tag interning, and errors for tagtale.
//!
//! This crate provides:
//! - [`EntityId`] - Entity identifiers
//! - [`TagId`] and [`Persistence`] - Interned tags tagged with their decay class
//! - [`TagInterner`] - Tag name interning shared by entity and relation tags
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entity;
pub mod error;
pub mod intern;

pub use entity::EntityId;
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use intern::{Persistence, TRANSIENT_MARKER, TagId, TagInterner};
