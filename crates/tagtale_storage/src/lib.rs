//! Entity tag storage, relations, and world state for tagtale.
//!
//! This crate provides:
//! - [`EntityStore`] - Named entities with tag sets and transient snapshots
//! - [`RelationStore`] - Tag-indexed directed relations with freshness markers
//! - [`World`] - The single mutable world the engine reads and writes

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entity;
pub mod relationship;
pub mod world;

pub use entity::{EntityRecord, EntityStore};
pub use relationship::{Freshness, Pair, RelationStore};
pub use world::{DecayReport, World};
