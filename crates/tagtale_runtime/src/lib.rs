//! World loading, sessions, and the CLI for tagtale.
//!
//! This crate provides:
//! - [`seed`] - The `.world` seed format and the built-in demo world
//! - [`Session`] - Rules plus a world, loaded from files and ready to run
//! - The `tagtale` binary

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod seed;
pub mod session;

pub use seed::{DEMO_WORLD, demo_world, dump_world, parse_world};
pub use session::Session;
