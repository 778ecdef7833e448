//! The `.world` seed format.
//!
//! One entry per line, using the same tokens as rule constraints:
//!
//! ```text
//! # a comment
//! Urist +dwarf +alive
//! Beer +glass
//! Urist Beer +hold +own
//! ```
//!
//! A line with one name declares an entity and its tags. A line with two
//! names relates them under every listed tag, source first. Relations may
//! only name entities declared on an earlier line.

use std::fmt::Write;

use tagtale_foundation::{Error, ErrorContext, Result};
use tagtale_language::tokenize_constraint;
use tagtale_storage::World;

const COMMENT_MARKER: char = '#';

/// The built-in tavern used when no world file is given.
pub const DEMO_WORLD: &str = "\
# A dwarf, a spider, and a mug of beer.
Urist +dwarf +alive
Spider +spider +alive
Beer +glass
Urist Beer +hold +own
";

/// Builds the built-in tavern.
///
/// # Errors
/// Never fails in practice; the signature matches [`parse_world`].
pub fn demo_world() -> Result<World> {
    parse_world(DEMO_WORLD)
}

/// Parses seed-world text into a fresh world.
///
/// # Errors
/// Returns a grammar error for a malformed line, `DuplicateEntity` for a
/// name declared twice, or `UnknownEntity` for a relation naming an
/// undeclared entity. Every error carries the line number.
pub fn parse_world(source: &str) -> Result<World> {
    let mut world = World::new();
    for (idx, line) in source.lines().enumerate() {
        let line_no = u32::try_from(idx + 1).unwrap_or(u32::MAX);
        let located = |err: Error| err.with_context(ErrorContext::new().with_line(line_no));

        if line.trim_start().starts_with(COMMENT_MARKER) {
            continue;
        }
        let tokens = tokenize_constraint(line, line_no)?;
        if !tokens.forbidden.is_empty() {
            return Err(Error::grammar(line_no, "world entries cannot forbid tags", line));
        }

        match tokens.binds.as_slice() {
            [] if tokens.required.is_empty() => {}
            [name] => {
                let tags: Vec<&str> = tokens.required.iter().map(String::as_str).collect();
                world.spawn(name, &tags).map_err(located)?;
            }
            [src_name, dst_name] => {
                if tokens.required.is_empty() {
                    return Err(Error::grammar(
                        line_no,
                        "relation entry names no relation tag",
                        line,
                    ));
                }
                let src = world
                    .entity_by_name(src_name)
                    .ok_or_else(|| located(Error::unknown_entity(src_name.as_str())))?;
                let dst = world
                    .entity_by_name(dst_name)
                    .ok_or_else(|| located(Error::unknown_entity(dst_name.as_str())))?;
                for tag in &tokens.required {
                    world.relate(src, tag, dst);
                }
            }
            binds => {
                return Err(Error::grammar(
                    line_no,
                    format!("expected 1 or 2 names, found {}", binds.len()),
                    line,
                ));
            }
        }
    }
    Ok(world)
}

/// Writes `world` in the seed format: entities first, then relations.
///
/// Freshness of transient relations is not recorded.
#[must_use]
pub fn dump_world(world: &World) -> String {
    let mut out = String::new();
    for (id, record) in world.entities().iter() {
        out.push_str(record.name());
        for tag in world.tag_names(id) {
            let _ = write!(out, " +{tag}");
        }
        out.push('\n');
    }
    for (tag, (source, target), _) in world.relations().iter() {
        let (Some(src), Some(dst), Some(name)) = (
            world.entity_name(source),
            world.entity_name(target),
            world.tag_name(tag),
        ) else {
            continue;
        };
        let _ = writeln!(out, "{src} {dst} +{name}");
    }
    out
}
