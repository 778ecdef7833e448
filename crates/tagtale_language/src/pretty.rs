//! Pretty-printer for rules.
//!
//! Converts rules back to source text that [`crate::parse_str`] reads back
//! into equal rules.
//!
//! # Example
//!
//! ```
//! use tagtale_language::{parse_str, pretty::pretty_print};
//!
//! let rules = parse_str("### look\n> {X} looks around.\nX +alive\n").unwrap();
//! assert_eq!(
//!     pretty_print(&rules[0]),
//!     "### look\n> {X} looks around.\n\tX +alive\n\t->\n"
//! );
//! ```

use std::fmt::Write;

use crate::ast::{Condition, Constraint, Rule};

/// Pretty-prints one rule, ending with a newline.
#[must_use]
pub fn pretty_print(rule: &Rule) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "### {}", rule.desc);
    for text in &rule.texts {
        let _ = writeln!(out, "> {text}");
    }
    print_condition(&mut out, &rule.pre);
    out.push_str("\t->\n");
    print_condition(&mut out, &rule.post);
    out
}

/// Pretty-prints rules separated by blank lines.
#[must_use]
pub fn pretty_print_all(rules: &[Rule]) -> String {
    rules.iter().map(pretty_print).collect::<Vec<_>>().join("\n")
}

fn print_condition(out: &mut String, condition: &Condition) {
    for constraint in &condition.constraints {
        out.push('\t');
        match constraint {
            Constraint::Tag(tag) => {
                out.push_str(&tag.bind);
                for t in &tag.required {
                    let _ = write!(out, " +{t}");
                }
                for t in &tag.forbidden {
                    let _ = write!(out, " -{t}");
                }
            }
            Constraint::Rel(rel) => {
                out.push_str(&rel.source);
                for t in &rel.tags {
                    let _ = write!(out, " +{t}");
                }
                let _ = write!(out, " {}", rel.target);
            }
        }
        out.push('\n');
    }
}
