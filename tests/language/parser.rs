//! Integration tests for the rule parser
//!
//! Tests the line grammar on multi-rule sources.

use tagtale_foundation::ErrorKind;
use tagtale_language::{Constraint, Segment, parse, parse_str};

const TAVERN: &str = "\
Notes before any rule are ignored.

### Dwarf drinks
> {X} drinks from the {Y}.
> {X} takes a swig from the {Y}.
X +dwarf -drunk!
Y +glass
X +hold Y
->
X +drunk!

### Spider watches
> {S} watches {D}.
S +spider
D +drunk!
->
S +watch! D
";

#[test]
fn parses_a_multi_rule_file() {
    let rules = parse_str(TAVERN).unwrap();
    assert_eq!(rules.len(), 2);

    let drink = &rules[0];
    assert_eq!(drink.desc, "Dwarf drinks");
    assert_eq!(drink.span.line, 3);
    assert_eq!(drink.texts.len(), 2);
    assert_eq!(drink.pre.constraints.len(), 3);
    assert_eq!(drink.pre.binds(), vec!["X", "Y"]);
    assert_eq!(drink.post.constraints.len(), 1);

    let watch = &rules[1];
    match &watch.post.constraints[0] {
        Constraint::Rel(rel) => {
            assert_eq!(rel.source, "S");
            assert_eq!(rel.target, "D");
            assert_eq!(rel.tags, vec!["watch!"]);
        }
        other => panic!("expected a relation constraint, got {other:?}"),
    }
}

#[test]
fn parse_accepts_any_line_source() {
    let lines = vec!["### r", "> {X}", "X +a"];
    let rules = parse(lines).unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].pre.binds(), vec!["X"]);
}

#[test]
fn templates_are_parsed_at_load() {
    let rules = parse_str(TAVERN).unwrap();
    let segments = rules[0].texts[0].segments();
    assert_eq!(segments[0], Segment::Bind("X".to_string()));
    assert_eq!(rules[0].texts[0].binds().collect::<Vec<_>>(), vec!["X", "Y"]);
}

#[test]
fn grammar_errors_point_at_the_line() {
    let src = "### ok\n> t\nX +a\n\n### broken\n> t\nX Y Z\n";
    let err = parse_str(src).unwrap_err();
    match err.kind {
        ErrorKind::Grammar { line, context, .. } => {
            assert_eq!(line, 7);
            assert_eq!(context, "X Y Z");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn crlf_sources_parse() {
    let rules = parse_str("### r\r\n> {X}\r\nX +a\r\n->\r\nX +b\r\n").unwrap();
    assert_eq!(rules[0].pre.constraints.len(), 1);
    assert_eq!(rules[0].post.constraints.len(), 1);
}
