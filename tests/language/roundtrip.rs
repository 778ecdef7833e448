//! Parser round-trip properties
//!
//! Pretty-printing a rule and parsing the text back yields an equal rule.

use proptest::prelude::*;
use tagtale_language::pretty::{pretty_print, pretty_print_all};
use tagtale_language::{
    Condition, Constraint, RelConstraint, Rule, TagConstraint, Template, parse_str,
};

fn bind() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["X", "Y", "Z", "Who"]).prop_map(str::to_string)
}

fn tag() -> impl Strategy<Value = String> {
    "[a-z]{1,6}!?"
}

fn constraint() -> impl Strategy<Value = Constraint> {
    prop_oneof![
        (bind(), prop::collection::vec(tag(), 0..3), prop::collection::vec(tag(), 0..3)).prop_map(
            |(bind, required, forbidden)| Constraint::Tag(TagConstraint {
                bind,
                required,
                forbidden,
            })
        ),
        (bind(), bind(), prop::collection::vec(tag(), 1..3)).prop_map(|(source, target, tags)| {
            Constraint::Rel(RelConstraint {
                source,
                target,
                tags,
            })
        }),
    ]
}

fn condition() -> impl Strategy<Value = Condition> {
    prop::collection::vec(constraint(), 0..4).prop_map(|constraints| Condition { constraints })
}

fn template() -> impl Strategy<Value = Template> {
    prop::collection::vec(
        prop_oneof![
            "[a-z]{1,8}",
            bind().prop_map(|b| format!("{{{b}}}")),
            Just("{{braces}}".to_string()),
        ],
        1..5,
    )
    .prop_map(|words| Template::parse(&words.join(" ")).unwrap())
}

fn rule() -> impl Strategy<Value = Rule> {
    (
        "[A-Za-z][a-z ]{0,12}[a-z]",
        prop::collection::vec(template(), 0..3),
        condition(),
        condition(),
    )
        .prop_map(|(desc, texts, pre, post)| {
            let mut rule = Rule::new(desc);
            rule.texts = texts;
            rule.pre = pre;
            rule.post = post;
            rule
        })
}

proptest! {
    #[test]
    fn pretty_then_parse_is_identity(rule in rule()) {
        let text = pretty_print(&rule);
        let reparsed = parse_str(&text).unwrap();
        prop_assert_eq!(reparsed.len(), 1);
        prop_assert_eq!(&reparsed[0], &rule);
    }

    #[test]
    fn multi_rule_files_round_trip(rules in prop::collection::vec(rule(), 0..4)) {
        let text = pretty_print_all(&rules);
        let reparsed = parse_str(&text).unwrap();
        prop_assert_eq!(reparsed, rules);
    }
}
