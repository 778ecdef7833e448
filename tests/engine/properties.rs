//! Matching properties
//!
//! The matcher is checked against a brute-force oracle that enumerates every
//! joint assignment and tests each constraint directly against the world.

use std::collections::BTreeSet;

use im::OrdSet;
use proptest::prelude::*;
use tagtale_engine::{Bindings, CompiledTagConstraint, PatternMatcher, RuleCompiler};
use tagtale_foundation::{EntityId, TagId, TagInterner};
use tagtale_language::{Constraint, parse_str};
use tagtale_storage::World;

const TAGS: [&str; 4] = ["a", "b", "c", "d!"];
const RELATIONS: [&str; 2] = ["r", "s!"];
const BINDS: [&str; 3] = ["X", "Y", "Z"];

// =============================================================================
// Strategies
// =============================================================================

#[derive(Clone, Debug)]
struct WorldShape {
    entities: Vec<Vec<usize>>,
    relations: Vec<(usize, usize, usize)>,
}

fn world_shape() -> impl Strategy<Value = WorldShape> {
    (1usize..5).prop_flat_map(|n| {
        (
            prop::collection::vec(prop::collection::vec(0..TAGS.len(), 0..4), n),
            prop::collection::vec((0..n, 0..n, 0..RELATIONS.len()), 0..6),
        )
            .prop_map(|(entities, relations)| WorldShape {
                entities,
                relations,
            })
    })
}

fn build_world(shape: &WorldShape) -> World {
    let mut world = World::new();
    let ids: Vec<EntityId> = shape
        .entities
        .iter()
        .enumerate()
        .map(|(i, tags)| {
            let names: Vec<&str> = tags.iter().map(|t| TAGS[*t]).collect();
            world.spawn(&format!("E{i}"), &names).unwrap()
        })
        .collect();
    for (src, dst, rel) in &shape.relations {
        world.relate(ids[*src], RELATIONS[*rel], ids[*dst]);
    }
    world
}

fn tag_line() -> impl Strategy<Value = String> {
    (
        0..BINDS.len(),
        prop::collection::vec(0..TAGS.len(), 0..3),
        prop::collection::vec(0..TAGS.len(), 0..2),
    )
        .prop_map(|(bind, required, forbidden)| {
            let mut line = BINDS[bind].to_string();
            for t in required {
                line.push_str(&format!(" +{}", TAGS[t]));
            }
            for t in forbidden {
                line.push_str(&format!(" -{}", TAGS[t]));
            }
            line
        })
}

fn rel_line() -> impl Strategy<Value = String> {
    (
        0..BINDS.len(),
        0..BINDS.len(),
        prop::collection::btree_set(0..RELATIONS.len(), 1..=2),
    )
        .prop_map(|(src, dst, rels)| {
            let tags: Vec<String> = rels.iter().map(|r| format!("+{}", RELATIONS[*r])).collect();
            format!("{} {} {}", BINDS[src], tags.join(" "), BINDS[dst])
        })
}

fn rule_source() -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![tag_line(), rel_line()], 1..4)
        .prop_map(|lines| format!("### p\n> t\n{}\n", lines.join("\n")))
}

// =============================================================================
// Oracle
// =============================================================================

fn constraint_holds(world: &World, constraint: &Constraint, assignment: &Bindings) -> bool {
    match constraint {
        Constraint::Tag(tag) => {
            let Some(id) = assignment.get(&tag.bind) else {
                return false;
            };
            tag.required.iter().all(|t| world.has_tag_named(id, t))
                && !tag.forbidden.iter().any(|t| world.has_tag_named(id, t))
        }
        Constraint::Rel(rel) => {
            let (Some(src), Some(dst)) = (assignment.get(&rel.source), assignment.get(&rel.target))
            else {
                return false;
            };
            rel.tags.iter().all(|t| {
                world
                    .interner()
                    .get(t)
                    .is_some_and(|tag| world.holds(tag, src, dst))
            })
        }
    }
}

fn oracle(world: &World, source: &str) -> BTreeSet<Bindings> {
    let rules = parse_str(source).unwrap();
    let rule = &rules[0];
    let binds = rule.pre.binds();
    if binds.is_empty() {
        return BTreeSet::new();
    }

    let entities: Vec<EntityId> = world.entity_ids().collect();
    let mut assignments = vec![Bindings::new()];
    for bind in &binds {
        assignments = assignments
            .into_iter()
            .flat_map(|partial| {
                entities
                    .iter()
                    .map(move |id| partial.clone().with(*bind, *id))
            })
            .collect();
    }

    assignments
        .into_iter()
        .filter(|assignment| {
            rule.pre
                .constraints
                .iter()
                .all(|c| constraint_holds(world, c, assignment))
        })
        .collect()
}

fn engine(world: &mut World, source: &str) -> Vec<Bindings> {
    let rules = RuleCompiler::compile(&parse_str(source).unwrap(), world.interner_mut()).unwrap();
    PatternMatcher::match_rule(&rules[0], world)
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn tag_constraint_matches_iff_superset_and_disjoint(
        tags in prop::collection::btree_set(0..TAGS.len(), 0..=4),
        required in prop::collection::btree_set(0..TAGS.len(), 0..3),
        forbidden in prop::collection::btree_set(0..TAGS.len(), 0..3),
    ) {
        let mut interner = TagInterner::new();
        let ids: Vec<TagId> = TAGS.iter().map(|t| interner.intern(t)).collect();
        let to_set = |s: &BTreeSet<usize>| s.iter().map(|i| ids[*i]).collect::<OrdSet<_>>();

        let constraint = CompiledTagConstraint {
            bind: "X".to_string(),
            required: to_set(&required),
            forbidden: to_set(&forbidden),
        };
        let expected = required.is_subset(&tags) && tags.is_disjoint(&forbidden);
        prop_assert_eq!(PatternMatcher::tags_match(&to_set(&tags), &constraint), expected);
    }

    #[test]
    fn candidates_are_sound(shape in world_shape(), source in rule_source()) {
        let mut world = build_world(&shape);
        let rules = parse_str(&source).unwrap();
        let rule = &rules[0];
        for bindings in engine(&mut world, &source) {
            for constraint in &rule.pre.constraints {
                prop_assert!(
                    constraint_holds(&world, constraint, &bindings),
                    "{:?} violates {:?}", bindings, constraint
                );
            }
        }
    }

    #[test]
    fn candidates_are_complete(shape in world_shape(), source in rule_source()) {
        let mut world = build_world(&shape);
        let found: BTreeSet<Bindings> = engine(&mut world, &source).into_iter().collect();
        let expected = oracle(&world, &source);
        for bindings in &expected {
            prop_assert!(found.contains(bindings), "missing {:?}", bindings);
        }
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn matches_are_distinct(shape in world_shape(), source in rule_source()) {
        let mut world = build_world(&shape);
        let found = engine(&mut world, &source);
        let unique: BTreeSet<&Bindings> = found.iter().collect();
        prop_assert_eq!(unique.len(), found.len());
    }
}
