//! Integration tests for entity storage
//!
//! Tests spawning, name lookup, and tag mutation.

use tagtale_foundation::ErrorKind;
use tagtale_storage::World;

#[test]
fn spawn_assigns_dense_ids() {
    let mut world = World::new();
    let a = world.spawn("Urist", &["dwarf"]).unwrap();
    let b = world.spawn("Beer", &["glass"]).unwrap();

    assert_eq!(a.index(), 0);
    assert_eq!(b.index(), 1);
    assert_eq!(world.entity_count(), 2);
    assert_eq!(world.entity_ids().collect::<Vec<_>>(), vec![a, b]);
}

#[test]
fn names_resolve_both_ways() {
    let mut world = World::new();
    let urist = world.spawn("Urist", &["dwarf"]).unwrap();

    assert_eq!(world.entity_by_name("Urist"), Some(urist));
    assert_eq!(world.entity_name(urist), Some("Urist"));
    assert_eq!(world.entity_by_name("Bomrek"), None);
}

#[test]
fn duplicate_names_are_rejected() {
    let mut world = World::new();
    world.spawn("Urist", &[]).unwrap();
    let err = world.spawn("Urist", &["elf"]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateEntity(ref name) if name == "Urist"));
    assert_eq!(world.entity_count(), 1);
}

#[test]
fn add_and_remove_tags() {
    let mut world = World::new();
    let urist = world.spawn("Urist", &["dwarf", "alive"]).unwrap();
    let drunk = world.intern("drunk!");
    let alive = world.intern("alive");

    world.add_tags(urist, [drunk]).unwrap();
    world.remove_tags(urist, [alive]).unwrap();

    assert_eq!(world.tag_names(urist), vec!["drunk!", "dwarf"]);
    assert!(world.has_tag(urist, drunk));
    assert!(!world.has_tag_named(urist, "alive"));
}

#[test]
fn tags_are_a_set() {
    let mut world = World::new();
    let urist = world.spawn("Urist", &["dwarf", "dwarf"]).unwrap();
    let dwarf = world.intern("dwarf");
    world.add_tags(urist, [dwarf, dwarf]).unwrap();
    assert_eq!(world.tags(urist).unwrap().len(), 1);
}

#[test]
fn snapshots_are_cheap_and_independent() {
    let mut world = World::new();
    let urist = world.spawn("Urist", &["dwarf"]).unwrap();
    let before = world.clone();

    let drunk = world.intern("drunk!");
    world.add_tags(urist, [drunk]).unwrap();

    assert!(world.has_tag_named(urist, "drunk!"));
    assert!(!before.has_tag_named(urist, "drunk!"));
}
