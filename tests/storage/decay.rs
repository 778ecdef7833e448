//! Integration tests for the decay sweeps
//!
//! Tests the one-tick grace period for transient tags and the renewal rule
//! for transient relations.

use tagtale_storage::World;

#[test]
fn transient_tag_survives_one_sweep() {
    let mut world = World::new();
    let urist = world.spawn("Urist", &["dwarf"]).unwrap();
    let drunk = world.intern("drunk!");

    // Set during tick N.
    world.add_tags(urist, [drunk]).unwrap();

    // Start of tick N+1: still visible.
    let report = world.expire_tick();
    assert_eq!(report.tags_expired, 0);
    assert!(world.has_tag(urist, drunk));

    // Start of tick N+2: gone.
    let report = world.expire_tick();
    assert_eq!(report.tags_expired, 1);
    assert!(!world.has_tag(urist, drunk));
}

#[test]
fn persistent_tags_never_decay() {
    let mut world = World::new();
    let urist = world.spawn("Urist", &["dwarf", "alive"]).unwrap();
    for _ in 0..5 {
        world.expire_tick();
    }
    assert_eq!(world.tag_names(urist), vec!["alive", "dwarf"]);
}

#[test]
fn seed_transient_tags_get_the_same_grace() {
    let mut world = World::new();
    let urist = world.spawn("Urist", &["startled!"]).unwrap();

    world.expire_tick();
    assert!(world.has_tag_named(urist, "startled!"));
    world.expire_tick();
    assert!(!world.has_tag_named(urist, "startled!"));
}

#[test]
fn transient_relation_needs_renewal() {
    let mut world = World::new();
    let spider = world.spawn("Spider", &[]).unwrap();
    let urist = world.spawn("Urist", &[]).unwrap();
    let watch = world.intern("watch!");

    world.mark_fresh(watch, spider, urist);

    // First sweep only ages it.
    assert_eq!(world.expire_tick().relations_expired, 0);
    assert!(world.holds(watch, spider, urist));

    // Not renewed: the second sweep deletes it.
    assert_eq!(world.expire_tick().relations_expired, 1);
    assert!(!world.holds(watch, spider, urist));
}

#[test]
fn renewed_transient_relation_persists() {
    let mut world = World::new();
    let spider = world.spawn("Spider", &[]).unwrap();
    let urist = world.spawn("Urist", &[]).unwrap();
    let watch = world.intern("watch!");

    world.mark_fresh(watch, spider, urist);
    for _ in 0..5 {
        world.expire_tick();
        world.mark_fresh(watch, spider, urist);
    }
    world.expire_tick();
    assert!(world.holds(watch, spider, urist));
}

#[test]
fn persistent_relations_are_never_swept() {
    let mut world = World::new();
    let urist = world.spawn("Urist", &[]).unwrap();
    let beer = world.spawn("Beer", &[]).unwrap();
    world.relate(urist, "hold", beer);

    for _ in 0..5 {
        assert_eq!(world.expire_tick().relations_expired, 0);
    }
    let hold = world.intern("hold");
    assert!(world.holds(hold, urist, beer));
}
