//! Integration tests for tag interning
//!
//! Tests id stability, name lookup, and the transient attribute.

use proptest::prelude::*;
use tagtale_foundation::{EntityId, Persistence, TagInterner};

#[test]
fn transient_attribute_follows_the_marker() {
    let mut interner = TagInterner::new();
    let drunk = interner.intern("drunk!");
    let dwarf = interner.intern("dwarf");

    assert!(drunk.is_transient());
    assert_eq!(drunk.persistence(), Persistence::Transient);
    assert!(!dwarf.is_transient());
    assert_eq!(dwarf.persistence(), Persistence::Persistent);
}

#[test]
fn marker_must_be_trailing() {
    assert_eq!(Persistence::of("!loud"), Persistence::Persistent);
    assert_eq!(Persistence::of("lo!ud"), Persistence::Persistent);
    assert_eq!(Persistence::of("loud!"), Persistence::Transient);
}

#[test]
fn ids_resolve_back_to_names() {
    let mut interner = TagInterner::new();
    let hold = interner.intern("hold");
    let own = interner.intern("own");

    assert_ne!(hold, own);
    assert_eq!(interner.name(hold), Some("hold"));
    assert_eq!(interner.get("own"), Some(own));
    assert_eq!(interner.get("sell"), None);
    assert_eq!(interner.len(), 2);
}

#[test]
fn entity_ids_order_by_index() {
    assert!(EntityId::new(1) < EntityId::new(2));
    assert_eq!(EntityId::new(5).index(), 5);
    assert_eq!(EntityId::new(5).to_string(), "Entity(5)");
}

proptest! {
    #[test]
    fn intern_is_idempotent(names in prop::collection::vec("[a-z]{1,6}!?", 1..20)) {
        let mut interner = TagInterner::new();
        let first: Vec<_> = names.iter().map(|n| interner.intern(n)).collect();
        let second: Vec<_> = names.iter().map(|n| interner.intern(n)).collect();
        prop_assert_eq!(&first, &second);

        for (name, id) in names.iter().zip(&first) {
            prop_assert_eq!(interner.name(*id), Some(name.as_str()));
            prop_assert_eq!(id.is_transient(), name.ends_with('!'));
        }
    }
}
