//! World state.
//!
//! The `World` is the one mutable structure every component reads and
//! writes: the matcher reads it, rule application mutates it, and the clock
//! decays it. It is always passed explicitly; nothing is global.
//!
//! Persistent collections give it deterministic iteration order (so a
//! seeded run is reproducible) and cheap clones (so callers can keep a
//! before/after snapshot).

use std::sync::Arc;

use im::OrdSet;
use tagtale_foundation::{EntityId, Result, TagId, TagInterner};

use crate::entity::{EntityRecord, EntityStore};
use crate::relationship::{Pair, RelationStore};

/// What one decay pass removed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecayReport {
    /// Transient entity tags stripped.
    pub tags_expired: usize,
    /// Transient relation instances deleted.
    pub relations_expired: usize,
}

/// Entities, relations, and the tag interner.
#[derive(Clone, Debug, Default)]
pub struct World {
    entities: EntityStore,
    relations: RelationStore,
    interner: Arc<TagInterner>,
}

impl World {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Tags
    // =========================================================================

    /// Returns the tag interner.
    #[must_use]
    pub fn interner(&self) -> &TagInterner {
        &self.interner
    }

    /// Returns mutable access to the tag interner.
    pub fn interner_mut(&mut self) -> &mut TagInterner {
        Arc::make_mut(&mut self.interner)
    }

    /// Interns a tag name.
    pub fn intern(&mut self, name: &str) -> TagId {
        self.interner_mut().intern(name)
    }

    /// Resolves a tag id to its name.
    #[must_use]
    pub fn tag_name(&self, tag: TagId) -> Option<&str> {
        self.interner.name(tag)
    }

    // =========================================================================
    // Entities
    // =========================================================================

    /// Spawns a named entity, interning its tag names.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is already taken.
    pub fn spawn(&mut self, name: &str, tags: &[&str]) -> Result<EntityId> {
        let tags: Vec<TagId> = tags.iter().map(|t| self.intern(t)).collect();
        self.entities.spawn(name, tags)
    }

    /// Returns the entity store.
    #[must_use]
    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }

    /// Iterates over entity ids in spawn order.
    pub fn entity_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.ids()
    }

    /// Returns the number of entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Gets an entity record.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&EntityRecord> {
        self.entities.get(id)
    }

    /// Looks up an entity by name.
    #[must_use]
    pub fn entity_by_name(&self, name: &str) -> Option<EntityId> {
        self.entities.id_of(name)
    }

    /// Returns an entity's display name.
    #[must_use]
    pub fn entity_name(&self, id: EntityId) -> Option<&str> {
        self.entities.get(id).map(EntityRecord::name)
    }

    /// Returns an entity's tag set.
    #[must_use]
    pub fn tags(&self, id: EntityId) -> Option<&OrdSet<TagId>> {
        self.entities.get(id).map(EntityRecord::tags)
    }

    /// Returns true if the entity carries `tag`.
    #[must_use]
    pub fn has_tag(&self, id: EntityId, tag: TagId) -> bool {
        self.tags(id).is_some_and(|tags| tags.contains(&tag))
    }

    /// Returns true if the entity carries the tag named `name`.
    #[must_use]
    pub fn has_tag_named(&self, id: EntityId, name: &str) -> bool {
        self.interner
            .get(name)
            .is_some_and(|tag| self.has_tag(id, tag))
    }

    /// Returns an entity's tag names, sorted.
    #[must_use]
    pub fn tag_names(&self, id: EntityId) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .tags(id)
            .into_iter()
            .flatten()
            .filter_map(|tag| self.tag_name(*tag))
            .collect();
        names.sort_unstable();
        names
    }

    /// Adds tags to an entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist.
    pub fn add_tags(&mut self, id: EntityId, tags: impl IntoIterator<Item = TagId>) -> Result<()> {
        self.entities.add_tags(id, tags)
    }

    /// Removes tags from an entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist.
    pub fn remove_tags(
        &mut self,
        id: EntityId,
        tags: impl IntoIterator<Item = TagId>,
    ) -> Result<()> {
        self.entities.remove_tags(id, tags)
    }

    // =========================================================================
    // Relations
    // =========================================================================

    /// Returns the relation store.
    #[must_use]
    pub fn relations(&self) -> &RelationStore {
        &self.relations
    }

    /// Returns every pair currently holding `tag`.
    #[must_use]
    pub fn relation_pairs(&self, tag: TagId) -> OrdSet<Pair> {
        self.relations.pairs(tag)
    }

    /// Returns true if `tag` holds from `source` to `target`.
    #[must_use]
    pub fn holds(&self, tag: TagId, source: EntityId, target: EntityId) -> bool {
        self.relations.holds(tag, source, target)
    }

    /// Records or refreshes a relation instance.
    pub fn mark_fresh(&mut self, tag: TagId, source: EntityId, target: EntityId) {
        self.relations.mark_fresh(tag, source, target);
    }

    /// Interns `relation` and marks it fresh between two entities.
    pub fn relate(&mut self, source: EntityId, relation: &str, target: EntityId) {
        let tag = self.intern(relation);
        self.mark_fresh(tag, source, target);
    }

    // =========================================================================
    // Decay
    // =========================================================================

    /// Ages transient state by one tick.
    ///
    /// Entity decay runs first: each entity loses the transient tags in its
    /// snapshot, then snapshots the transient tags it still carries. A
    /// transient tag set during tick N is therefore visible throughout tick
    /// N+1 and gone at the start of tick N+2. Relation decay then sweeps
    /// transient relation tags.
    pub fn expire_tick(&mut self) -> DecayReport {
        DecayReport {
            tags_expired: self.entities.decay(),
            relations_expired: self.relations.decay(),
        }
    }
}
