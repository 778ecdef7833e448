//! Entity storage.
//!
//! The `EntityStore` owns every entity for the whole run. Entities are
//! never destroyed; an entity's index is its spawn order.

use std::sync::Arc;

use im::{OrdSet, Vector};
use tagtale_foundation::{EntityId, Error, Result, TagId};

/// A single entity: a unique name, its tag set, and the transient snapshot
/// taken at the start of the current tick.
#[derive(Clone, Debug)]
pub struct EntityRecord {
    name: Arc<str>,
    tags: OrdSet<TagId>,
    transient_snapshot: OrdSet<TagId>,
}

impl EntityRecord {
    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the current tag set.
    #[must_use]
    pub fn tags(&self) -> &OrdSet<TagId> {
        &self.tags
    }

    /// Returns the transient tags recorded at the last decay.
    ///
    /// These are the tags the next decay strips.
    #[must_use]
    pub fn transient_snapshot(&self) -> &OrdSet<TagId> {
        &self.transient_snapshot
    }

    /// Strips last tick's transient snapshot and records a new one.
    ///
    /// Returns how many tags were removed.
    fn decay(&mut self) -> usize {
        let before = self.tags.len();
        let expired = std::mem::take(&mut self.transient_snapshot);
        self.tags = std::mem::take(&mut self.tags).relative_complement(expired);
        self.transient_snapshot = self
            .tags
            .iter()
            .copied()
            .filter(|tag| tag.is_transient())
            .collect();
        before - self.tags.len()
    }
}

/// Stores entities with name lookup.
///
/// Backed by persistent collections, so cloning is cheap and iteration
/// order is always spawn order.
#[derive(Clone, Debug, Default)]
pub struct EntityStore {
    records: Vector<EntityRecord>,
    by_name: im::HashMap<Arc<str>, EntityId>,
}

impl EntityStore {
    /// Creates a new empty entity store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns a named entity with an initial tag set.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is already taken.
    pub fn spawn(&mut self, name: &str, tags: impl IntoIterator<Item = TagId>) -> Result<EntityId> {
        if self.by_name.contains_key(name) {
            return Err(Error::duplicate_entity(name));
        }

        let index = u32::try_from(self.records.len())
            .map_err(|_| Error::internal("entity store is full"))?;
        let id = EntityId::new(index);
        let name: Arc<str> = name.into();
        self.records.push_back(EntityRecord {
            name: name.clone(),
            tags: tags.into_iter().collect(),
            transient_snapshot: OrdSet::new(),
        });
        self.by_name.insert(name, id);
        Ok(id)
    }

    /// Gets an entity record.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&EntityRecord> {
        self.records.get(id.index() as usize)
    }

    fn get_mut(&mut self, id: EntityId) -> Result<&mut EntityRecord> {
        self.records
            .get_mut(id.index() as usize)
            .ok_or_else(|| Error::unknown_entity(id.to_string()))
    }

    /// Looks up an entity by name.
    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<EntityId> {
        self.by_name.get(name).copied()
    }

    /// Adds tags to an entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist.
    pub fn add_tags(&mut self, id: EntityId, tags: impl IntoIterator<Item = TagId>) -> Result<()> {
        let record = self.get_mut(id)?;
        for tag in tags {
            record.tags.insert(tag);
        }
        Ok(())
    }

    /// Removes tags from an entity. Tags it does not carry are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist.
    pub fn remove_tags(
        &mut self,
        id: EntityId,
        tags: impl IntoIterator<Item = TagId>,
    ) -> Result<()> {
        let record = self.get_mut(id)?;
        for tag in tags {
            record.tags.remove(&tag);
        }
        Ok(())
    }

    /// Runs entity decay on every entity, returning the number of tags
    /// stripped.
    pub fn decay(&mut self) -> usize {
        self.records.iter_mut().map(EntityRecord::decay).sum()
    }

    /// Returns the number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over all entity ids in spawn order.
    // `spawn` never lets the store grow past u32::MAX entries.
    #[allow(clippy::cast_possible_truncation)]
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        (0..self.records.len()).map(|idx| EntityId::new(idx as u32))
    }

    /// Iterates over all entities in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &EntityRecord)> + '_ {
        self.ids().zip(self.records.iter())
    }
}
