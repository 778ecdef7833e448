//! Relation storage with freshness markers.
//!
//! Relations are directed, tagged edges between two entities. The store is
//! indexed by relation tag first, so "every pair holding `hold`" is a single
//! lookup. Each stored pair carries a [`Freshness`] flag that drives the
//! transient-relation decay sweep.

use im::{OrdMap, OrdSet};
use tagtale_foundation::{EntityId, TagId};

/// An ordered `(source, target)` pair. `(a, b)` and `(b, a)` are distinct.
pub type Pair = (EntityId, EntityId);

/// Whether a relation instance was (re)marked since the last sweep.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Freshness {
    /// Marked since the last sweep.
    New,
    /// Survived one sweep without being marked again.
    Stale,
}

/// Stores relation instances keyed by relation tag.
#[derive(Clone, Debug, Default)]
pub struct RelationStore {
    by_tag: OrdMap<TagId, OrdMap<Pair, Freshness>>,
}

impl RelationStore {
    /// Creates a new empty relation store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a relation instance, or refreshes an existing one.
    ///
    /// Marking is idempotent apart from resetting the flag to
    /// [`Freshness::New`].
    pub fn mark_fresh(&mut self, tag: TagId, source: EntityId, target: EntityId) {
        let pair = (source, target);
        match self.by_tag.get_mut(&tag) {
            Some(pairs) => {
                pairs.insert(pair, Freshness::New);
            }
            None => {
                self.by_tag.insert(tag, OrdMap::unit(pair, Freshness::New));
            }
        }
    }

    /// Returns every pair currently holding `tag`.
    #[must_use]
    pub fn pairs(&self, tag: TagId) -> OrdSet<Pair> {
        self.by_tag
            .get(&tag)
            .map(|pairs| pairs.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Returns true if `tag` holds from `source` to `target`.
    #[must_use]
    pub fn holds(&self, tag: TagId, source: EntityId, target: EntityId) -> bool {
        self.by_tag
            .get(&tag)
            .is_some_and(|pairs| pairs.contains_key(&(source, target)))
    }

    /// Returns the freshness flag of a stored instance.
    #[must_use]
    pub fn freshness(&self, tag: TagId, source: EntityId, target: EntityId) -> Option<Freshness> {
        self.by_tag
            .get(&tag)
            .and_then(|pairs| pairs.get(&(source, target)).copied())
    }

    /// Sweeps transient relation tags.
    ///
    /// Stale instances are deleted and new ones become stale, so a transient
    /// relation must be re-marked before the next sweep to survive it.
    /// Persistent relation tags are never touched. Returns how many instances
    /// were deleted.
    pub fn decay(&mut self) -> usize {
        let transient: Vec<TagId> = self
            .by_tag
            .keys()
            .copied()
            .filter(|tag| tag.is_transient())
            .collect();

        let mut expired = 0;
        for tag in transient {
            let Some(pairs) = self.by_tag.get(&tag) else {
                continue;
            };
            let before = pairs.len();
            let survivors: OrdMap<Pair, Freshness> = pairs
                .iter()
                .filter(|(_, freshness)| **freshness == Freshness::New)
                .map(|(pair, _)| (*pair, Freshness::Stale))
                .collect();
            expired += before - survivors.len();

            if survivors.is_empty() {
                self.by_tag.remove(&tag);
            } else {
                self.by_tag.insert(tag, survivors);
            }
        }
        expired
    }

    /// Iterates over every stored instance in tag, then pair order.
    pub fn iter(&self) -> impl Iterator<Item = (TagId, Pair, Freshness)> + '_ {
        self.by_tag.iter().flat_map(|(tag, pairs)| {
            pairs
                .iter()
                .map(move |(pair, freshness)| (*tag, *pair, *freshness))
        })
    }

    /// Returns the total number of stored instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_tag.values().map(OrdMap::len).sum()
    }

    /// Returns true if no relation instance is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
