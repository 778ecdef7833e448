//! Tag interning.
//!
//! Entity tags and relation tags share one namespace. Each name is interned
//! once into a [`TagId`], and the tag's [`Persistence`] is decided at that
//! moment from the name's trailing marker. Everything downstream (decay,
//! relation sweeps) reads the attribute instead of looking at strings.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Suffix that marks a tag name as transient (`"drunk!"`, `"greet!"`).
pub const TRANSIENT_MARKER: char = '!';

/// How long a tag survives without being set again.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Persistence {
    /// Persists until a rule removes it.
    Persistent,
    /// A momentary event or action; decays on its own one tick after it is
    /// observed.
    Transient,
}

impl Persistence {
    /// Classifies a tag name.
    #[must_use]
    pub fn of(name: &str) -> Self {
        if name.ends_with(TRANSIENT_MARKER) {
            Self::Transient
        } else {
            Self::Persistent
        }
    }

    /// Returns true for [`Persistence::Transient`].
    #[must_use]
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::Transient)
    }
}

/// Interned tag identifier.
///
/// Carries its [`Persistence`] so the decay sweep never has to resolve the
/// name. Two ids from the same interner are equal iff their names are.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TagId {
    index: u32,
    persistence: Persistence,
}

impl TagId {
    /// Returns the raw index of this tag.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Returns the decay class of this tag.
    #[must_use]
    pub const fn persistence(self) -> Persistence {
        self.persistence
    }

    /// Returns true if this tag decays on its own.
    #[must_use]
    pub const fn is_transient(self) -> bool {
        self.persistence.is_transient()
    }
}

impl fmt::Debug for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.persistence {
            Persistence::Persistent => write!(f, "TagId({})", self.index),
            Persistence::Transient => write!(f, "TagId({}{TRANSIENT_MARKER})", self.index),
        }
    }
}

/// Interner for tag names.
///
/// Not thread-safe; the simulation is single-threaded.
#[derive(Clone, Debug, Default)]
pub struct TagInterner {
    names: Vec<Arc<str>>,
    ids: HashMap<Arc<str>, TagId>,
}

impl TagInterner {
    /// Creates an empty interner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a tag name, returning its id.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` distinct tags are interned.
    pub fn intern(&mut self, name: &str) -> TagId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }

        let index = u32::try_from(self.names.len()).expect("too many interned tags");
        let id = TagId {
            index,
            persistence: Persistence::of(name),
        };
        let arc: Arc<str> = name.into();
        self.names.push(arc.clone());
        self.ids.insert(arc, id);
        id
    }

    /// Looks up a tag without interning it.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<TagId> {
        self.ids.get(name).copied()
    }

    /// Resolves a tag id back to its name.
    #[must_use]
    pub fn name(&self, id: TagId) -> Option<&str> {
        self.names.get(id.index as usize).map(AsRef::as_ref)
    }

    /// Returns the number of interned tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if nothing has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
