//! Rule matching.
//!
//! Matching is two-phase. [`PatternMatcher::find_candidates`] narrows each
//! bind's domain independently: tag constraints classify every entity, and
//! relation constraints project the pairs holding all their tags onto the
//! source and target binds. The per-bind domains are only a pruned pool;
//! combining them ignores how binds relate to each other, so
//! [`PatternMatcher::expand`] takes their full cartesian product and
//! [`PatternMatcher::check`] re-verifies every constraint against each
//! complete assignment. The re-check is the only correctness guarantee.

use std::collections::{BTreeMap, BTreeSet};

use im::OrdSet;
use tagtale_foundation::{EntityId, TagId};
use tagtale_storage::{Pair, World};
use tracing::trace;

use crate::rule::{CompiledCondition, CompiledRelConstraint, CompiledRule, CompiledTagConstraint};

// =============================================================================
// Bindings
// =============================================================================

/// A joint assignment of entities to binds.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Bindings {
    values: BTreeMap<String, EntityId>,
}

impl Bindings {
    /// Create empty bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the entity bound to `bind`.
    #[must_use]
    pub fn get(&self, bind: &str) -> Option<EntityId> {
        self.values.get(bind).copied()
    }

    /// Bind `bind` to `entity`, replacing any previous binding.
    pub fn set(&mut self, bind: impl Into<String>, entity: EntityId) {
        self.values.insert(bind.into(), entity);
    }

    /// Builder-style [`Bindings::set`].
    #[must_use]
    pub fn with(mut self, bind: impl Into<String>, entity: EntityId) -> Self {
        self.set(bind, entity);
        self
    }

    /// Iterate all bindings in bind-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, EntityId)> {
        self.values.iter().map(|(bind, id)| (bind.as_str(), *id))
    }

    /// Returns the number of bound binds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// =============================================================================
// Candidates
// =============================================================================

/// Per-bind candidate domains for one rule, in the rule's bind order.
///
/// Every domain is non-empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidates {
    domains: Vec<(String, OrdSet<EntityId>)>,
}

impl Candidates {
    /// Returns the domain of `bind`.
    #[must_use]
    pub fn get(&self, bind: &str) -> Option<&OrdSet<EntityId>> {
        self.domains
            .iter()
            .find(|(name, _)| name == bind)
            .map(|(_, domain)| domain)
    }

    /// Iterates over `(bind, domain)` in bind order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OrdSet<EntityId>)> {
        self.domains
            .iter()
            .map(|(bind, domain)| (bind.as_str(), domain))
    }

    /// Returns the size of the cartesian product of all domains.
    #[must_use]
    pub fn combinations(&self) -> usize {
        self.domains
            .iter()
            .map(|(_, domain)| domain.len())
            .product()
    }
}

// =============================================================================
// Pattern Matcher
// =============================================================================

/// Matches compiled rules against a world.
pub struct PatternMatcher;

impl PatternMatcher {
    /// Returns true iff `tags` contains every required tag and none of the
    /// forbidden ones.
    #[must_use]
    pub fn tags_match(tags: &OrdSet<TagId>, constraint: &CompiledTagConstraint) -> bool {
        constraint.required.iter().all(|tag| tags.contains(tag))
            && !constraint.forbidden.iter().any(|tag| tags.contains(tag))
    }

    /// Returns the pairs holding every tag in `constraint`.
    ///
    /// A constraint without tags matches nothing.
    #[must_use]
    pub fn relation_matches(world: &World, constraint: &CompiledRelConstraint) -> OrdSet<Pair> {
        let mut tags = constraint.tags.iter();
        let Some(first) = tags.next() else {
            return OrdSet::new();
        };
        tags.fold(world.relation_pairs(*first), |acc, tag| {
            acc.intersection(world.relation_pairs(*tag))
        })
    }

    /// Computes every bind's candidate domain.
    ///
    /// Returns `None` if the rule binds nothing or any domain is empty.
    #[must_use]
    pub fn find_candidates(rule: &CompiledRule, world: &World) -> Option<Candidates> {
        if rule.binds.is_empty() {
            return None;
        }

        // Tag pass: classify every entity once per tag constraint.
        let mut tag_binds: BTreeSet<&str> = BTreeSet::new();
        let mut positive: BTreeMap<&str, OrdSet<EntityId>> = BTreeMap::new();
        let mut negative: BTreeMap<&str, OrdSet<EntityId>> = BTreeMap::new();
        for constraint in &rule.pre.tags {
            let bind = constraint.bind.as_str();
            tag_binds.insert(bind);
            for (id, record) in world.entities().iter() {
                let side = if Self::tags_match(record.tags(), constraint) {
                    &mut positive
                } else {
                    &mut negative
                };
                side.entry(bind).or_default().insert(id);
            }
        }

        // Relation pass: project matching pairs onto both binds.
        let mut related: BTreeMap<&str, OrdSet<EntityId>> = BTreeMap::new();
        for constraint in &rule.pre.rels {
            let matching = Self::relation_matches(world, constraint);
            let sources = related.entry(constraint.source.as_str()).or_default();
            sources.extend(matching.iter().map(|(src, _)| *src));
            let targets = related.entry(constraint.target.as_str()).or_default();
            targets.extend(matching.iter().map(|(_, dst)| *dst));
        }

        let mut domains = Vec::with_capacity(rule.binds.len());
        for bind in &rule.binds {
            let key = bind.as_str();
            let by_tags = tag_binds.contains(key).then(|| {
                let pos = positive.get(key).cloned().unwrap_or_default();
                let neg = negative.get(key).cloned().unwrap_or_default();
                pos.relative_complement(neg)
            });
            let domain = match (by_tags, related.get(key)) {
                (Some(tags), Some(rels)) => tags.intersection(rels.clone()),
                (Some(tags), None) => tags,
                (None, Some(rels)) => rels.clone(),
                (None, None) => OrdSet::new(),
            };

            trace!(rule = %rule.desc, bind = key, candidates = domain.len(), "bind domain");
            if domain.is_empty() {
                return None;
            }
            domains.push((bind.clone(), domain));
        }

        Some(Candidates { domains })
    }

    /// Expands candidate domains into every joint assignment, in bind order.
    ///
    /// The result is not validated; see [`PatternMatcher::check`].
    #[must_use]
    pub fn expand(candidates: &Candidates) -> Vec<Bindings> {
        let mut assignments = vec![Bindings::new()];
        for (bind, domain) in &candidates.domains {
            assignments = assignments
                .into_iter()
                .flat_map(|partial| {
                    domain
                        .iter()
                        .map(move |id| partial.clone().with(bind.clone(), *id))
                })
                .collect();
        }
        assignments
    }

    /// Re-verifies every constraint of `condition` against a complete
    /// assignment.
    ///
    /// Unbound binds fail the check.
    #[must_use]
    pub fn check(condition: &CompiledCondition, bindings: &Bindings, world: &World) -> bool {
        let tags_hold = condition.tags.iter().all(|constraint| {
            bindings
                .get(&constraint.bind)
                .and_then(|id| world.tags(id))
                .is_some_and(|tags| Self::tags_match(tags, constraint))
        });

        tags_hold
            && condition.rels.iter().all(|constraint| {
                let (Some(src), Some(dst)) = (
                    bindings.get(&constraint.source),
                    bindings.get(&constraint.target),
                ) else {
                    return false;
                };
                !constraint.tags.is_empty()
                    && constraint.tags.iter().all(|tag| world.holds(*tag, src, dst))
            })
    }

    /// Returns every valid joint assignment for `rule`.
    #[must_use]
    pub fn match_rule(rule: &CompiledRule, world: &World) -> Vec<Bindings> {
        let Some(candidates) = Self::find_candidates(rule, world) else {
            return Vec::new();
        };
        Self::expand(&candidates)
            .into_iter()
            .filter(|bindings| Self::check(&rule.pre, bindings, world))
            .collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
