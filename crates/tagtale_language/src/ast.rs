//! Abstract syntax for rules.
//!
//! A rule is a pair of conditions plus narrative templates. Each condition
//! is a conjunction of constraints; a constraint is either a tag constraint
//! on one bind or a relation constraint between two binds. Rules are
//! immutable once parsed.

use crate::span::Span;
use crate::template::Template;

/// Tag requirements on a single bind: `X +dwarf -drunk!`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagConstraint {
    /// The bind this constraint applies to.
    pub bind: String,
    /// Tags the entity must carry (in a postcondition: tags to add).
    pub required: Vec<String>,
    /// Tags the entity must not carry (in a postcondition: tags to remove).
    pub forbidden: Vec<String>,
}

/// Relation requirements between two binds: `X +hold +own Y`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelConstraint {
    /// Source bind.
    pub source: String,
    /// Target bind.
    pub target: String,
    /// Relation tags that must all hold from source to target (in a
    /// postcondition: relations to mark fresh). Never empty.
    pub tags: Vec<String>,
}

/// One constraint line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Constraint {
    /// Constraint on one bind's tag set.
    Tag(TagConstraint),
    /// Constraint on the relations between two binds.
    Rel(RelConstraint),
}

impl Constraint {
    /// Returns the binds this constraint mentions, in source order.
    #[must_use]
    pub fn binds(&self) -> Vec<&str> {
        match self {
            Self::Tag(tag) => vec![tag.bind.as_str()],
            Self::Rel(rel) => vec![rel.source.as_str(), rel.target.as_str()],
        }
    }
}

/// A conjunction of constraints.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Condition {
    /// Constraints in source order.
    pub constraints: Vec<Constraint>,
}

impl Condition {
    /// Creates an empty condition.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are no constraints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Iterates over the tag constraints.
    pub fn tags(&self) -> impl Iterator<Item = &TagConstraint> {
        self.constraints.iter().filter_map(|c| match c {
            Constraint::Tag(tag) => Some(tag),
            Constraint::Rel(_) => None,
        })
    }

    /// Iterates over the relation constraints.
    pub fn rels(&self) -> impl Iterator<Item = &RelConstraint> {
        self.constraints.iter().filter_map(|c| match c {
            Constraint::Rel(rel) => Some(rel),
            Constraint::Tag(_) => None,
        })
    }

    /// Returns every bind mentioned, deduplicated, in order of first
    /// appearance.
    #[must_use]
    pub fn binds(&self) -> Vec<&str> {
        let mut binds: Vec<&str> = Vec::new();
        for bind in self.constraints.iter().flat_map(Constraint::binds) {
            if !binds.contains(&bind) {
                binds.push(bind);
            }
        }
        binds
    }
}

/// A parsed production rule.
#[derive(Clone, Debug)]
pub struct Rule {
    /// Human label (text after `###`).
    pub desc: String,
    /// Narrative templates; one is chosen at random per firing.
    pub texts: Vec<Template>,
    /// What must hold for the rule to fire.
    pub pre: Condition,
    /// What firing does.
    pub post: Condition,
    /// Location of the `###` line.
    pub span: Span,
}

impl Rule {
    /// Creates an empty rule with the given description.
    #[must_use]
    pub fn new(desc: impl Into<String>) -> Self {
        Self {
            desc: desc.into(),
            texts: Vec::new(),
            pre: Condition::new(),
            post: Condition::new(),
            span: Span::default(),
        }
    }
}

// Spans are ignored: two rules are equal when their structure is.
impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.desc == other.desc
            && self.texts == other.texts
            && self.pre == other.pre
            && self.post == other.post
    }
}

impl Eq for Rule {}
