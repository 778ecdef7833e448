//! Compiled rules and the production rule engine.
//!
//! [`RuleCompiler`] turns parsed rules into [`CompiledRule`]s with interned
//! tags. [`ProductionRuleEngine`] finds every activation for a tick and
//! fires them one at a time, re-checking each against the current world.

use im::OrdSet;
use rand::Rng;
use tagtale_foundation::{EntityId, Error, Result, TagId, TagInterner};
use tagtale_language::{Condition, Constraint, Rule, Template, validate};
use tagtale_storage::World;
use tracing::{debug, trace};

use crate::narrate::{NarrativeSink, Narrator};
use crate::pattern::{Bindings, PatternMatcher};

// =============================================================================
// Compiled Rule
// =============================================================================

/// A tag constraint with interned tags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledTagConstraint {
    /// Bind name
    pub bind: String,
    /// Tags the entity must carry
    pub required: OrdSet<TagId>,
    /// Tags the entity must not carry
    pub forbidden: OrdSet<TagId>,
}

/// A relation constraint with interned tags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledRelConstraint {
    /// Source bind
    pub source: String,
    /// Target bind
    pub target: String,
    /// Relation tags that must all hold from source to target
    pub tags: Vec<TagId>,
}

/// A condition with interned tags, split by constraint kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompiledCondition {
    /// Tag constraints, in source order
    pub tags: Vec<CompiledTagConstraint>,
    /// Relation constraints, in source order
    pub rels: Vec<CompiledRelConstraint>,
}

impl CompiledCondition {
    fn compile(condition: &Condition, interner: &mut TagInterner) -> Self {
        let mut compiled = Self::default();
        for constraint in &condition.constraints {
            match constraint {
                Constraint::Tag(tag) => compiled.tags.push(CompiledTagConstraint {
                    bind: tag.bind.clone(),
                    required: tag.required.iter().map(|t| interner.intern(t)).collect(),
                    forbidden: tag.forbidden.iter().map(|t| interner.intern(t)).collect(),
                }),
                Constraint::Rel(rel) => compiled.rels.push(CompiledRelConstraint {
                    source: rel.source.clone(),
                    target: rel.target.clone(),
                    tags: rel.tags.iter().map(|t| interner.intern(t)).collect(),
                }),
            }
        }
        compiled
    }
}

/// A validated rule ready for matching.
#[derive(Clone, Debug)]
pub struct CompiledRule {
    /// Human label
    pub desc: String,
    /// Narrative templates (never empty)
    pub texts: Vec<Template>,
    /// Precondition
    pub pre: CompiledCondition,
    /// Postcondition
    pub post: CompiledCondition,
    /// Precondition binds in first-appearance order
    pub binds: Vec<String>,
}

impl CompiledRule {
    /// Validates and compiles one rule, interning its tags.
    ///
    /// # Errors
    /// Returns the rule's validation error.
    pub fn compile(rule: &Rule, interner: &mut TagInterner) -> Result<Self> {
        validate(rule)?;
        Ok(Self {
            desc: rule.desc.clone(),
            texts: rule.texts.clone(),
            pre: CompiledCondition::compile(&rule.pre, interner),
            post: CompiledCondition::compile(&rule.post, interner),
            binds: rule.pre.binds().into_iter().map(str::to_string).collect(),
        })
    }

    /// Applies the postcondition under `bindings`.
    ///
    /// Required tags are added before forbidden tags are removed, so a tag
    /// listed both ways ends up absent.
    ///
    /// # Errors
    /// Returns an error if a postcondition bind is unbound or names a
    /// missing entity.
    pub fn apply_postconditions(&self, bindings: &Bindings, world: &mut World) -> Result<()> {
        for constraint in &self.post.tags {
            let id = self.bound(bindings, &constraint.bind)?;
            world.add_tags(id, constraint.required.iter().copied())?;
            world.remove_tags(id, constraint.forbidden.iter().copied())?;
        }
        for constraint in &self.post.rels {
            let source = self.bound(bindings, &constraint.source)?;
            let target = self.bound(bindings, &constraint.target)?;
            for tag in &constraint.tags {
                world.mark_fresh(*tag, source, target);
            }
        }
        Ok(())
    }

    fn bound(&self, bindings: &Bindings, bind: &str) -> Result<EntityId> {
        bindings
            .get(bind)
            .ok_or_else(|| Error::binding_scope(&self.desc, bind))
    }
}

// =============================================================================
// Rule Compiler
// =============================================================================

/// Compiles parsed rules.
pub struct RuleCompiler;

impl RuleCompiler {
    /// Validates and compiles every rule, in order.
    ///
    /// # Errors
    /// Returns the first rule's validation error.
    pub fn compile(rules: &[Rule], interner: &mut TagInterner) -> Result<Vec<CompiledRule>> {
        rules
            .iter()
            .map(|rule| CompiledRule::compile(rule, interner))
            .collect()
    }
}

// =============================================================================
// Activation
// =============================================================================

/// A rule paired with one valid joint binding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Activation {
    /// Index of the rule in the compiled rule list
    pub rule: usize,
    /// Bind assignment found during matching
    pub bindings: Bindings,
}

// =============================================================================
// Rule Engine
// =============================================================================

/// Finds and fires activations within a tick.
#[derive(Clone, Debug)]
pub struct ProductionRuleEngine {
    /// Activations fired this tick
    fired: usize,
    /// Optional cap on activations found per tick
    max_activations: Option<usize>,
}

impl Default for ProductionRuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductionRuleEngine {
    /// Creates a new rule engine.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fired: 0,
            max_activations: None,
        }
    }

    /// Sets the kill switch threshold. `None` disables it.
    #[must_use]
    pub fn with_max_activations(mut self, max: Option<usize>) -> Self {
        self.max_activations = max;
        self
    }

    /// Resets for a new tick.
    pub fn begin_tick(&mut self) {
        self.fired = 0;
    }

    /// Returns how many activations fired since [`Self::begin_tick`].
    #[must_use]
    pub fn activation_count(&self) -> usize {
        self.fired
    }

    /// Collects every valid (rule, binding) pair across all rules.
    ///
    /// Activations are grouped by rule in rule order; callers shuffle them.
    ///
    /// # Errors
    /// Returns `LimitExceeded` if a cap is set and more activations are
    /// found than it allows.
    pub fn find_activations(&self, rules: &[CompiledRule], world: &World) -> Result<Vec<Activation>> {
        let activations: Vec<Activation> = rules
            .iter()
            .enumerate()
            .flat_map(|(rule, compiled)| {
                PatternMatcher::match_rule(compiled, world)
                    .into_iter()
                    .map(move |bindings| Activation { rule, bindings })
            })
            .collect();

        if let Some(max) = self.max_activations.filter(|max| activations.len() > *max) {
            return Err(Error::limit_exceeded(max, activations.len()));
        }
        Ok(activations)
    }

    /// Fires one activation against the current world.
    ///
    /// The binding is re-checked first; an activation superseded by an
    /// earlier firing this tick is skipped and `Ok(None)` returned.
    /// Otherwise a template is chosen and rendered, the postcondition is
    /// applied, and the line is emitted and returned.
    ///
    /// # Errors
    /// Returns an error if the activation names an unknown rule, if the
    /// postcondition cannot be applied, or if the sink fails.
    pub fn fire<R: Rng + ?Sized>(
        &mut self,
        activation: &Activation,
        rules: &[CompiledRule],
        world: &mut World,
        rng: &mut R,
        sink: &mut dyn NarrativeSink,
    ) -> Result<Option<String>> {
        let rule = rules
            .get(activation.rule)
            .ok_or_else(|| Error::internal(format!("no rule at index {}", activation.rule)))?;

        if !PatternMatcher::check(&rule.pre, &activation.bindings, world) {
            trace!(rule = %rule.desc, bindings = ?activation.bindings, "superseded, skipping");
            return Ok(None);
        }

        let template = Narrator::choose(rule, rng)?;
        let line = Narrator::render(template, &activation.bindings, world);
        rule.apply_postconditions(&activation.bindings, world)?;
        self.fired += 1;

        debug!(rule = %rule.desc, bindings = ?activation.bindings, "fired");
        sink.emit(&line)?;
        Ok(Some(line))
    }
}

// =============================================================================
// Tests
// =============================================================================
