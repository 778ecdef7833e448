//! Rule matching, application, narration, and the simulation clock.
//!
//! This crate provides:
//! - [`RuleCompiler`] / [`CompiledRule`] - Rules with interned tags
//! - [`PatternMatcher`] - Candidate pruning plus exhaustive joint re-check
//! - [`ProductionRuleEngine`] - Activation finding and firing
//! - [`Narrator`] / [`NarrativeSink`] - Template choice, rendering, output
//! - [`TickExecutor`] - The fixed-length simulation clock
//! - [`SimulationConfig`] - Tick count, seed, and kill switch

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod narrate;
pub mod pattern;
pub mod rule;
pub mod tick;

pub use config::SimulationConfig;
pub use narrate::{NarrativeSink, Narrator, WriterSink};
pub use pattern::{Bindings, Candidates, PatternMatcher};
pub use rule::{
    Activation, CompiledCondition, CompiledRelConstraint, CompiledRule, CompiledTagConstraint,
    ProductionRuleEngine, RuleCompiler,
};
pub use tick::{RunSummary, TickExecutor, TickResult};
