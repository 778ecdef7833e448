//! A loaded simulation: rules plus the world they run against.

use std::fs;
use std::path::Path;

use tagtale_engine::{NarrativeSink, RuleCompiler, RunSummary, SimulationConfig, TickExecutor};
use tagtale_foundation::{Error, Result};
use tagtale_language::{Rule, load};
use tagtale_storage::World;
use tracing::info;

use crate::seed::{demo_world, parse_world};

/// Rules and a world, ready to run.
#[derive(Clone, Debug)]
pub struct Session {
    rules: Vec<Rule>,
    world: World,
}

impl Session {
    /// Creates a session from parsed rules and a world.
    #[must_use]
    pub fn new(rules: Vec<Rule>, world: World) -> Self {
        Self { rules, world }
    }

    /// Loads rules from `rules_path` and the world from `world_path`, or
    /// the built-in demo world when no path is given.
    ///
    /// # Errors
    /// Returns the first read, grammar, or validation error, tagged with
    /// the offending file.
    pub fn load(rules_path: &Path, world_path: Option<&Path>) -> Result<Self> {
        let rules = read(rules_path)
            .and_then(|src| load(&src))
            .map_err(|e| in_file(e, rules_path))?;
        let world = match world_path {
            Some(path) => read(path)
                .and_then(|src| parse_world(&src))
                .map_err(|e| in_file(e, path))?,
            None => demo_world()?,
        };

        info!(
            rules = rules.len(),
            entities = world.entity_count(),
            "session loaded"
        );
        Ok(Self::new(rules, world))
    }

    /// Builds a session from in-memory sources.
    ///
    /// # Errors
    /// Returns the first grammar or validation error.
    pub fn from_sources(rules: &str, world: Option<&str>) -> Result<Self> {
        let rules = load(rules)?;
        let world = match world {
            Some(src) => parse_world(src)?,
            None => demo_world()?,
        };
        Ok(Self::new(rules, world))
    }

    /// Returns the parsed rules.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns the world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Compiles the rules against this session's world and returns an
    /// executor for them.
    ///
    /// # Errors
    /// Returns a validation error if a rule fails to compile.
    pub fn executor(&mut self, config: SimulationConfig) -> Result<TickExecutor> {
        let compiled = RuleCompiler::compile(&self.rules, self.world.interner_mut())?;
        Ok(TickExecutor::new(compiled, config))
    }

    /// Runs the simulation to completion, narrating into `sink`.
    ///
    /// # Errors
    /// Returns the first compile or tick error.
    pub fn run(
        &mut self,
        config: SimulationConfig,
        sink: &mut dyn NarrativeSink,
    ) -> Result<RunSummary> {
        let mut executor = self.executor(config)?;
        executor.run(&mut self.world, sink)
    }
}

fn read(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

fn in_file(mut err: Error, path: &Path) -> Error {
    let context = err
        .context
        .take()
        .unwrap_or_default()
        .with_source(path.display().to_string());
    err.with_context(context)
}
