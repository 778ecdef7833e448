//! The simulation clock.
//!
//! Each tick:
//! 1. Decays transient entity tags
//! 2. Sweeps transient relations
//! 3. Collects every activation across all rules and shuffles them
//! 4. Fires each in turn, skipping those superseded by earlier firings

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tagtale_foundation::Result;
use tagtale_storage::World;
use tracing::{info, info_span};

use crate::config::SimulationConfig;
use crate::narrate::NarrativeSink;
use crate::rule::{CompiledRule, ProductionRuleEngine};

// =============================================================================
// Tick Result
// =============================================================================

/// What happened during one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickResult {
    /// Tick number (1-based)
    pub tick: u64,
    /// Activations found after decay
    pub activations_found: usize,
    /// Activations that fired
    pub fired: usize,
    /// Activations superseded by an earlier firing
    pub skipped: usize,
    /// Narrative emitted, in firing order
    pub lines: Vec<String>,
}

/// Totals over a whole run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Ticks executed
    pub ticks: u64,
    /// Activations found, summed over ticks
    pub activations_found: usize,
    /// Activations fired, summed over ticks
    pub fired: usize,
    /// Activations skipped, summed over ticks
    pub skipped: usize,
}

impl RunSummary {
    fn record(&mut self, result: &TickResult) {
        self.ticks += 1;
        self.activations_found += result.activations_found;
        self.fired += result.fired;
        self.skipped += result.skipped;
    }
}

// =============================================================================
// Tick Executor
// =============================================================================

/// Drives a world through fixed-length runs of ticks.
#[derive(Debug)]
pub struct TickExecutor {
    rules: Vec<CompiledRule>,
    engine: ProductionRuleEngine,
    rng: ChaCha8Rng,
    config: SimulationConfig,
    tick_number: u64,
}

impl TickExecutor {
    /// Creates an executor for `rules`.
    ///
    /// The random source is seeded from `config.seed`, or from entropy if
    /// no seed is set.
    #[must_use]
    pub fn new(rules: Vec<CompiledRule>, config: SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            rules,
            engine: ProductionRuleEngine::new().with_max_activations(config.max_activations),
            rng,
            config,
            tick_number: 0,
        }
    }

    /// Returns the number of ticks executed so far.
    #[must_use]
    pub fn tick_number(&self) -> u64 {
        self.tick_number
    }

    /// Returns the compiled rules.
    #[must_use]
    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Executes one tick.
    ///
    /// # Errors
    /// Returns `LimitExceeded` if an opt-in activation cap trips, or any error from
    /// applying a postcondition or writing to the sink. The world may be
    /// partially updated when an error is returned.
    pub fn tick(&mut self, world: &mut World, sink: &mut dyn NarrativeSink) -> Result<TickResult> {
        self.tick_number += 1;
        let span = info_span!("tick", n = self.tick_number);
        let _guard = span.enter();

        self.engine.begin_tick();
        let decay = world.expire_tick();

        let mut activations = self.engine.find_activations(&self.rules, world)?;
        activations.shuffle(&mut self.rng);

        let mut result = TickResult {
            tick: self.tick_number,
            activations_found: activations.len(),
            ..TickResult::default()
        };

        for activation in &activations {
            match self
                .engine
                .fire(activation, &self.rules, world, &mut self.rng, sink)?
            {
                Some(line) => result.lines.push(line),
                None => result.skipped += 1,
            }
        }
        result.fired = self.engine.activation_count();

        info!(
            tags_expired = decay.tags_expired,
            relations_expired = decay.relations_expired,
            found = result.activations_found,
            fired = result.fired,
            skipped = result.skipped,
            "tick complete"
        );
        Ok(result)
    }

    /// Executes the configured number of ticks.
    ///
    /// # Errors
    /// Returns the first tick error.
    pub fn run(&mut self, world: &mut World, sink: &mut dyn NarrativeSink) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        for _ in 0..self.config.ticks {
            let result = self.tick(world, sink)?;
            summary.record(&result);
        }
        Ok(summary)
    }
}

// =============================================================================
// Tests
// =============================================================================
