//! Simulation configuration.

/// Configuration for a simulation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Number of ticks [`crate::TickExecutor::run`] executes.
    pub ticks: u64,

    /// Seed for the random source. `None` seeds from OS entropy, so runs
    /// are not reproducible.
    pub seed: Option<u64>,

    /// Opt-in kill switch: the most activations one tick may collect before
    /// firing. `None` (the default) lets every tick run to completion.
    pub max_activations: Option<usize>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ticks: 20,
            seed: None,
            max_activations: None,
        }
    }
}

impl SimulationConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reproducible configuration.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Builder method to set the tick count.
    #[must_use]
    pub fn with_ticks(mut self, ticks: u64) -> Self {
        self.ticks = ticks;
        self
    }

    /// Builder method to set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Builder method to set the activation kill switch.
    #[must_use]
    pub fn with_max_activations(mut self, max: Option<usize>) -> Self {
        self.max_activations = max;
        self
    }
}
