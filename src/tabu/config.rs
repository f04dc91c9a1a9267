//! Reactive tabu search configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Stagnation length that forces a diversification.
pub const MAX_STAGNATION: usize = 100;

/// Inner iterations of one intensification burst.
pub const INTENSIFICATION_ITERATIONS: usize = 50;

/// Minimum cost decrease that counts as a new best.
pub const IMPROVEMENT_EPSILON: f64 = 0.01;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// Configuration parameters for the reactive tabu search.
///
/// Only `tabu_tenure` and `max_iterations` are needed for a basic run; the
/// remaining knobs have working defaults.
///
/// # Examples
///
/// ```
/// use u_drilling::tabu::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_tabu_tenure(9)
///     .with_max_iterations(500)
///     .with_seed(7);
/// assert_eq!(config.tabu_tenure, 9);
/// assert_eq!(config.tenure_bounds(), (4, 27));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabuConfig {
    /// Initial short-term memory length.
    pub tabu_tenure: usize,
    /// Lower tenure bound (None derives `tabu_tenure / 2`, at least 1).
    pub min_tenure: Option<usize>,
    /// Upper tenure bound (None derives `3 * tabu_tenure`).
    pub max_tenure: Option<usize>,
    /// Hard cap on outer iterations.
    pub max_iterations: usize,
    /// Non-improving iterations before a forced diversification.
    pub max_stagnation: usize,
    /// Length of each intensification burst.
    pub intensification_iterations: usize,
    /// Minimum decrease for a new best solution.
    pub improvement_epsilon: f64,
    /// Notify the sink every this many iterations (0 = improvements only).
    pub report_interval: usize,
    /// Keep every iteration's record in the result.
    pub record_trace: bool,
    /// Random seed for diversification (None for [`DEFAULT_SEED`]).
    pub seed: Option<u64>,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            tabu_tenure: 7,
            min_tenure: None,
            max_tenure: None,
            max_iterations: 1000,
            max_stagnation: MAX_STAGNATION,
            intensification_iterations: INTENSIFICATION_ITERATIONS,
            improvement_epsilon: IMPROVEMENT_EPSILON,
            report_interval: 0,
            record_trace: false,
            seed: None,
        }
    }
}

impl TabuConfig {
    /// Sets the initial tabu tenure.
    pub fn with_tabu_tenure(mut self, tenure: usize) -> Self {
        self.tabu_tenure = tenure;
        self
    }

    /// Sets explicit tenure bounds.
    pub fn with_tenure_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_tenure = Some(min);
        self.max_tenure = Some(max);
        self
    }

    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the stagnation threshold.
    pub fn with_max_stagnation(mut self, n: usize) -> Self {
        self.max_stagnation = n;
        self
    }

    /// Sets the intensification burst length.
    pub fn with_intensification_iterations(mut self, n: usize) -> Self {
        self.intensification_iterations = n;
        self
    }

    /// Sets the sink reporting interval.
    pub fn with_report_interval(mut self, n: usize) -> Self {
        self.report_interval = n;
        self
    }

    /// Enables or disables trace recording.
    pub fn with_trace(mut self, record: bool) -> Self {
        self.record_trace = record;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Resolved `(min_tenure, max_tenure)`.
    pub fn tenure_bounds(&self) -> (usize, usize) {
        let min = self
            .min_tenure
            .unwrap_or_else(|| (self.tabu_tenure / 2).max(1).min(self.tabu_tenure));
        let max = self
            .max_tenure
            .unwrap_or_else(|| self.tabu_tenure.saturating_mul(3));
        (min, max)
    }

    /// Resolved random seed.
    pub fn seed_or_default(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Checks that the knobs are mutually consistent.
    pub fn validate(&self) -> Result<()> {
        let (min, max) = self.tenure_bounds();
        if min > max {
            return Err(Error::invalid_config(format!(
                "min_tenure {min} exceeds max_tenure {max}"
            )));
        }
        if self.tabu_tenure < min || self.tabu_tenure > max {
            return Err(Error::invalid_config(format!(
                "tabu_tenure {} lies outside [{min}, {max}]",
                self.tabu_tenure
            )));
        }
        if self.max_stagnation == 0 {
            return Err(Error::invalid_config("max_stagnation must be positive"));
        }
        if !self.improvement_epsilon.is_finite() || self.improvement_epsilon < 0.0 {
            return Err(Error::invalid_config(format!(
                "improvement_epsilon {} must be finite and non-negative",
                self.improvement_epsilon
            )));
        }
        Ok(())
    }
}
