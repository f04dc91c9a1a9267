//! Outcome of a search run.

use serde::{Deserialize, Serialize};

use crate::models::Tour;

use super::TraceRecord;

/// Why the search loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// `max_iterations` outer iterations were executed.
    IterationLimit,
    /// Every candidate move was tabu outside an intensification burst.
    NeighborhoodExhausted,
    /// The cancellation token was triggered.
    Cancelled,
}

/// Counters collected during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Outer iterations executed.
    pub iterations: usize,
    /// Moves applied, including those inside intensification bursts.
    pub moves_applied: usize,
    pub intensifications: usize,
    /// Inner iterations spent in intensification bursts.
    pub intensification_iterations: usize,
    pub diversifications: usize,
    /// Position swaps performed by diversification.
    pub perturbation_swaps: usize,
    /// Sink calls that returned an error.
    pub sink_failures: usize,
    /// Outer iteration at which the best tour was found (0 = initial tour).
    pub best_iteration: usize,
}

/// Result of a tabu search run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabuResult {
    /// Best tour found.
    pub best_tour: Tour,
    /// Cost of the best tour.
    pub best_value: f64,
    pub termination: Termination,
    pub stats: SearchStats,
    /// Per-iteration records, empty unless trace recording was enabled.
    pub trace: Vec<TraceRecord>,
}
