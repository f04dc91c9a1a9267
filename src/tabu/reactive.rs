//! Reactive control of tenure, intensification and diversification.
//!
//! # Rules
//!
//! Evaluated once per outer iteration, after the move has been applied:
//!
//! 1. **Tenure**: a value at or above the best known value counts as
//!    stagnation; past `max_stagnation / 2` stagnant iterations the tenure
//!    grows by 2. Any value below the best known value shrinks the tenure by
//!    1 and resets stagnation. Both are clamped to the tenure bounds.
//! 2. **Intensify** when the current value beats the best by more than the
//!    improvement epsilon: a short burst at minimum tenure around the new
//!    best, continuing from the best tour seen in the burst.
//! 3. **Diversify** when stagnation reaches `max_stagnation`, or the tenure
//!    is saturated and stagnation is at least half that: swap about `n / 3`
//!    node pairs, preferring rarely moved pairs, then clear the tabu list.
//!
//! Intensify is checked first; at most one of them runs per iteration.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Instance, NodePair};

use super::{
    best_admissible_move, FrequencyMemory, SearchState, SearchStats, TabuConfig, TabuMemory,
};

/// Search phase, reported per iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Normal,
    Intensify,
    Diversify,
}

/// Reactive controller state.
///
/// The current tenure itself lives in [`TabuMemory`]; the controller only
/// decides how it moves within `[min_tenure, max_tenure]`.
#[derive(Debug, Clone)]
pub struct ReactiveController {
    min_tenure: usize,
    max_tenure: usize,
    max_stagnation: usize,
    intensification_iterations: usize,
    epsilon: f64,
    best_known_value: f64,
}

impl ReactiveController {
    pub fn new(config: &TabuConfig, initial_value: f64) -> Self {
        let (min_tenure, max_tenure) = config.tenure_bounds();
        Self {
            min_tenure,
            max_tenure,
            max_stagnation: config.max_stagnation,
            intensification_iterations: config.intensification_iterations,
            epsilon: config.improvement_epsilon,
            best_known_value: initial_value,
        }
    }

    pub fn best_known_value(&self) -> f64 {
        self.best_known_value
    }

    /// Applies the tenure rule and updates the stagnation counter.
    pub fn adapt_tenure(&mut self, state: &mut SearchState, tabu: &mut TabuMemory) {
        let tenure = tabu.tenure();
        if state.current_value >= self.best_known_value {
            state.iterations_without_improvement += 1;
            if state.iterations_without_improvement > self.max_stagnation / 2 {
                tabu.set_tenure((tenure + 2).min(self.max_tenure));
            }
        } else {
            tabu.set_tenure(tenure.saturating_sub(1).max(self.min_tenure));
            state.iterations_without_improvement = 0;
            self.best_known_value = state.current_value;
        }
    }

    pub fn should_intensify(&self, state: &SearchState) -> bool {
        state.current_value < state.best_value - self.epsilon
    }

    pub fn should_diversify(&self, state: &SearchState, tabu: &TabuMemory) -> bool {
        let stagnation = state.iterations_without_improvement;
        let saturated = tabu.tenure() + 1 >= self.max_tenure;
        stagnation >= self.max_stagnation || (saturated && stagnation >= self.max_stagnation / 2)
    }

    /// Runs the per-iteration rules and returns the phase that was executed.
    pub fn react<R: Rng>(
        &mut self,
        instance: &Instance,
        state: &mut SearchState,
        tabu: &mut TabuMemory,
        frequency: &mut FrequencyMemory,
        stats: &mut SearchStats,
        rng: &mut R,
    ) -> Result<Phase> {
        self.adapt_tenure(state, tabu);

        if self.should_intensify(state) {
            self.intensify(instance, state, tabu, frequency, stats)?;
            Ok(Phase::Intensify)
        } else if self.should_diversify(state, tabu) {
            self.diversify(instance, state, tabu, frequency, stats, rng)?;
            Ok(Phase::Diversify)
        } else {
            Ok(Phase::Normal)
        }
    }

    /// Records the current tour as the new best and refines it with a
    /// bounded burst at minimum tenure.
    ///
    /// The burst ends early when every move is tabu. Afterwards the search
    /// continues from the best tour seen, which is the tour the burst started
    /// from when nothing better was found, and the previous tenure is
    /// restored.
    ///
    /// Entries already in the tabu list stay until the first inner move is
    /// recorded, so the tighter tenure only trims the list from then on.
    pub fn intensify(
        &mut self,
        instance: &Instance,
        state: &mut SearchState,
        tabu: &mut TabuMemory,
        frequency: &mut FrequencyMemory,
        stats: &mut SearchStats,
    ) -> Result<()> {
        state.promote_current();
        state.phase = Phase::Intensify;
        stats.intensifications += 1;

        let anchor_value = state.best_value;
        let saved_tenure = tabu.tenure();
        tabu.set_tenure(self.min_tenure);
        log::trace!(
            "solver.intensify: start value={anchor_value:.4} tenure={saved_tenure}->{}",
            self.min_tenure
        );

        for _ in 0..self.intensification_iterations {
            let Some(mv) = best_admissible_move(instance, &state.current_tour, tabu) else {
                log::trace!("solver.intensify: no admissible move, ending early");
                break;
            };
            state.apply_move(instance, mv, tabu, frequency)?;
            stats.moves_applied += 1;
            stats.intensification_iterations += 1;

            if state.current_value < state.best_value - self.epsilon {
                state.promote_current();
            }
        }

        state.restore_best();
        tabu.set_tenure(saved_tenure);
        self.best_known_value = self.best_known_value.min(state.best_value);
        state.phase = Phase::Normal;

        log::trace!(
            "solver.intensify: done value={:.4} improved={}",
            state.best_value,
            state.best_value < anchor_value
        );
        Ok(())
    }

    /// Perturbs the current tour with about `n / 3` node transpositions.
    ///
    /// Pairs are drawn from the under-used pairs of the frequency memory, or
    /// uniformly when there are none. Clears the tabu list and the
    /// stagnation counter; the frequency memory is left untouched.
    pub fn diversify<R: Rng>(
        &self,
        instance: &Instance,
        state: &mut SearchState,
        tabu: &mut TabuMemory,
        frequency: &FrequencyMemory,
        stats: &mut SearchStats,
        rng: &mut R,
    ) -> Result<()> {
        state.phase = Phase::Diversify;
        let n = instance.size();
        let swaps = (n / 3).max(1);
        let under_used = frequency.under_used_pairs();

        for _ in 0..swaps {
            let pair = if under_used.is_empty() {
                random_pair(n, rng)
            } else {
                under_used[rng.random_range(0..under_used.len() as u64) as usize]
            };
            let tour = &mut state.current_tour;
            let positions = (tour.position_of(pair.low()), tour.position_of(pair.high()));
            if let (Some(pa), Some(pb)) = positions {
                tour.swap_positions(pa, pb);
            }
        }

        stats.diversifications += 1;
        stats.perturbation_swaps += swaps;
        tabu.clear();
        state.iterations_without_improvement = 0;
        state.reevaluate(instance)?;
        state.phase = Phase::Normal;

        log::trace!(
            "solver.diversify: swaps={swaps} under_used={} value={:.4}",
            under_used.len(),
            state.current_value
        );
        Ok(())
    }
}

/// Two distinct non-depot nodes drawn uniformly; requires `n >= 3`.
fn random_pair<R: Rng>(n: usize, rng: &mut R) -> NodePair {
    let a = rng.random_range(1..n as u64) as usize;
    let mut b = rng.random_range(1..(n - 1) as u64) as usize;
    if b >= a {
        b += 1;
    }
    NodePair::new(a, b)
}
