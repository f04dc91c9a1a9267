//! Mutable state of one search run.

use crate::error::{Error, Result};
use crate::models::{Instance, Tour, TwoOptMove};

use super::{FrequencyMemory, Phase, TabuMemory};

/// Current and best solutions plus stagnation bookkeeping.
///
/// Owned by the search loop. The controller and move generator only ever
/// receive explicit borrows of it.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub current_tour: Tour,
    pub current_value: f64,
    pub best_tour: Tour,
    pub best_value: f64,
    /// Consecutive iterations without beating the best known value.
    pub iterations_without_improvement: usize,
    pub phase: Phase,
}

impl SearchState {
    /// Starts a run from `initial`, which becomes both current and best.
    pub fn new(instance: &Instance, initial: Tour) -> Result<Self> {
        instance.check_tour(&initial)?;
        let value = checked_value(instance, &initial)?;
        Ok(Self {
            best_tour: initial.clone(),
            current_tour: initial,
            current_value: value,
            best_value: value,
            iterations_without_improvement: 0,
            phase: Phase::Normal,
        })
    }

    /// Applies `mv` to the current tour and records its attribute in both
    /// memories.
    ///
    /// The attribute is read before the reversal. The current value is
    /// re-evaluated from the tour rather than accumulated from `cost_delta`.
    pub fn apply_move(
        &mut self,
        instance: &Instance,
        mv: TwoOptMove,
        tabu: &mut TabuMemory,
        frequency: &mut FrequencyMemory,
    ) -> Result<()> {
        let attribute = mv.attribute(&self.current_tour);
        tabu.record(attribute);
        frequency.record(attribute);
        mv.apply(&mut self.current_tour);
        self.reevaluate(instance)
    }

    /// Recomputes `current_value` from `current_tour`.
    pub fn reevaluate(&mut self, instance: &Instance) -> Result<()> {
        self.current_value = checked_value(instance, &self.current_tour)?;
        Ok(())
    }

    /// Copies the current solution into the best slot.
    pub fn promote_current(&mut self) {
        self.best_tour = self.current_tour.clone();
        self.best_value = self.current_value;
    }

    /// Resets the current solution to the best one.
    pub fn restore_best(&mut self) {
        self.current_tour = self.best_tour.clone();
        self.current_value = self.best_value;
    }
}

fn checked_value(instance: &Instance, tour: &Tour) -> Result<f64> {
    let value = instance.evaluate(tour);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::numeric_fault(format!(
            "tour cost evaluated to {value}"
        )))
    }
}
