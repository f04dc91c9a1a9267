//! Reactive tabu search execution engine.
//!
//! # Algorithm
//!
//! 1. `current = best = initial`, empty tabu list, zeroed frequency memory
//! 2. While fewer than `max_iterations` outer iterations have run:
//!    a. **Generate**: best non-tabu 2-opt move (no aspiration)
//!    b. **Check**: no admissible move ends the run
//!    c. **Apply**: reverse the segment, record its node pair as tabu and
//!    in the frequency memory
//!    d. **React**: adapt tenure, then intensify on a new best or
//!    diversify on stagnation (see [`ReactiveController`])
//! 3. Return the best tour found
//!
//! # Reference
//!
//! Battiti, R. & Tecchiolli, G. (1994). "The reactive tabu search",
//! *ORSA Journal on Computing* 6(2), 126-140.

use crate::error::Result;
use crate::models::{Instance, Tour};

use super::{
    best_admissible_move, CancellationToken, FrequencyMemory, Phase, ReactiveController,
    SearchSink, SearchState, SearchStats, TabuConfig, TabuMemory, TabuResult, Termination,
    TraceRecord,
};

/// Reactive tabu search over one instance.
///
/// Holds the read-only instance and the run options; every call to
/// [`run`](Self::run) builds its own tour, memories and random stream.
///
/// # Examples
///
/// ```
/// use u_drilling::models::{Instance, Tour};
/// use u_drilling::tabu::{TabuConfig, TabuSearch, Termination};
///
/// let instance = Instance::from_rows(vec![
///     vec![0.0, 1.0, 9.0, 9.0],
///     vec![1.0, 0.0, 1.0, 9.0],
///     vec![9.0, 1.0, 0.0, 1.0],
///     vec![9.0, 9.0, 1.0, 0.0],
/// ])
/// .expect("valid instance");
/// let initial = Tour::new(vec![0, 2, 1, 3, 0], 4).expect("valid tour");
/// let config = TabuConfig::default()
///     .with_tabu_tenure(2)
///     .with_max_iterations(50);
///
/// let result = TabuSearch::new(&instance, config).run(&initial).expect("run");
/// assert_eq!(result.best_value, 12.0);
/// ```
pub struct TabuSearch<'a> {
    instance: &'a Instance,
    config: TabuConfig,
    sink: Option<&'a mut dyn SearchSink>,
    cancel: Option<CancellationToken>,
}

impl<'a> TabuSearch<'a> {
    pub fn new(instance: &'a Instance, config: TabuConfig) -> Self {
        Self {
            instance,
            config,
            sink: None,
            cancel: None,
        }
    }

    /// Attaches a sink notified on improvements and every `report_interval`
    /// iterations.
    pub fn with_sink(mut self, sink: &'a mut dyn SearchSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Attaches a token polled once per outer iteration.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn config(&self) -> &TabuConfig {
        &self.config
    }

    /// Executes the search from `initial`.
    ///
    /// Fails before the first iteration if the configuration or the tour is
    /// invalid, and aborts with no partial result if evaluation faults
    /// mid-run.
    pub fn run(&mut self, initial: &Tour) -> Result<TabuResult> {
        self.config.validate()?;
        let instance = self.instance;
        let config = &self.config;

        let mut state = SearchState::new(instance, initial.clone())?;
        let mut tabu = TabuMemory::new(config.tabu_tenure);
        let mut frequency = FrequencyMemory::new(instance.size());
        let mut controller = ReactiveController::new(config, state.current_value);
        let mut rng = u_numflow::random::create_rng(config.seed_or_default());
        let mut stats = SearchStats::default();
        let mut trace = Vec::new();

        log::debug!(
            "solver.run: start n={} value={:.4} tenure={} max_iterations={}",
            instance.size(),
            state.current_value,
            config.tabu_tenure,
            config.max_iterations
        );

        let mut iteration = 0;
        let termination = loop {
            if iteration >= config.max_iterations {
                break Termination::IterationLimit;
            }
            if self.cancel.as_ref().is_some_and(|t| t.is_cancelled()) {
                break Termination::Cancelled;
            }

            let Some(mv) = best_admissible_move(instance, &state.current_tour, &tabu) else {
                break Termination::NeighborhoodExhausted;
            };
            state.apply_move(instance, mv, &mut tabu, &mut frequency)?;
            stats.moves_applied += 1;
            iteration += 1;

            let phase = controller.react(
                instance,
                &mut state,
                &mut tabu,
                &mut frequency,
                &mut stats,
                &mut rng,
            )?;
            let improved = phase == Phase::Intensify;
            if improved {
                stats.best_iteration = iteration;
            }

            let record = TraceRecord {
                iteration,
                cost: state.current_value,
                best_cost: state.best_value,
                tenure: tabu.tenure(),
                improved,
                phase,
            };
            if config.record_trace {
                trace.push(record);
            }
            let interval_hit =
                config.report_interval > 0 && iteration % config.report_interval == 0;
            if improved || interval_hit {
                if let Some(sink) = self.sink.as_mut() {
                    if let Err(e) = sink.on_iteration(&record) {
                        stats.sink_failures += 1;
                        log::warn!("solver.sink: iteration={iteration} failed: {e}");
                    }
                }
            }
        };
        stats.iterations = iteration;

        log::debug!(
            "solver.run: done iterations={} best={:.4} termination={:?} intensify={} diversify={}",
            iteration,
            state.best_value,
            termination,
            stats.intensifications,
            stats.diversifications
        );

        Ok(TabuResult {
            best_tour: state.best_tour,
            best_value: state.best_value,
            termination,
            stats,
            trace,
        })
    }
}

/// Runs a search without sink or cancellation.
pub fn solve(instance: &Instance, initial: &Tour, config: TabuConfig) -> Result<TabuResult> {
    TabuSearch::new(instance, config).run(initial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::generator::random_symmetric;
    use crate::tabu::{SinkError, TraceRecorder};
    use proptest::prelude::*;

    fn scenario() -> Instance {
        Instance::from_rows(vec![
            vec![0.0, 1.0, 9.0, 9.0],
            vec![1.0, 0.0, 1.0, 9.0],
            vec![9.0, 1.0, 0.0, 1.0],
            vec![9.0, 9.0, 1.0, 0.0],
        ])
        .expect("valid")
    }

    fn random_instance(n: usize, seed: u64) -> Instance {
        let mut rng = u_numflow::random::create_rng(seed);
        let costs = random_symmetric(n, 1.0, 100.0, &mut rng).expect("costs");
        Instance::new(costs).expect("valid")
    }

    #[test]
    fn test_scenario_converges_to_optimal_cycle() {
        let instance = scenario();
        let initial = Tour::new(vec![0, 2, 1, 3, 0], 4).expect("tour");
        let config = TabuConfig::default()
            .with_tabu_tenure(2)
            .with_max_iterations(50);
        let result = solve(&instance, &initial, config).expect("run");

        assert_eq!(result.best_value, 12.0);
        let seq = result.best_tour.sequence();
        assert!(seq == [0, 1, 2, 3, 0] || seq == [0, 3, 2, 1, 0], "got {seq:?}");
        assert!(result.stats.iterations <= 50);
        assert_eq!(result.stats.best_iteration, 1);
    }

    #[test]
    fn test_uniform_costs_never_improve() {
        let instance = Instance::from_rows(vec![vec![3.0; 7]; 7]).expect("valid");
        let initial = Tour::new(vec![0, 4, 2, 6, 1, 5, 3, 0], 7).expect("tour");
        let config = TabuConfig::default()
            .with_max_iterations(300)
            .with_trace(true);
        let result = solve(&instance, &initial, config).expect("run");

        assert_eq!(result.best_value, 21.0);
        assert_eq!(result.best_tour, initial);
        assert_eq!(result.stats.intensifications, 0);
        assert!(result.trace.iter().all(|r| r.best_cost == 21.0 && !r.improved));
        assert!(result.stats.diversifications > 0);
    }

    #[test]
    fn test_zero_iterations_returns_initial() {
        let instance = random_instance(9, 5);
        let mut rng = u_numflow::random::create_rng(1);
        let initial = Tour::random(9, &mut rng);
        let config = TabuConfig::default().with_max_iterations(0);
        let result = solve(&instance, &initial, config).expect("run");

        assert_eq!(result.best_tour, initial);
        assert_eq!(result.best_value, instance.evaluate(&initial));
        assert_eq!(result.termination, Termination::IterationLimit);
        assert_eq!(result.stats.iterations, 0);
    }

    #[test]
    fn test_invalid_tour_fails_fast() {
        let instance = scenario();
        let bad = Tour::identity(5);
        let err = solve(&instance, &bad, TabuConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidTour(_)));
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let instance = scenario();
        let config = TabuConfig::default().with_tabu_tenure(9).with_tenure_bounds(1, 4);
        let err = solve(&instance, &Tour::identity(4), config).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_exhausted_neighborhood_terminates() {
        // Three nodes have a single move; tenure >= 1 makes it tabu right away.
        let instance = Instance::from_rows(vec![
            vec![0.0, 1.0, 2.0],
            vec![3.0, 0.0, 4.0],
            vec![5.0, 6.0, 0.0],
        ])
        .expect("valid");
        let config = TabuConfig::default().with_tabu_tenure(2).with_max_iterations(100);
        let result = solve(&instance, &Tour::identity(3), config).expect("run");
        assert_eq!(result.termination, Termination::NeighborhoodExhausted);
        assert_eq!(result.stats.iterations, 1);
    }

    #[test]
    fn test_intensification_without_moves_ends_early() {
        // The single move improves 15 -> 3; its pair stays tabu through the burst.
        let instance = Instance::from_rows(vec![
            vec![0.0, 5.0, 1.0],
            vec![1.0, 0.0, 5.0],
            vec![5.0, 1.0, 0.0],
        ])
        .expect("valid");
        let config = TabuConfig::default().with_tabu_tenure(2).with_max_iterations(50);
        let result = solve(&instance, &Tour::identity(3), config).expect("run");

        assert_eq!(result.termination, Termination::NeighborhoodExhausted);
        assert_eq!(result.best_value, 3.0);
        assert_eq!(result.best_tour.sequence(), &[0, 2, 1, 0]);
        assert_eq!(result.stats.iterations, 1);
        assert_eq!(result.stats.intensifications, 1);
        assert_eq!(result.stats.intensification_iterations, 0);
        assert_eq!(result.stats.best_iteration, 1);
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let instance = random_instance(15, 21);
        let mut rng = u_numflow::random::create_rng(8);
        let initial = Tour::random(15, &mut rng);
        let config = TabuConfig::default()
            .with_max_iterations(400)
            .with_trace(true)
            .with_seed(99);

        let a = solve(&instance, &initial, config.clone()).expect("run a");
        let b = solve(&instance, &initial, config).expect("run b");
        assert_eq!(a.best_tour, b.best_tour);
        assert_eq!(a.best_value, b.best_value);
        assert_eq!(a.trace, b.trace);
        assert_eq!(a.stats, b.stats);
    }

    #[test]
    fn test_best_is_monotonic_and_exact() {
        let instance = random_instance(12, 3);
        let mut rng = u_numflow::random::create_rng(4);
        let initial = Tour::random(12, &mut rng);
        let config = TabuConfig::default()
            .with_max_iterations(500)
            .with_trace(true);
        let result = solve(&instance, &initial, config).expect("run");

        let mut last = instance.evaluate(&initial);
        for record in &result.trace {
            assert!(record.best_cost <= last);
            last = record.best_cost;
        }
        assert!(instance.check_tour(&result.best_tour).is_ok());
        assert_eq!(result.best_value, instance.evaluate(&result.best_tour));
    }

    #[test]
    fn test_sink_sees_improvements_and_intervals() {
        let instance = random_instance(10, 17);
        let initial = Tour::identity(10);
        let config = TabuConfig::default()
            .with_max_iterations(100)
            .with_report_interval(25)
            .with_trace(true);

        let mut recorder = TraceRecorder::new();
        let result = TabuSearch::new(&instance, config)
            .with_sink(&mut recorder)
            .run(&initial)
            .expect("run");

        let expected: Vec<usize> = result
            .trace
            .iter()
            .filter(|r| r.improved || r.iteration % 25 == 0)
            .map(|r| r.iteration)
            .collect();
        let seen: Vec<usize> = recorder.records().iter().map(|r| r.iteration).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_failing_sink_does_not_abort() {
        let instance = random_instance(10, 2);
        let config = TabuConfig::default()
            .with_max_iterations(60)
            .with_report_interval(1);
        let mut failing = |_: &TraceRecord| -> std::result::Result<(), SinkError> {
            Err("disk full".into())
        };
        let result = TabuSearch::new(&instance, config)
            .with_sink(&mut failing)
            .run(&Tour::identity(10))
            .expect("run");
        assert_eq!(result.stats.sink_failures, result.stats.iterations);
        assert!(result.stats.iterations > 0);
    }

    #[test]
    fn test_cancelled_token_stops_immediately() {
        let instance = scenario();
        let token = CancellationToken::new();
        token.cancel();
        let initial = Tour::new(vec![0, 2, 1, 3, 0], 4).expect("tour");
        let result = TabuSearch::new(&instance, TabuConfig::default())
            .with_cancellation(token)
            .run(&initial)
            .expect("run");
        assert_eq!(result.termination, Termination::Cancelled);
        assert_eq!(result.best_tour, initial);
    }

    #[test]
    fn test_cancel_from_sink() {
        let instance = random_instance(12, 9);
        let token = CancellationToken::new();
        let remote = token.clone();
        let mut stop_at_ten = move |r: &TraceRecord| -> std::result::Result<(), SinkError> {
            if r.iteration == 10 {
                remote.cancel();
            }
            Ok(())
        };
        let config = TabuConfig::default()
            .with_max_iterations(1000)
            .with_report_interval(1);
        let result = TabuSearch::new(&instance, config)
            .with_sink(&mut stop_at_ten)
            .with_cancellation(token)
            .run(&Tour::identity(12))
            .expect("run");
        assert_eq!(result.termination, Termination::Cancelled);
        assert_eq!(result.stats.iterations, 10);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_best_tour_is_permutation(n in 3usize..14, seed in 0u64..1000) {
            let instance = random_instance(n, seed);
            let mut rng = u_numflow::random::create_rng(seed ^ 0xA5A5);
            let initial = Tour::random(n, &mut rng);
            let config = TabuConfig::default().with_max_iterations(150).with_seed(seed);
            let result = solve(&instance, &initial, config).expect("run");

            prop_assert!(instance.check_tour(&result.best_tour).is_ok());
            prop_assert!(result.best_value <= instance.evaluate(&initial));
        }
    }
}
