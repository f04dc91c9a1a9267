//! Independent multi-start runs.
//!
//! Each run owns its seed, random initial tour, tour state and memories; the
//! only shared data is the read-only [`Instance`] and an optional
//! [`CancellationToken`]. Outcomes are reported per run and never merged.

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::models::{Instance, Tour};
use crate::tabu::{CancellationToken, TabuConfig, TabuResult, TabuSearch};

/// Outcome of one run of a [`MultiStart`] batch.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub index: usize,
    pub seed: u64,
    pub result: Result<TabuResult>,
}

/// Results of a batch, in run order.
#[derive(Debug, Clone)]
pub struct PortfolioResult {
    pub runs: Vec<RunOutcome>,
}

impl PortfolioResult {
    /// Lowest-cost successful run; ties go to the lower index.
    pub fn best(&self) -> Option<&RunOutcome> {
        self.runs
            .iter()
            .filter(|r| r.result.is_ok())
            .min_by(|a, b| {
                let va = a.result.as_ref().map_or(f64::INFINITY, |r| r.best_value);
                let vb = b.result.as_ref().map_or(f64::INFINITY, |r| r.best_value);
                va.total_cmp(&vb)
            })
    }

    pub fn failures(&self) -> impl Iterator<Item = (usize, &Error)> {
        self.runs
            .iter()
            .filter_map(|r| r.result.as_ref().err().map(|e| (r.index, e)))
    }
}

/// Parallel batch of searches on one instance.
///
/// Run `i` uses seed `base_seed + i` both for its random initial tour and
/// for its search.
///
/// # Examples
///
/// ```
/// use u_drilling::generator::random_symmetric;
/// use u_drilling::models::Instance;
/// use u_drilling::portfolio::MultiStart;
/// use u_drilling::tabu::TabuConfig;
///
/// let mut rng = u_numflow::random::create_rng(1);
/// let instance = Instance::new(random_symmetric(12, 1.0, 100.0, &mut rng).unwrap()).unwrap();
/// let config = TabuConfig::default().with_max_iterations(200);
///
/// let batch = MultiStart::new(&instance, config).with_runs(4).run().unwrap();
/// assert_eq!(batch.runs.len(), 4);
/// assert!(batch.best().is_some());
/// ```
pub struct MultiStart<'a> {
    instance: &'a Instance,
    config: TabuConfig,
    runs: usize,
    base_seed: u64,
    threads: Option<usize>,
    cancel: Option<CancellationToken>,
}

impl<'a> MultiStart<'a> {
    pub fn new(instance: &'a Instance, config: TabuConfig) -> Self {
        let base_seed = config.seed_or_default();
        Self {
            instance,
            config,
            runs: 4,
            base_seed,
            threads: None,
            cancel: None,
        }
    }

    pub fn with_runs(mut self, runs: usize) -> Self {
        self.runs = runs;
        self
    }

    pub fn with_base_seed(mut self, seed: u64) -> Self {
        self.base_seed = seed;
        self
    }

    /// Limits the worker pool; defaults to rayon's global pool.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Shares one token across every run.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Seed assigned to run `index`.
    pub fn seed_for(&self, index: usize) -> u64 {
        self.base_seed.wrapping_add(index as u64)
    }

    /// Executes every run and collects the outcomes.
    ///
    /// Fails only when the configuration is invalid or the worker pool cannot
    /// be built; individual run failures are reported in the result.
    pub fn run(&self) -> Result<PortfolioResult> {
        self.config.validate()?;
        log::debug!(
            "portfolio.run: start runs={} base_seed={} n={}",
            self.runs,
            self.base_seed,
            self.instance.size()
        );

        let runs = match self.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| Error::invalid_config(format!("rayon pool: {e}")))?;
                pool.install(|| self.run_all())
            }
            None => self.run_all(),
        };

        let failed = runs.iter().filter(|r| r.result.is_err()).count();
        if failed > 0 {
            log::warn!("portfolio.run: {failed}/{} runs failed", runs.len());
        }
        Ok(PortfolioResult { runs })
    }

    fn run_all(&self) -> Vec<RunOutcome> {
        (0..self.runs)
            .into_par_iter()
            .map(|index| {
                let seed = self.seed_for(index);
                RunOutcome {
                    index,
                    seed,
                    result: self.run_one(seed),
                }
            })
            .collect()
    }

    fn run_one(&self, seed: u64) -> Result<TabuResult> {
        let mut rng = u_numflow::random::create_rng(seed);
        let initial = Tour::random(self.instance.size(), &mut rng);
        let config = self.config.clone().with_seed(seed);

        let mut search = TabuSearch::new(self.instance, config);
        if let Some(token) = &self.cancel {
            search = search.with_cancellation(token.clone());
        }
        let result = search.run(&initial)?;
        log::debug!(
            "portfolio.run: seed={seed} best={:.4} termination={:?}",
            result.best_value,
            result.termination
        );
        Ok(result)
    }
}
