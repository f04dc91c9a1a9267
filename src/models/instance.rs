//! Problem instance: an immutable cost matrix plus its "no move" sentinel.

use crate::distance::CostMatrix;
use crate::error::{Error, Result};

use super::Tour;

/// Sentinel used when the cost matrix does not demand a larger one.
pub const DEFAULT_SENTINEL: f64 = 1e10;

/// One drilling-sequence instance.
///
/// Node 0 is the depot; nodes `1..size` are holes. The instance is
/// validated once on construction and is read-only afterwards, so a single
/// instance can be shared by reference across any number of searches.
///
/// # Examples
///
/// ```
/// use u_drilling::models::{Instance, Tour};
///
/// let instance = Instance::from_rows(vec![
///     vec![0.0, 1.0, 9.0, 9.0],
///     vec![1.0, 0.0, 1.0, 9.0],
///     vec![9.0, 1.0, 0.0, 1.0],
///     vec![9.0, 9.0, 1.0, 0.0],
/// ])
/// .expect("valid instance");
///
/// let tour = Tour::identity(instance.size());
/// assert_eq!(instance.evaluate(&tour), 12.0);
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    costs: CostMatrix,
    sentinel: f64,
}

impl Instance {
    /// Smallest instance with a non-empty 2-opt neighborhood.
    pub const MIN_SIZE: usize = 3;

    /// Validates a cost matrix and wraps it as an instance.
    ///
    /// Rejects matrices with fewer than [`Self::MIN_SIZE`] nodes and
    /// off-diagonal entries that are negative, NaN or infinite.
    pub fn new(costs: CostMatrix) -> Result<Self> {
        let size = costs.size();
        if size < Self::MIN_SIZE {
            return Err(Error::invalid_instance(format!(
                "size {size} is below the minimum of {}",
                Self::MIN_SIZE
            )));
        }
        if let Some((i, j, c)) = costs.find_invalid_entry() {
            return Err(Error::invalid_instance(format!(
                "cost[{i}][{j}] = {c} is not a finite non-negative value"
            )));
        }

        let sentinel = DEFAULT_SENTINEL.max(Self::sentinel_floor(&costs));
        if !sentinel.is_finite() {
            return Err(Error::invalid_instance(
                "costs are too large to bound a tour cost",
            ));
        }
        Ok(Self { costs, sentinel })
    }

    /// Builds an instance from nested rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::new(CostMatrix::from_rows(rows)?)
    }

    /// Overrides the sentinel.
    ///
    /// The sentinel must exceed every attainable tour cost and move delta.
    pub fn with_sentinel(mut self, sentinel: f64) -> Result<Self> {
        let floor = Self::sentinel_floor(&self.costs);
        if !sentinel.is_finite() || sentinel <= floor {
            return Err(Error::invalid_instance(format!(
                "sentinel {sentinel} must be finite and exceed {floor}"
            )));
        }
        self.sentinel = sentinel;
        Ok(self)
    }

    // A 2-opt delta adds at most two edges, so twice the tour bound covers it.
    fn sentinel_floor(costs: &CostMatrix) -> f64 {
        2.0 * costs.row_max_sum() + 1.0
    }

    /// Number of nodes including the depot.
    pub fn size(&self) -> usize {
        self.costs.size()
    }

    /// Directional cost from `from` to `to`.
    #[inline]
    pub fn cost(&self, from: usize, to: usize) -> f64 {
        self.costs.get(from, to)
    }

    /// Underlying cost matrix.
    pub fn costs(&self) -> &CostMatrix {
        &self.costs
    }

    /// Value larger than any attainable tour cost.
    pub fn sentinel(&self) -> f64 {
        self.sentinel
    }

    /// Total cost of a tour: the sum of `cost[t[k]][t[k+1]]`.
    pub fn evaluate(&self, tour: &Tour) -> f64 {
        tour.sequence()
            .windows(2)
            .map(|w| self.cost(w[0], w[1]))
            .sum()
    }

    /// Checks that `tour` is a valid depot-anchored permutation for this instance.
    pub fn check_tour(&self, tour: &Tour) -> Result<()> {
        Tour::check_sequence(tour.sequence(), self.size())
    }
}
