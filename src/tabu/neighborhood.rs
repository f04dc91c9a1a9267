//! 2-opt neighborhood with tabu filtering.
//!
//! # Algorithm
//!
//! For every pair of positions `1 <= a < b <= n-1` (the depot at both ends
//! is never moved), reversing the segment `[a..=b]` replaces edges
//! `(h, i)` and `(j, l)` by `(h, j)` and `(i, l)`, where
//! `h = t[a-1], i = t[a], j = t[b], l = t[b+1]`:
//!
//! ```text
//! delta = c(h, j) + c(i, l) - c(h, i) - c(j, l)
//! ```
//!
//! Costs are read in the stored direction and the interior of the segment is
//! not re-priced, so on asymmetric matrices `delta` ranks moves but is only
//! exact when the reversed interior costs the same in both directions.
//!
//! A candidate whose endpoint nodes form a tabu pair is skipped, even if it
//! would reach a new global best: there is no aspiration criterion.
//!
//! # Complexity
//!
//! O(n²) per call.

use crate::models::{Instance, Tour, TwoOptMove};

use super::TabuMemory;

/// Cost change from reversing positions `from..=to` of `tour`.
pub fn two_opt_delta(instance: &Instance, tour: &Tour, from: usize, to: usize) -> f64 {
    let h = tour.node_at(from - 1);
    let i = tour.node_at(from);
    let j = tour.node_at(to);
    let l = tour.node_at(to + 1);

    let old_cost = instance.cost(h, i) + instance.cost(j, l);
    let new_cost = instance.cost(h, j) + instance.cost(i, l);

    new_cost - old_cost
}

/// Best non-tabu 2-opt move, or `None` when every candidate is tabu.
///
/// Scans in `(from, to)` lexicographic order and keeps a candidate only if
/// its delta is strictly below the best so far, so the earliest candidate
/// wins ties. The scan starts from the instance sentinel, so `None` is the
/// "sentinel move" of the search loop.
///
/// # Panics
///
/// Panics if `tour` was not built for an instance of `instance.size()`
/// nodes; see [`Instance::check_tour`].
///
/// # Examples
///
/// ```
/// use u_drilling::models::{Instance, Tour};
/// use u_drilling::tabu::{best_admissible_move, TabuMemory};
///
/// let instance = Instance::from_rows(vec![
///     vec![0.0, 1.0, 9.0, 9.0],
///     vec![1.0, 0.0, 1.0, 9.0],
///     vec![9.0, 1.0, 0.0, 1.0],
///     vec![9.0, 9.0, 1.0, 0.0],
/// ])
/// .expect("valid instance");
/// let tour = Tour::new(vec![0, 2, 1, 3, 0], 4).expect("valid tour");
///
/// let mv = best_admissible_move(&instance, &tour, &TabuMemory::new(2)).expect("a move");
/// assert_eq!((mv.from, mv.to), (1, 2));
/// assert_eq!(mv.cost_delta, -16.0);
/// ```
pub fn best_admissible_move(
    instance: &Instance,
    tour: &Tour,
    tabu: &TabuMemory,
) -> Option<TwoOptMove> {
    debug_assert_eq!(tour.size(), instance.size(), "tour does not match instance");
    let n = tour.size();
    let sentinel = instance.sentinel();
    let mut best = TwoOptMove {
        from: 0,
        to: 0,
        cost_delta: sentinel,
    };

    for a in 1..n - 1 {
        let i = tour.node_at(a);
        for b in (a + 1)..n {
            let j = tour.node_at(b);
            if tabu.is_tabu(i, j) {
                continue;
            }

            let delta = two_opt_delta(instance, tour, a, b);
            if delta < best.cost_delta {
                best = TwoOptMove::new(a, b, delta);
            }
        }
    }

    if best.cost_delta >= sentinel {
        None
    } else {
        Some(best)
    }
}
