//! 2-opt moves and their tabu attributes.

use serde::{Deserialize, Serialize};

use super::Tour;

/// Unordered pair of node values; `NodePair::new(a, b) == NodePair::new(b, a)`.
///
/// This is the attribute of an applied move for both tabu and frequency
/// bookkeeping. Node values are used rather than positions because
/// positions shift as the tour changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodePair {
    low: usize,
    high: usize,
}

impl NodePair {
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Smaller node value.
    pub fn low(&self) -> usize {
        self.low
    }

    /// Larger node value.
    pub fn high(&self) -> usize {
        self.high
    }
}

/// Reversal of the tour segment between positions `from` and `to` (inclusive).
///
/// `cost_delta` is the signed change in tour cost; negative improves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TwoOptMove {
    pub from: usize,
    pub to: usize,
    pub cost_delta: f64,
}

impl TwoOptMove {
    pub fn new(from: usize, to: usize, cost_delta: f64) -> Self {
        debug_assert!(from < to, "2-opt move requires from < to");
        Self {
            from,
            to,
            cost_delta,
        }
    }

    /// Node values at the move's endpoints, read before the move is applied.
    pub fn attribute(&self, tour: &Tour) -> NodePair {
        NodePair::new(tour.node_at(self.from), tour.node_at(self.to))
    }

    /// Reverses the segment in place.
    pub fn apply(&self, tour: &mut Tour) {
        tour.reverse_segment(self.from, self.to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_pair_is_unordered() {
        assert_eq!(NodePair::new(3, 7), NodePair::new(7, 3));
        let p = NodePair::new(9, 2);
        assert_eq!((p.low(), p.high()), (2, 9));
    }

    #[test]
    fn test_attribute_uses_node_values() {
        let tour = Tour::new(vec![0, 4, 2, 1, 3, 0], 5).expect("tour");
        let mv = TwoOptMove::new(1, 3, -2.0);
        assert_eq!(mv.attribute(&tour), NodePair::new(1, 4));
    }

    #[test]
    fn test_apply_reverses_segment() {
        let mut tour = Tour::new(vec![0, 4, 2, 1, 3, 0], 5).expect("tour");
        TwoOptMove::new(2, 4, 0.0).apply(&mut tour);
        assert_eq!(tour.sequence(), &[0, 4, 3, 1, 2, 0]);
    }
}
