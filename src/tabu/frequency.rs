//! Long-term frequency memory.

use crate::models::NodePair;

/// Symmetric counts of how often each node pair was the attribute of an
/// applied move.
///
/// Counts only grow during a run; a fresh memory is created per run.
#[derive(Debug, Clone)]
pub struct FrequencyMemory {
    counts: Vec<u64>,
    size: usize,
}

impl FrequencyMemory {
    pub fn new(size: usize) -> Self {
        Self {
            counts: vec![0; size * size],
            size,
        }
    }

    /// Counts one applied move with the given attribute.
    pub fn record(&mut self, pair: NodePair) {
        let (a, b) = (pair.low(), pair.high());
        self.counts[a * self.size + b] += 1;
        if a != b {
            self.counts[b * self.size + a] += 1;
        }
    }

    pub fn count(&self, a: usize, b: usize) -> u64 {
        self.counts[a * self.size + b]
    }

    /// Counts below this are under-used (`size / 4`).
    pub fn under_used_threshold(&self) -> u64 {
        (self.size / 4) as u64
    }

    pub fn is_under_used(&self, a: usize, b: usize) -> bool {
        self.count(a, b) < self.under_used_threshold()
    }

    /// Every under-used pair of distinct non-depot nodes, lowest first.
    pub fn under_used_pairs(&self) -> Vec<NodePair> {
        let threshold = self.under_used_threshold();
        let mut pairs = Vec::new();
        for a in 1..self.size {
            for b in (a + 1)..self.size {
                if self.count(a, b) < threshold {
                    pairs.push(NodePair::new(a, b));
                }
            }
        }
        pairs
    }

    /// Sum of counts over unordered pairs, i.e. the number of recorded moves.
    pub fn total(&self) -> u64 {
        let mut total = 0;
        for a in 0..self.size {
            for b in a..self.size {
                total += self.count(a, b);
            }
        }
        total
    }
}
