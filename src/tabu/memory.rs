//! Short-term tabu memory.

use std::collections::VecDeque;

use crate::models::NodePair;

/// FIFO queue of recently applied move attributes.
///
/// Membership is order-independent. The queue never holds more than the
/// tenure in force at the most recent [`record`](Self::record): shrinking
/// the tenure leaves entries in place until the next record, which then
/// evicts as many of the oldest entries as needed.
///
/// # Examples
///
/// ```
/// use u_drilling::models::NodePair;
/// use u_drilling::tabu::TabuMemory;
///
/// let mut tabu = TabuMemory::new(2);
/// tabu.record(NodePair::new(1, 4));
/// assert!(tabu.contains(NodePair::new(4, 1)));
/// tabu.record(NodePair::new(2, 3));
/// tabu.record(NodePair::new(5, 6));
/// assert!(!tabu.contains(NodePair::new(1, 4)));
/// ```
#[derive(Debug, Clone)]
pub struct TabuMemory {
    entries: VecDeque<NodePair>,
    tenure: usize,
}

impl TabuMemory {
    pub fn new(tenure: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(tenure + 1),
            tenure,
        }
    }

    pub fn tenure(&self) -> usize {
        self.tenure
    }

    /// Changes the tenure; takes effect at the next record.
    pub fn set_tenure(&mut self, tenure: usize) {
        self.tenure = tenure;
    }

    /// Appends an attribute, evicting the oldest while over tenure.
    pub fn record(&mut self, pair: NodePair) {
        self.entries.push_back(pair);
        while self.entries.len() > self.tenure {
            self.entries.pop_front();
        }
    }

    pub fn contains(&self, pair: NodePair) -> bool {
        self.entries.contains(&pair)
    }

    /// Convenience form of [`contains`](Self::contains) for raw node values.
    pub fn is_tabu(&self, a: usize, b: usize) -> bool {
        self.contains(NodePair::new(a, b))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forgets every entry. Used only by diversification.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
