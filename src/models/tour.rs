//! Depot-anchored tour.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A drilling sequence: `0, p1, ..., p(n-1), 0`.
///
/// The first and last positions always hold the depot (node 0); every other
/// node appears exactly once in between. Cloning produces an independent
/// copy, which is how checkpoints such as "best so far" are kept.
///
/// # Examples
///
/// ```
/// use u_drilling::models::Tour;
///
/// let tour = Tour::new(vec![0, 2, 1, 3, 0], 4).expect("valid permutation");
/// assert_eq!(tour.size(), 4);
/// assert_eq!(tour.position_of(3), Some(3));
/// assert!(Tour::new(vec![0, 2, 2, 3, 0], 4).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tour {
    sequence: Vec<usize>,
}

impl Tour {
    /// Wraps a sequence after checking it against an instance of `size` nodes.
    pub fn new(sequence: Vec<usize>, size: usize) -> Result<Self> {
        Self::check_sequence(&sequence, size)?;
        Ok(Self { sequence })
    }

    /// The tour `0, 1, ..., size-1, 0`.
    pub fn identity(size: usize) -> Self {
        let mut sequence: Vec<usize> = (0..size).collect();
        sequence.push(0);
        Self { sequence }
    }

    /// A uniformly random tour over `size` nodes.
    pub fn random<R: Rng>(size: usize, rng: &mut R) -> Self {
        let mut tour = Self::identity(size);
        let interior = &mut tour.sequence[1..size.max(1)];

        // Fisher-Yates shuffle
        for i in (1..interior.len()).rev() {
            let j = rng.random_range(0..=i as u64) as usize;
            interior.swap(i, j);
        }
        tour
    }

    /// Verifies the depot-anchored permutation invariant.
    pub fn check_sequence(sequence: &[usize], size: usize) -> Result<()> {
        if size == 0 {
            return Err(Error::invalid_tour("a tour needs at least the depot"));
        }
        if sequence.len() != size + 1 {
            return Err(Error::invalid_tour(format!(
                "length {} does not match {} nodes (expected {})",
                sequence.len(),
                size,
                size + 1
            )));
        }
        if sequence[0] != 0 || sequence[size] != 0 {
            return Err(Error::invalid_tour("tour must start and end at the depot"));
        }

        let mut seen = vec![false; size];
        seen[0] = true;
        for (pos, &node) in sequence[1..size].iter().enumerate() {
            if node >= size {
                return Err(Error::invalid_tour(format!(
                    "node {node} at position {} is out of range",
                    pos + 1
                )));
            }
            if seen[node] {
                return Err(Error::invalid_tour(format!(
                    "node {node} at position {} is visited twice",
                    pos + 1
                )));
            }
            seen[node] = true;
        }
        Ok(())
    }

    /// Node indices in visit order, depot at both ends.
    pub fn sequence(&self) -> &[usize] {
        &self.sequence
    }

    /// Consumes the tour, returning its sequence.
    pub fn into_sequence(self) -> Vec<usize> {
        self.sequence
    }

    /// Number of nodes including the depot.
    pub fn size(&self) -> usize {
        self.sequence.len() - 1
    }

    /// Node at sequence position `pos`.
    #[inline]
    pub fn node_at(&self, pos: usize) -> usize {
        self.sequence[pos]
    }

    /// Position of `node` among the interior positions, if present.
    pub fn position_of(&self, node: usize) -> Option<usize> {
        let last = self.sequence.len() - 1;
        self.sequence[1..last]
            .iter()
            .position(|&n| n == node)
            .map(|p| p + 1)
    }

    /// Reverses positions `from..=to` in place.
    pub(crate) fn reverse_segment(&mut self, from: usize, to: usize) {
        self.sequence[from..=to].reverse();
    }

    /// Exchanges the nodes at two positions.
    pub(crate) fn swap_positions(&mut self, a: usize, b: usize) {
        self.sequence.swap(a, b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let t = Tour::identity(4);
        assert_eq!(t.sequence(), &[0, 1, 2, 3, 0]);
        assert_eq!(t.size(), 4);
    }

    #[test]
    fn test_check_sequence_errors() {
        assert!(Tour::new(vec![0, 1, 2, 0], 4).is_err()); // too short
        assert!(Tour::new(vec![1, 0, 2, 3, 1], 4).is_err()); // not depot-anchored
        assert!(Tour::new(vec![0, 1, 4, 3, 0], 4).is_err()); // out of range
        assert!(Tour::new(vec![0, 1, 0, 3, 0], 4).is_err()); // depot repeated
        assert!(Tour::new(vec![0, 3, 1, 3, 0], 4).is_err()); // duplicate
        assert!(Tour::new(vec![0, 3, 1, 2, 0], 4).is_ok());
    }

    #[test]
    fn test_random_is_valid_permutation() {
        let mut rng = u_numflow::random::create_rng(42);
        for _ in 0..20 {
            let t = Tour::random(9, &mut rng);
            assert!(Tour::check_sequence(t.sequence(), 9).is_ok());
        }
    }

    #[test]
    fn test_random_is_seed_deterministic() {
        let mut a = u_numflow::random::create_rng(7);
        let mut b = u_numflow::random::create_rng(7);
        assert_eq!(Tour::random(12, &mut a), Tour::random(12, &mut b));
    }

    #[test]
    fn test_reverse_and_swap() {
        let mut t = Tour::identity(6);
        t.reverse_segment(2, 4);
        assert_eq!(t.sequence(), &[0, 1, 4, 3, 2, 5, 0]);
        t.swap_positions(1, 5);
        assert_eq!(t.sequence(), &[0, 5, 4, 3, 2, 1, 0]);
        assert_eq!(t.position_of(5), Some(1));
        assert_eq!(t.position_of(0), None);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut t = Tour::identity(5);
        let snapshot = t.clone();
        t.reverse_segment(1, 4);
        assert_eq!(snapshot.sequence(), &[0, 1, 2, 3, 4, 0]);
        assert_ne!(snapshot, t);
    }
}
