//! Dense directional cost matrix.

use crate::error::{Error, Result};

/// A dense n×n cost matrix stored in row-major order.
///
/// Costs are looked up directionally: `get(i, j)` may differ from
/// `get(j, i)`. Diagonal entries are stored but never read by the search.
///
/// # Examples
///
/// ```
/// use u_drilling::distance::CostMatrix;
///
/// let cm = CostMatrix::from_rows(vec![
///     vec![0.0, 3.0, 7.0],
///     vec![4.0, 0.0, 1.0],
///     vec![2.0, 5.0, 0.0],
/// ])
/// .expect("square matrix");
/// assert_eq!(cm.get(0, 1), 3.0);
/// assert_eq!(cm.get(1, 0), 4.0);
/// assert_eq!(cm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    data: Vec<f64>,
    size: usize,
}

impl CostMatrix {
    /// Creates a cost matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Builds a symmetric Euclidean cost matrix from hole coordinates.
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        let n = points.len();
        let mut cm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = points[i].0 - points[j].0;
                let dy = points[i].1 - points[j].1;
                let d = (dx * dx + dy * dy).sqrt();
                cm.set(i, j, d);
                cm.set(j, i, d);
            }
        }
        cm
    }

    /// Creates a cost matrix from an explicit row-major n×n buffer.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Creates a cost matrix from nested rows.
    ///
    /// Fails if any row length differs from the number of rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(Error::invalid_instance(format!(
                    "cost matrix is not square: row {i} has {} entries, expected {size}",
                    row.len()
                )));
            }
            data.extend(row);
        }
        Self::from_data(size, data)
            .ok_or_else(|| Error::invalid_instance("cost matrix buffer has the wrong length"))
    }

    /// Returns the cost of travelling from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the cost of travelling from `from` to `to`.
    pub fn set(&mut self, from: usize, to: usize, cost: f64) {
        self.data[from * self.size + to] = cost;
    }

    /// Number of nodes in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns the first off-diagonal entry that is negative or not finite.
    pub fn find_invalid_entry(&self) -> Option<(usize, usize, f64)> {
        for i in 0..self.size {
            for j in 0..self.size {
                if i == j {
                    continue;
                }
                let c = self.get(i, j);
                if !c.is_finite() || c < 0.0 {
                    return Some((i, j, c));
                }
            }
        }
        None
    }

    /// Sum over rows of the largest off-diagonal entry.
    ///
    /// Every tour leaves each node exactly once, so this bounds any tour cost.
    pub fn row_max_sum(&self) -> f64 {
        (0..self.size)
            .map(|i| {
                (0..self.size)
                    .filter(|&j| j != i)
                    .map(|j| self.get(i, j))
                    .fold(0.0, f64::max)
            })
            .sum()
    }
}
