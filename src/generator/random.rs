//! Uniform random cost matrices.

use rand::Rng;

use crate::distance::CostMatrix;
use crate::error::{Error, Result};

fn check_range(size: usize, min: f64, max: f64) -> Result<()> {
    if size == 0 {
        return Err(Error::invalid_instance("matrix size must be positive"));
    }
    if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
        return Err(Error::invalid_instance(format!(
            "cost range [{min}, {max}] must be finite, non-negative and ordered"
        )));
    }
    Ok(())
}

/// Symmetric matrix with off-diagonal costs uniform in `[min, max]`.
///
/// # Examples
///
/// ```
/// use u_drilling::generator::random_symmetric;
///
/// let mut rng = u_numflow::random::create_rng(42);
/// let costs = random_symmetric(6, 1.0, 100.0, &mut rng).expect("valid range");
/// assert!(costs.is_symmetric(0.0));
/// ```
pub fn random_symmetric<R: Rng>(
    size: usize,
    min: f64,
    max: f64,
    rng: &mut R,
) -> Result<CostMatrix> {
    check_range(size, min, max)?;
    let mut costs = CostMatrix::new(size);
    for i in 0..size {
        for j in (i + 1)..size {
            let c = rng.random_range(min..=max);
            costs.set(i, j, c);
            costs.set(j, i, c);
        }
    }
    Ok(costs)
}

/// Matrix whose two directions are sampled independently from `[min, max]`.
pub fn random_asymmetric<R: Rng>(
    size: usize,
    min: f64,
    max: f64,
    rng: &mut R,
) -> Result<CostMatrix> {
    check_range(size, min, max)?;
    let mut costs = CostMatrix::new(size);
    for i in 0..size {
        for j in 0..size {
            if i != j {
                costs.set(i, j, rng.random_range(min..=max));
            }
        }
    }
    Ok(costs)
}
