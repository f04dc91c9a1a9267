//! # u-drilling
//!
//! Drilling-sequence optimization: a reactive tabu search over depot-anchored
//! tours with directional (possibly asymmetric) travel costs.
//!
//! ## Modules
//!
//! - [`distance`]: dense directional cost matrix
//! - [`models`]: instance, tour and 2-opt move types
//! - [`tabu`]: reactive tabu search (tenure adaptation, intensification, diversification)
//! - [`portfolio`]: independent parallel multi-start runs
//! - [`generator`]: random and circuit-board instance construction
//!
//! ## Example
//!
//! ```
//! use u_drilling::models::{Instance, Tour};
//! use u_drilling::tabu::{solve, TabuConfig};
//!
//! let instance = Instance::from_rows(vec![
//!     vec![0.0, 1.0, 9.0, 9.0],
//!     vec![1.0, 0.0, 1.0, 9.0],
//!     vec![9.0, 1.0, 0.0, 1.0],
//!     vec![9.0, 9.0, 1.0, 0.0],
//! ])?;
//! let initial = Tour::new(vec![0, 2, 1, 3, 0], 4)?;
//! let result = solve(&instance, &initial, TabuConfig::default().with_tabu_tenure(2))?;
//! assert_eq!(result.best_value, 12.0);
//! # Ok::<(), u_drilling::Error>(())
//! ```

pub mod distance;
mod error;
pub mod generator;
pub mod models;
pub mod portfolio;
pub mod tabu;

pub use error::{Error, Result};
