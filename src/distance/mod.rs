//! Cost matrices.
//!
//! Provides a dense, directional cost matrix for drilling-sequence problems.

mod matrix;

pub use matrix::CostMatrix;
