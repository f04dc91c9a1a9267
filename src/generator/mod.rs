//! Instance construction helpers.
//!
//! These only produce [`CostMatrix`](crate::distance::CostMatrix) values;
//! the search never depends on them.
//!
//! - [`random_symmetric`] / [`random_asymmetric`]: uniform random costs
//! - [`sample_board`]: Euclidean costs between holes of a sampled circuit board

mod board;
mod random;

pub use board::{sample_board, BoardConfig, BoardLayout, Footprint};
pub use random::{random_asymmetric, random_symmetric};
