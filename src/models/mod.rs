//! Domain model types for drilling-sequence problems.
//!
//! An [`Instance`] holds the read-only cost matrix, a [`Tour`] is a
//! depot-anchored permutation over its nodes, and a [`TwoOptMove`] is the
//! single neighborhood operator, identified for bookkeeping by the
//! [`NodePair`] it touches.

mod instance;
mod moves;
mod tour;

pub use instance::{Instance, DEFAULT_SENTINEL};
pub use moves::{NodePair, TwoOptMove};
pub use tour::Tour;
