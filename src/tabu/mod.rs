//! Reactive tabu search for drilling sequences.
//!
//! - [`neighborhood`]: 2-opt move generation with a node-pair tabu filter
//! - [`TabuMemory`]: bounded FIFO of recently moved node pairs
//! - [`FrequencyMemory`]: per-pair move counts for diversification
//! - [`ReactiveController`]: tenure adaptation, intensification, diversification
//! - [`TabuSearch`]: the search loop with sink and cancellation hooks

mod cancel;
pub mod config;
mod frequency;
mod memory;
pub mod neighborhood;
mod reactive;
mod result;
mod runner;
mod sink;
mod state;

pub use cancel::CancellationToken;
pub use config::TabuConfig;
pub use frequency::FrequencyMemory;
pub use memory::TabuMemory;
pub use neighborhood::{best_admissible_move, two_opt_delta};
pub use reactive::{Phase, ReactiveController};
pub use result::{SearchStats, TabuResult, Termination};
pub use runner::{solve, TabuSearch};
pub use sink::{
    BestSnapshotFilter, NoopSink, SearchSink, SinkError, TraceRecord, TraceRecorder,
};
pub use state::SearchState;
