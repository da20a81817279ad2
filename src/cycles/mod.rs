//! Simple-cycle enumeration.
//!
//! - `scc`: per-pivot strongly connected component decomposition
//! - `blocking`: Johnson's `blocked` mask and dependency lists
//! - `circuit`: sequential and forking backtracking search
//! - `policy`: when a search node forks
//! - `orchestrator`: the pivot loop and run entry points

pub mod blocking;
pub mod circuit;
pub mod error;
pub mod orchestrator;
pub mod policy;
pub mod scc;

pub use blocking::BlockState;
pub use circuit::{search, search_from, ForkingSearch, SearchContext};
pub use error::EngineError;
pub use orchestrator::{
    count_cycles, count_cycles_bounded, CycleConfig, CycleEnumerator, CycleReport,
};
pub use policy::{SpawnPolicy, MAX_FORK_DEPTH};
pub use scc::{component_of, decompose, Component, SccDecomposer};
