//! # `simple-cycles` - Exact Simple-Cycle Counting
//!
//! Counts every simple directed cycle of a graph exactly once, optionally
//! bounded by cycle length, using Johnson's algorithm with per-pivot SCC
//! restriction and a policy-driven parallel search.
//!
//! ## Architecture
//!
//! 1. **Graph store** (`graph`):
//!    - Immutable forward CSR with a counting-sort transpose
//!    - Tolerant text edge-list and strict binary CSR loaders
//!
//! 2. **Engine** (`cycles`):
//!    - Lazy forward/backward-reachability SCC decomposer
//!    - `BlockState`: the `blocked` mask plus dependency lists, owned by value
//!    - Sequential search on an explicit stack, and a forking search that gives
//!      every forked branch a private copy of the blocking state
//!    - `SpawnPolicy`: fork depth window, branching window, sequential tail,
//!      and how discoveries reach the shared counter
//!
//! 3. **Concurrency** (`concurrency`):
//!    - rayon pool and scoped fork/join
//!    - Cache-padded shared cycle counter
//!
//! ### Correctness
//!
//! Cycles are attributed to their minimum vertex: the search rooted at pivot
//! `s` only follows vertices `>= s` inside the component of `s`. Forked
//! branches never observe each other's unblocking, and every fork joins before
//! its node records dependencies, so the count does not depend on scheduling.
//!
//! ## Example
//!
//! ```rust
//! use simple_cycles::{count_cycles, CsrDigraph};
//!
//! let graph = CsrDigraph::from_edges(3, &[(0, 1), (1, 2), (2, 0), (1, 0)]);
//! assert_eq!(count_cycles(&graph), 2);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

pub mod concurrency;
pub mod cycles;
pub mod graph;

pub use concurrency::{Accumulation, CycleCounter};
pub use cycles::{
    count_cycles, count_cycles_bounded, CycleConfig, CycleEnumerator, CycleReport, EngineError,
    SpawnPolicy,
};
pub use graph::{CsrDigraph, GraphError, Vertex, VertexMask};

// Forked branches move their blocking state into pool tasks.
const _: () = {
    const fn assert_send<T: Send>() {}
    assert_send::<cycles::BlockState>();
    assert_send::<cycles::CycleReport>();
};
