//! Concurrency helpers for the cycle engine.
//!
//! Important: search state is never shared between tasks. Branches receive
//! private copies by value; the only cross-task mutation is the cache-padded
//! cycle counter.

pub mod counter;
pub mod pool;

pub use counter::{Accumulation, CycleCounter, Tally};
pub use pool::{build_pool, fork_join};
