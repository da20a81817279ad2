//! Spawn policy: when a search node forks its branches into pool tasks.
//!
//! Forking trades memory and duplicated work for wall-clock parallelism: every
//! forked branch starts from a private copy of the pivot's blocking state, which
//! forfeits the single-pass amortized bound of the sequential search. The policy
//! decides how much of that trade is made.

use serde::{Deserialize, Serialize};

use crate::concurrency::Accumulation;
use crate::cycles::error::EngineError;

/// Deepest recursion level any policy may fork at.
///
/// Forked and single-successor nodes above this level recurse on the native
/// stack; deeper nodes always continue in the explicit-stack search.
pub const MAX_FORK_DEPTH: usize = 64;

/// Fork thresholds for one enumeration run.
///
/// A node at recursion depth `d` (the pivot is depth 0) with `b` qualifying
/// successors forks iff
///
/// `d < max_fork_depth && min_branch_to_fork <= b && b <= max_branch_to_fork`
///
/// and the pivot is not in its sequential tail: once fewer than
/// `sequential_fallback_ratio * n` vertices remain active, pivots are searched
/// without any forking.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnPolicy {
    /// Nodes at depth `>= max_fork_depth` never fork. `0` disables forking.
    /// Capped at [`MAX_FORK_DEPTH`].
    pub max_fork_depth: usize,
    /// Smallest branching factor worth forking.
    pub min_branch_to_fork: usize,
    /// Largest branching factor that still forks; denser nodes stay inline.
    pub max_branch_to_fork: usize,
    /// Fraction of `n` below which remaining pivots run sequentially.
    pub sequential_fallback_ratio: f64,
    /// How forked tasks report discoveries.
    pub accumulation: Accumulation,
}

impl SpawnPolicy {
    /// Never forks: plain Johnson search.
    pub const fn sequential() -> Self {
        Self {
            max_fork_depth: 0,
            min_branch_to_fork: usize::MAX,
            max_branch_to_fork: usize::MAX,
            sequential_fallback_ratio: 0.0,
            accumulation: Accumulation::PerTask,
        }
    }

    /// Forks at every node shallower than depth 4 with at least two branches;
    /// every discovery is counted atomically.
    pub const fn nested() -> Self {
        Self {
            max_fork_depth: 4,
            min_branch_to_fork: 2,
            max_branch_to_fork: usize::MAX,
            sequential_fallback_ratio: 0.0,
            accumulation: Accumulation::PerDiscovery,
        }
    }

    /// Forks only at the pivot, and only with 4..=64 branches; the last 20% of
    /// pivots run sequentially.
    pub const fn root_only() -> Self {
        Self {
            max_fork_depth: 1,
            min_branch_to_fork: 4,
            max_branch_to_fork: 64,
            sequential_fallback_ratio: 0.2,
            accumulation: Accumulation::PerTask,
        }
    }

    /// Like [`root_only`](Self::root_only) without the upper branching bound.
    pub const fn root_unbounded() -> Self {
        Self {
            max_fork_depth: 1,
            min_branch_to_fork: 4,
            max_branch_to_fork: usize::MAX,
            sequential_fallback_ratio: 0.2,
            accumulation: Accumulation::PerTask,
        }
    }

    /// Returns `true` if no node can ever fork under this policy.
    #[inline]
    pub fn is_sequential(&self) -> bool {
        self.max_fork_depth == 0 || self.min_branch_to_fork > self.max_branch_to_fork
    }

    /// Depth below which nodes may fork, clamped to [`MAX_FORK_DEPTH`].
    #[inline]
    pub fn fork_depth(&self) -> usize {
        self.max_fork_depth.min(MAX_FORK_DEPTH)
    }

    /// Whether a node at `depth` with `branching` qualifying successors forks.
    #[inline]
    pub fn forks_at(&self, depth: usize, branching: usize) -> bool {
        depth < self.fork_depth()
            && branching >= self.min_branch_to_fork
            && branching <= self.max_branch_to_fork
    }

    /// Whether a pivot searched with `remaining_active` of `node_count`
    /// vertices still active falls in the sequential tail.
    #[inline]
    pub fn prefers_sequential(&self, remaining_active: usize, node_count: usize) -> bool {
        (remaining_active as f64) < self.sequential_fallback_ratio * node_count as f64
    }

    /// Checks that the thresholds are coherent.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(0.0..=1.0).contains(&self.sequential_fallback_ratio) {
            return Err(EngineError::InvalidPolicy(format!(
                "sequential_fallback_ratio must be within [0, 1], got {}",
                self.sequential_fallback_ratio
            )));
        }
        if self.max_fork_depth > MAX_FORK_DEPTH {
            return Err(EngineError::InvalidPolicy(format!(
                "max_fork_depth must be at most {MAX_FORK_DEPTH}, got {}",
                self.max_fork_depth
            )));
        }
        if self.max_fork_depth > 0 && self.min_branch_to_fork > self.max_branch_to_fork {
            return Err(EngineError::InvalidPolicy(format!(
                "min_branch_to_fork {} exceeds max_branch_to_fork {}",
                self.min_branch_to_fork, self.max_branch_to_fork
            )));
        }
        Ok(())
    }
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self::root_only()
    }
}
