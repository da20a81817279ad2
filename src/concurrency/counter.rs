//! Run-wide cycle accumulator.
//!
//! The counter is the only mutable value shared between search tasks. Each task
//! reports through its own [`Tally`], which either forwards every discovery to
//! the shared atomic or batches them and merges once when the task completes.

use core::sync::atomic::{AtomicU64, Ordering};

use crossbeam_utils::CachePadded;
use serde::{Deserialize, Serialize};

/// How a search task delivers discoveries to the shared [`CycleCounter`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Accumulation {
    /// One atomic increment per discovered cycle.
    PerDiscovery,
    /// Task-local count, merged with one atomic add when the task completes.
    #[default]
    PerTask,
}

/// A cache-padded, monotonically increasing cycle count.
///
/// Padding keeps the hot counter off the cache lines of neighbouring shared
/// data when many workers report under [`Accumulation::PerDiscovery`].
#[derive(Default)]
pub struct CycleCounter {
    total: CachePadded<AtomicU64>,
}

impl CycleCounter {
    /// Creates a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `cycles` to the total.
    #[inline]
    pub fn add(&self, cycles: u64) {
        if cycles != 0 {
            self.total.fetch_add(cycles, Ordering::Relaxed);
        }
    }

    /// Current total.
    ///
    /// Exact once every task reporting into this counter has joined.
    #[inline]
    pub fn load(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }

    /// Opens a task-scoped tally that reports into this counter.
    pub fn tally(&self, strategy: Accumulation) -> Tally<'_> {
        Tally {
            counter: self,
            strategy,
            pending: 0,
        }
    }
}

/// A task's view of the shared counter.
///
/// Pending discoveries are merged when the tally is dropped, so a task's count
/// reaches the shared total no later than the task's completion.
pub struct Tally<'a> {
    counter: &'a CycleCounter,
    strategy: Accumulation,
    pending: u64,
}

impl Tally<'_> {
    /// Records one discovered cycle.
    #[inline]
    pub fn record(&mut self) {
        match self.strategy {
            Accumulation::PerDiscovery => self.counter.add(1),
            Accumulation::PerTask => self.pending += 1,
        }
    }

    /// Merges pending discoveries into the shared counter.
    pub fn flush(&mut self) {
        self.counter.add(core::mem::take(&mut self.pending));
    }
}

impl Drop for Tally<'_> {
    fn drop(&mut self) {
        self.flush();
    }
}
