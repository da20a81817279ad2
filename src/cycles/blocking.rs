//! Johnson blocking bookkeeping for one pivot.
//!
//! `BlockState` owns the `blocked` mask and the dependency lists `B[w]`. It is a
//! plain value: a forked branch gets its own clone and nothing it does can leak
//! into a sibling.

use crate::graph::{Vertex, VertexMask};

/// Per-pivot blocked flags plus dependency lists.
///
/// `B[w]` holds the vertices that must be unblocked when `w` is unblocked.
/// Entries are unique within one list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockState {
    blocked: VertexMask,
    deps: Vec<Vec<Vertex>>,
}

impl BlockState {
    /// Fresh state over `n` vertices: nothing blocked, every `B[w]` empty.
    pub fn new(n: usize) -> Self {
        Self {
            blocked: VertexMask::new(n),
            deps: vec![Vec::new(); n],
        }
    }

    /// Returns whether `v` is currently blocked.
    #[inline]
    pub fn is_blocked(&self, v: Vertex) -> bool {
        self.blocked.contains(v)
    }

    /// Blocks `v`.
    #[inline]
    pub fn block(&mut self, v: Vertex) {
        self.blocked.insert(v);
    }

    /// Records that unblocking `w` must also unblock `v` (adds `v` to `B[w]`).
    pub fn record_dependency(&mut self, w: Vertex, v: Vertex) {
        let list = &mut self.deps[w];
        if !list.contains(&v) {
            list.push(v);
        }
    }

    /// Current contents of `B[w]`.
    pub fn dependents(&self, w: Vertex) -> &[Vertex] {
        &self.deps[w]
    }

    /// Cascade-unblocks `u`.
    ///
    /// Clears `blocked[u]` and drains `B[u]`; every drained vertex that is still
    /// blocked is unblocked the same way. Runs on an explicit worklist so long
    /// dependency chains cannot overflow the stack. Unblocking a vertex that is
    /// already unblocked with an empty `B` is a no-op.
    pub fn unblock(&mut self, u: Vertex) {
        self.blocked.remove(u);
        let mut pending = core::mem::take(&mut self.deps[u]);
        while let Some(w) = pending.pop() {
            if self.blocked.remove(w) {
                pending.append(&mut self.deps[w]);
            }
        }
    }

    /// Number of blocked vertices.
    pub fn blocked_count(&self) -> usize {
        self.blocked.count()
    }
}
