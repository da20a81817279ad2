//! Circuit search: enumerates the simple cycles anchored at one pivot.
//!
//! Two engines share the same step rules:
//!
//! - [`search`] / [`search_from`]: Johnson's sequential backtracking on an
//!   explicit frame stack, so path length never touches the thread stack.
//! - [`ForkingSearch`]: policy-driven recursion near the root that forks
//!   branches into rayon tasks, each with a private [`BlockState`] copy, and
//!   hands every non-forking subtree to the sequential engine.
//!
//! Step rules at a node `v` on a path of length `len` (the pivot has length 0),
//! for each qualifying successor `w` (`w >= pivot` and `w` in the component):
//! - `w == pivot`: a cycle closes if `len + 1 <= max_len`;
//! - `w` unblocked: descend if `len + 1 < max_len`.
//!
//! Without a bound both conditions always hold.

use core::sync::atomic::{AtomicU64, Ordering};

use tracing::trace;

use crate::{
    concurrency::{fork_join, CycleCounter, Tally},
    cycles::{blocking::BlockState, policy::SpawnPolicy},
    graph::{CsrDigraph, Vertex, VertexMask},
};

/// Read-only inputs of one pivot's search.
#[derive(Clone, Copy, Debug)]
pub struct SearchContext<'a> {
    graph: &'a CsrDigraph,
    component: &'a VertexMask,
    pivot: Vertex,
    max_len: Option<usize>,
}

impl<'a> SearchContext<'a> {
    /// Search rooted at `pivot`, restricted to the `component` mask.
    ///
    /// # Panics
    /// Panics if `component` does not cover the graph or does not contain
    /// `pivot`.
    pub fn new(
        graph: &'a CsrDigraph,
        component: &'a VertexMask,
        pivot: Vertex,
        max_len: Option<usize>,
    ) -> Self {
        assert_eq!(component.len_bits(), graph.node_count(), "component mask size");
        assert!(component.contains(pivot), "pivot {pivot} outside its component");
        Self {
            graph,
            component,
            pivot,
            max_len,
        }
    }

    /// The anchoring vertex.
    #[inline]
    pub fn pivot(&self) -> Vertex {
        self.pivot
    }

    /// Whether the edge `_ -> w` may be followed from this pivot.
    #[inline]
    pub fn qualifies(&self, w: Vertex) -> bool {
        w >= self.pivot && self.component.contains(w)
    }

    /// Qualifying successors of `v`, parallel edges repeated.
    pub fn successors(&self, v: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        self.graph
            .neighbors(v)
            .iter()
            .copied()
            .filter(move |&w| self.qualifies(w))
    }

    #[inline]
    fn closes(&self, len: usize) -> bool {
        self.max_len.map_or(true, |k| len <= k)
    }

    #[inline]
    fn descends(&self, len: usize) -> bool {
        self.max_len.map_or(true, |k| len < k)
    }

    /// Post-expansion bookkeeping for `v`: cascade-unblock on success,
    /// otherwise leave `v` blocked and register it in `B[w]` of every
    /// qualifying successor.
    fn finish(&self, state: &mut BlockState, v: Vertex, found: bool) {
        if found {
            state.unblock(v);
        } else {
            for w in self.successors(v) {
                state.record_dependency(w, v);
            }
        }
    }
}

#[derive(Clone, Copy)]
struct Frame {
    vertex: Vertex,
    cursor: usize,
    len: usize,
    found: bool,
}

impl Frame {
    fn new(vertex: Vertex, len: usize) -> Self {
        Self {
            vertex,
            cursor: 0,
            len,
            found: false,
        }
    }
}

/// Sequential search of every cycle through the pivot.
///
/// Returns whether any cycle was found. `state` must be fresh (or at least
/// consistent) for this pivot.
pub fn search(ctx: &SearchContext<'_>, state: &mut BlockState, tally: &mut Tally<'_>) -> bool {
    search_from(ctx, state, ctx.pivot, 0, tally)
}

/// Sequential search of the subtree rooted at `start`, reached by a path of
/// `start_len` edges from the pivot.
///
/// Blocks `start` first; the vertices of the path leading to it must already
/// be blocked in `state`.
pub fn search_from(
    ctx: &SearchContext<'_>,
    state: &mut BlockState,
    start: Vertex,
    start_len: usize,
    tally: &mut Tally<'_>,
) -> bool {
    state.block(start);
    let mut stack = vec![Frame::new(start, start_len)];

    while let Some(top) = stack.last_mut() {
        let neighbors = ctx.graph.neighbors(top.vertex);
        if let Some(&w) = neighbors.get(top.cursor) {
            top.cursor += 1;
            if !ctx.qualifies(w) {
                continue;
            }
            let next = top.len + 1;
            if w == ctx.pivot {
                if ctx.closes(next) {
                    tally.record();
                    top.found = true;
                }
            } else if !state.is_blocked(w) && ctx.descends(next) {
                state.block(w);
                stack.push(Frame::new(w, next));
            }
            continue;
        }

        let done = *top;
        stack.pop();
        ctx.finish(state, done.vertex, done.found);
        match stack.last_mut() {
            Some(parent) => parent.found |= done.found,
            None => return done.found,
        }
    }
    false
}

/// Policy-driven parallel search for one pivot.
///
/// A node forks only when [`SpawnPolicy::forks_at`] accepts its depth and
/// branching. A node with exactly one qualifying successor keeps looking for a
/// fork point below it; any other non-forking node runs its whole subtree with
/// [`search_from`], so a state that missed a forked subtree's blocking is never
/// reused for a sibling branch. Forked tasks all join before the node decides
/// between unblocking and recording dependencies.
pub struct ForkingSearch<'a> {
    ctx: SearchContext<'a>,
    policy: SpawnPolicy,
    counter: &'a CycleCounter,
    forks: &'a AtomicU64,
}

impl<'a> ForkingSearch<'a> {
    /// Binds a pivot's context to a policy and the run's shared counters.
    pub fn new(
        ctx: SearchContext<'a>,
        policy: SpawnPolicy,
        counter: &'a CycleCounter,
        forks: &'a AtomicU64,
    ) -> Self {
        Self {
            ctx,
            policy,
            counter,
            forks,
        }
    }

    /// Searches every cycle through the pivot. Must run inside a rayon pool.
    pub fn run(&self, state: &mut BlockState, tally: &mut Tally<'_>) -> bool {
        self.expand(state, self.ctx.pivot, 0, 0, tally)
    }

    fn expand(
        &self,
        state: &mut BlockState,
        v: Vertex,
        len: usize,
        depth: usize,
        tally: &mut Tally<'_>,
    ) -> bool {
        let branching = self.ctx.successors(v).count();
        if self.policy.forks_at(depth, branching) {
            return self.fork(state, v, len, depth, tally);
        }
        if branching == 1 && depth + 1 < self.policy.fork_depth() {
            state.block(v);
            let found = self
                .ctx
                .successors(v)
                .next()
                .is_some_and(|w| self.step(state, w, len, depth, tally));
            self.ctx.finish(state, v, found);
            return found;
        }
        search_from(&self.ctx, state, v, len, tally)
    }

    fn step(
        &self,
        state: &mut BlockState,
        w: Vertex,
        len: usize,
        depth: usize,
        tally: &mut Tally<'_>,
    ) -> bool {
        let next = len + 1;
        if w == self.ctx.pivot {
            let closes = self.ctx.closes(next);
            if closes {
                tally.record();
            }
            closes
        } else if !state.is_blocked(w) && self.ctx.descends(next) {
            self.expand(state, w, next, depth + 1, tally)
        } else {
            false
        }
    }

    fn fork(
        &self,
        state: &mut BlockState,
        v: Vertex,
        len: usize,
        depth: usize,
        tally: &mut Tally<'_>,
    ) -> bool {
        state.block(v);
        let next = len + 1;
        let mut found = false;
        let mut branches = Vec::new();
        for w in self.ctx.successors(v) {
            if w == self.ctx.pivot {
                if self.ctx.closes(next) {
                    tally.record();
                    found = true;
                }
            } else if !state.is_blocked(w) && self.ctx.descends(next) {
                branches.push((w, state.clone()));
            }
        }

        trace!(
            pivot = self.ctx.pivot,
            vertex = v,
            depth,
            branches = branches.len(),
            "forking"
        );
        self.forks.fetch_add(branches.len() as u64, Ordering::Relaxed);

        let results = fork_join(branches, |(w, mut branch)| {
            let mut tally = self.counter.tally(self.policy.accumulation);
            self.expand(&mut branch, w, next, depth + 1, &mut tally)
        });
        found |= results.into_iter().any(|child| child);

        self.ctx.finish(state, v, found);
        found
    }
}
