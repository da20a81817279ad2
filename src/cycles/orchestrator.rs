//! The outer pivot loop.
//!
//! Pivots `s = 0..n` are visited in order by a single control thread. Each
//! active pivot gets the component containing it in the subgraph induced by the
//! active vertices `>= s`; trivial components are retired without a search.
//! The pivot is retired before its search is dispatched, so in pipelined mode
//! the next decomposition can start while earlier searches are still running.

use core::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, trace};

use crate::{
    concurrency::{build_pool, CycleCounter},
    cycles::{
        blocking::BlockState,
        circuit::{search, ForkingSearch, SearchContext},
        error::EngineError,
        policy::SpawnPolicy,
        scc::{Component, SccDecomposer},
    },
    graph::{CsrDigraph, Vertex, VertexMask},
};

/// Configuration of one enumeration run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    /// Fork thresholds for each pivot's search.
    pub policy: SpawnPolicy,
    /// Worker threads; `None` uses rayon's default.
    pub threads: Option<usize>,
    /// Longest cycle counted; `None` counts every cycle exactly.
    pub max_len: Option<usize>,
    /// Let later pivots start before earlier pivot searches have joined.
    pub pipeline: bool,
}

impl CycleConfig {
    /// Single-threaded Johnson enumeration.
    pub const fn sequential() -> Self {
        Self {
            policy: SpawnPolicy::sequential(),
            threads: None,
            max_len: None,
            pipeline: false,
        }
    }

    /// Parallel enumeration under `policy`.
    pub const fn parallel(policy: SpawnPolicy) -> Self {
        Self {
            policy,
            threads: None,
            max_len: None,
            pipeline: false,
        }
    }

    /// Sets the worker thread count.
    #[must_use]
    pub const fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Bounds the counted cycle length.
    #[must_use]
    pub const fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    /// Enables or disables pipelined pivots.
    #[must_use]
    pub const fn with_pipeline(mut self, pipeline: bool) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Returns whether this run needs a worker pool.
    pub fn is_parallel(&self) -> bool {
        self.pipeline || !self.policy.is_sequential()
    }

    /// Rejects zero threads and incoherent policies.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.threads == Some(0) {
            return Err(EngineError::ZeroThreads);
        }
        self.policy.validate()
    }
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self::sequential()
    }
}

/// Outcome and statistics of one run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleReport {
    /// Number of simple cycles found (of length `<= max_len` if bounded).
    pub cycles: u64,
    /// Vertices in the input graph.
    pub nodes: usize,
    /// Edges in the input graph.
    pub edges: usize,
    /// Active pivots visited.
    pub pivots: usize,
    /// Pivots whose component was non-trivial and therefore searched.
    pub pivots_searched: usize,
    /// Branches handed to forked tasks.
    pub forks: u64,
    /// Length bound in effect.
    pub max_len: Option<usize>,
    /// Time spent in SCC decomposition on the control thread.
    pub decomposition_time: Duration,
    /// Wall-clock time of the whole run.
    pub total_time: Duration,
}

/// Runs cycle enumeration for a [`CycleConfig`].
///
/// ```
/// use simple_cycles::{CsrDigraph, CycleConfig, CycleEnumerator, SpawnPolicy};
///
/// let graph = CsrDigraph::from_edges(3, &[(0, 1), (1, 2), (2, 0), (1, 0)]);
/// let report = CycleEnumerator::new(CycleConfig::parallel(SpawnPolicy::nested()))
///     .run(&graph)
///     .unwrap();
/// assert_eq!(report.cycles, 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CycleEnumerator {
    config: CycleConfig,
}

impl CycleEnumerator {
    /// Creates an enumerator for `config`.
    pub fn new(config: CycleConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    /// Counts the simple cycles of `graph`.
    ///
    /// Builds a dedicated worker pool when the configuration needs one.
    pub fn run(&self, graph: &CsrDigraph) -> Result<CycleReport, EngineError> {
        self.config.validate()?;
        let span = info_span!(
            "enumerate",
            nodes = graph.node_count(),
            edges = graph.edge_count()
        );
        let _guard = span.enter();

        let report = if self.config.is_parallel() {
            let pool = build_pool(self.config.threads)?;
            debug!(threads = pool.current_num_threads(), "worker pool ready");
            pool.install(|| self.drive(graph))
        } else {
            self.drive(graph)
        };

        info!(
            cycles = report.cycles,
            pivots_searched = report.pivots_searched,
            forks = report.forks,
            total_ms = report.total_time.as_millis() as u64,
            "enumeration complete"
        );
        Ok(report)
    }

    fn drive(&self, graph: &CsrDigraph) -> CycleReport {
        let started = Instant::now();
        let counter = CycleCounter::new();
        let forks = AtomicU64::new(0);
        let mut pivots = PivotLoop::new(graph, self.config.policy);

        if self.config.pipeline {
            rayon::scope(|scope| {
                while let Some(job) = pivots.next_job() {
                    let (counter, forks) = (&counter, &forks);
                    scope.spawn(move |_| self.search_pivot(graph, &job, counter, forks));
                }
            });
        } else {
            while let Some(job) = pivots.next_job() {
                self.search_pivot(graph, &job, &counter, &forks);
            }
        }

        CycleReport {
            cycles: counter.load(),
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            pivots: pivots.visited,
            pivots_searched: pivots.searched,
            forks: forks.load(Ordering::Relaxed),
            max_len: self.config.max_len,
            decomposition_time: pivots.decomposition_time,
            total_time: started.elapsed(),
        }
    }

    fn search_pivot(
        &self,
        graph: &CsrDigraph,
        job: &PivotJob,
        counter: &CycleCounter,
        forks: &AtomicU64,
    ) {
        let policy = self.config.policy;
        let ctx = SearchContext::new(graph, &job.component, job.pivot, self.config.max_len);
        let mut state = BlockState::new(graph.node_count());
        let mut tally = counter.tally(policy.accumulation);
        if job.sequential {
            search(&ctx, &mut state, &mut tally);
        } else {
            ForkingSearch::new(ctx, policy, counter, forks).run(&mut state, &mut tally);
        }
        trace!(pivot = job.pivot, sequential = job.sequential, "pivot searched");
    }
}

/// A pivot ready to be searched.
struct PivotJob {
    pivot: Vertex,
    component: VertexMask,
    sequential: bool,
}

/// Control-thread state: the active set and a reusable decomposer.
struct PivotLoop<'g> {
    graph: &'g CsrDigraph,
    policy: SpawnPolicy,
    active: VertexMask,
    decomposer: SccDecomposer<'g>,
    next: Vertex,
    retired: usize,
    visited: usize,
    searched: usize,
    decomposition_time: Duration,
}

impl<'g> PivotLoop<'g> {
    fn new(graph: &'g CsrDigraph, policy: SpawnPolicy) -> Self {
        let active = VertexMask::full(graph.node_count());
        let decomposer = SccDecomposer::new(graph, &active, 0);
        Self {
            graph,
            policy,
            active,
            decomposer,
            next: 0,
            retired: 0,
            visited: 0,
            searched: 0,
            decomposition_time: Duration::ZERO,
        }
    }

    /// Advances to the next pivot with a non-trivial component, retiring every
    /// pivot it passes.
    fn next_job(&mut self) -> Option<PivotJob> {
        let n = self.graph.node_count();
        while self.next < n {
            let pivot = self.next;
            self.next += 1;
            if !self.active.contains(pivot) {
                continue;
            }
            self.visited += 1;

            let started = Instant::now();
            self.decomposer.reset(&self.active, pivot);
            let component = self.decomposer.next();
            self.decomposition_time += started.elapsed();

            let remaining = n - self.retired;
            self.active.remove(pivot);
            self.retired += 1;

            let Some(component) = component.filter(Component::is_nontrivial) else {
                trace!(pivot, "trivial component");
                continue;
            };
            let sequential =
                self.policy.is_sequential() || self.policy.prefers_sequential(remaining, n);
            debug!(pivot, size = component.len(), remaining, sequential, "searching component");
            self.searched += 1;
            return Some(PivotJob {
                pivot,
                component: component.to_mask(n),
                sequential,
            });
        }
        None
    }
}

/// Counts every simple cycle of `graph` with the sequential engine.
pub fn count_cycles(graph: &CsrDigraph) -> u64 {
    CycleEnumerator::new(CycleConfig::sequential()).drive(graph).cycles
}

/// Counts the simple cycles of `graph` with at most `max_len` edges.
///
/// With `max_len >= node_count` this equals [`count_cycles`]. Below that the
/// count is a lower bound: blocking may prune a path that would have closed
/// within the bound.
pub fn count_cycles_bounded(graph: &CsrDigraph, max_len: usize) -> u64 {
    CycleEnumerator::new(CycleConfig::sequential().with_max_len(max_len))
        .drive(graph)
        .cycles
}
