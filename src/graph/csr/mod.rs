//! A compact directed CSR (compressed sparse row) graph with a derived reverse index.
//!
//! Forward edges are stored in row-major order; the reverse (CSC) index is built
//! once at construction by counting sort, so both out- and in-neighbors are
//! contiguous slices.
//!
//! Memory layout:
//! - `out_offsets`: `Vec<usize>` of length `n + 1`
//! - `out_targets`: contiguous `usize` targets for each row
//! - `in_offsets`: `Vec<usize>` of length `n + 1`
//! - `in_sources`: contiguous `usize` sources for each column

use crate::graph::{io::GraphError, Vertex};

mod transpose;
mod traversal;

pub use traversal::Direction;

/// An immutable directed graph in CSR form, with its transpose.
///
/// Vertex ids are dense integers `0..node_count()`. Parallel edges are kept as
/// given; a self-loop `u -> u` is an ordinary edge.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `from_adjacency` / `from_edges` | \(O(n + m)\) | Builds CSR and the reverse index |
/// | `neighbors` | \(O(1)\) | Slice of out-neighbors |
/// | `in_neighbors` | \(O(1)\) | Slice of in-neighbors (precomputed transpose) |
/// | `degree` / `in_degree` | \(O(1)\) | Offset difference |
/// | `has_edge` | \(O(\text{out-degree})\) | Linear scan of neighbors |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsrDigraph {
    out_offsets: Vec<usize>,
    out_targets: Vec<Vertex>,
    in_offsets: Vec<usize>,
    in_sources: Vec<Vertex>,
}

impl CsrDigraph {
    /// Builds a graph from an adjacency list.
    ///
    /// # Panics
    ///
    /// Panics if any edge references a node index out of bounds.
    pub fn from_adjacency(adjacency: &[Vec<Vertex>]) -> Self {
        let n = adjacency.len();

        let mut out_offsets = Vec::with_capacity(n + 1);
        out_offsets.push(0);

        let mut total_edges = 0usize;
        for nbrs in adjacency {
            total_edges = total_edges.saturating_add(nbrs.len());
            out_offsets.push(total_edges);
        }

        let mut out_targets = Vec::with_capacity(total_edges);
        for (u, nbrs) in adjacency.iter().enumerate() {
            for &v in nbrs {
                assert!(v < n, "edge {u}->{v} is out of bounds for n={n}");
                out_targets.push(v);
            }
        }

        Self::with_reverse(out_offsets, out_targets)
    }

    /// Builds a graph with `node_count` vertices from an edge list.
    ///
    /// Edges of the same source keep their relative order.
    ///
    /// # Panics
    ///
    /// Panics if any endpoint is `>= node_count`.
    pub fn from_edges(node_count: usize, edges: &[(Vertex, Vertex)]) -> Self {
        let n = node_count;
        let mut out_offsets = vec![0usize; n + 1];
        for &(u, v) in edges {
            assert!(u < n && v < n, "edge {u}->{v} is out of bounds for n={n}");
            out_offsets[u + 1] += 1;
        }
        for i in 0..n {
            out_offsets[i + 1] += out_offsets[i];
        }

        let mut cursor = out_offsets[..n].to_vec();
        let mut out_targets = vec![0usize; edges.len()];
        for &(u, v) in edges {
            out_targets[cursor[u]] = v;
            cursor[u] += 1;
        }

        Self::with_reverse(out_offsets, out_targets)
    }

    /// Builds a graph directly from forward CSR parts, validating them.
    ///
    /// `offsets` has length `n + 1`, is monotone, starts at 0 and ends at
    /// `targets.len()`; every target is `< n`.
    pub fn try_from_csr_parts(
        offsets: Vec<usize>,
        targets: Vec<Vertex>,
    ) -> Result<Self, GraphError> {
        if offsets.is_empty() {
            return Err(GraphError::InvalidCsr("offsets must have length n+1".into()));
        }
        let n = offsets.len() - 1;
        if offsets[0] != 0 {
            return Err(GraphError::InvalidCsr(format!(
                "first offset must be 0, found {}",
                offsets[0]
            )));
        }
        if let Some(u) = offsets.windows(2).position(|w| w[0] > w[1]) {
            return Err(GraphError::InvalidCsr(format!(
                "offsets decrease at vertex {u}: {} > {}",
                offsets[u],
                offsets[u + 1]
            )));
        }
        let m = offsets[n];
        if m != targets.len() {
            return Err(GraphError::InvalidCsr(format!(
                "last offset {m} does not match edge count {}",
                targets.len()
            )));
        }
        if let Some(&v) = targets.iter().find(|&&v| v >= n) {
            return Err(GraphError::InvalidCsr(format!(
                "edge target {v} out of bounds for n={n}"
            )));
        }

        Ok(Self::with_reverse(offsets, targets))
    }

    /// Builds a graph directly from forward CSR parts.
    ///
    /// # Panics
    /// - if `offsets.len() < 1` or offsets are not monotone
    /// - if `offsets.last() != targets.len()`
    /// - if a target is out of bounds
    pub fn from_csr_parts(offsets: Vec<usize>, targets: Vec<Vertex>) -> Self {
        match Self::try_from_csr_parts(offsets, targets) {
            Ok(graph) => graph,
            Err(err) => panic!("{err}"),
        }
    }

    fn with_reverse(out_offsets: Vec<usize>, out_targets: Vec<Vertex>) -> Self {
        let (in_offsets, in_sources) = transpose::transpose(&out_offsets, &out_targets);
        debug_assert_eq!(in_sources.len(), out_targets.len());
        Self {
            out_offsets,
            out_targets,
            in_offsets,
            in_sources,
        }
    }

    /// Number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        // `out_offsets` is length `n + 1` by construction.
        self.out_offsets.len() - 1
    }

    /// Number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.out_targets.len()
    }

    /// Returns the out-neighbors of `node`, in insertion order.
    ///
    /// # Panics
    /// Panics if `node` is out of bounds.
    #[inline]
    pub fn neighbors(&self, node: Vertex) -> &[Vertex] {
        assert!(node < self.node_count(), "node {node} out of bounds");
        &self.out_targets[self.out_offsets[node]..self.out_offsets[node + 1]]
    }

    /// Returns the in-neighbors of `node` (all `u` such that `u -> node`).
    ///
    /// # Panics
    /// Panics if `node` is out of bounds.
    #[inline]
    pub fn in_neighbors(&self, node: Vertex) -> &[Vertex] {
        assert!(node < self.node_count(), "node {node} out of bounds");
        &self.in_sources[self.in_offsets[node]..self.in_offsets[node + 1]]
    }

    /// Returns the out-degree of a node.
    #[inline]
    pub fn degree(&self, node: Vertex) -> usize {
        self.neighbors(node).len()
    }

    /// Returns the in-degree of a node.
    #[inline]
    pub fn in_degree(&self, node: Vertex) -> usize {
        self.in_neighbors(node).len()
    }

    /// Checks if an edge exists from `from` to `to`.
    pub fn has_edge(&self, from: Vertex, to: Vertex) -> bool {
        assert!(to < self.node_count(), "to vertex {to} out of bounds");
        self.neighbors(from).contains(&to)
    }

    /// Returns `true` if `node -> node` is an edge.
    pub fn has_self_loop(&self, node: Vertex) -> bool {
        self.has_edge(node, node)
    }

    /// Forward row offsets (`n + 1` entries).
    pub fn offsets(&self) -> &[usize] {
        &self.out_offsets
    }

    /// Forward edge targets, row-major.
    pub fn targets(&self) -> &[Vertex] {
        &self.out_targets
    }

    /// Iterates all edges `(u, v)` in row-major order.
    pub fn edges(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        (0..self.node_count()).flat_map(move |u| self.neighbors(u).iter().map(move |&v| (u, v)))
    }
}

#[cfg(test)]
mod tests;
