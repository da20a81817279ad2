//! Strongly connected components of an induced subgraph.
//!
//! The subgraph is induced by the vertices that are both active and `>= s`.
//! Candidates are taken in increasing id order; each one's component is the
//! intersection of its forward and backward reachable sets inside the
//! still-eligible vertices, after which the whole component is removed. Since
//! removed vertices always form whole components, the intersection is exact.
//!
//! **Time complexity**: \(O(n + m)\) per full decomposition, plus
//! \(O(n / w)\) mask setup.

use crate::graph::{csr::Direction, CsrDigraph, Vertex, VertexMask};

/// One strongly connected component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Component {
    pivot: Vertex,
    members: Vec<Vertex>,
    nontrivial: bool,
}

impl Component {
    /// The smallest member, which seeded the component.
    #[inline]
    pub fn pivot(&self) -> Vertex {
        self.pivot
    }

    /// Members in ascending id order.
    #[inline]
    pub fn members(&self) -> &[Vertex] {
        &self.members
    }

    /// Number of members.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false`; components are non-empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns whether `v` is a member.
    pub fn contains(&self, v: Vertex) -> bool {
        self.members.binary_search(&v).is_ok()
    }

    /// `true` if the component can hold a cycle: two or more members, or a
    /// single member with a self-loop.
    #[inline]
    pub fn is_nontrivial(&self) -> bool {
        self.nontrivial
    }

    /// Membership as a mask over `n` vertices.
    pub fn to_mask(&self, n: usize) -> VertexMask {
        VertexMask::from_members(n, &self.members)
    }
}

/// Lazy component iterator over an induced subgraph.
///
/// Yields components in increasing pivot order, so the first item is always
/// the component of the smallest eligible vertex. Buffers are reusable across
/// thresholds through [`reset`](Self::reset).
pub struct SccDecomposer<'g> {
    graph: &'g CsrDigraph,
    eligible: VertexMask,
    forward: VertexMask,
    backward: VertexMask,
    forward_reached: Vec<Vertex>,
    backward_reached: Vec<Vertex>,
    cursor: Vertex,
}

impl<'g> SccDecomposer<'g> {
    /// Decomposes the subgraph induced by `active` vertices `>= threshold`.
    ///
    /// # Panics
    /// Panics if `active` does not cover every vertex of `graph`.
    pub fn new(graph: &'g CsrDigraph, active: &VertexMask, threshold: Vertex) -> Self {
        let n = graph.node_count();
        let mut decomposer = Self {
            graph,
            eligible: VertexMask::new(n),
            forward: VertexMask::new(n),
            backward: VertexMask::new(n),
            forward_reached: Vec::new(),
            backward_reached: Vec::new(),
            cursor: 0,
        };
        decomposer.reset(active, threshold);
        decomposer
    }

    /// Restarts the decomposition on a new active set and threshold.
    pub fn reset(&mut self, active: &VertexMask, threshold: Vertex) {
        assert_eq!(
            active.len_bits(),
            self.graph.node_count(),
            "active mask does not match node_count"
        );
        self.eligible.clone_from(active);
        self.eligible.clear_below(threshold);
        self.cursor = threshold;
    }

    /// Vertices not yet assigned to a yielded component.
    pub fn remaining(&self) -> usize {
        self.eligible.count()
    }

    fn component_at(&mut self, pivot: Vertex) -> Component {
        let graph = self.graph;
        graph.reach_within(
            pivot,
            Direction::Forward,
            &self.eligible,
            &mut self.forward,
            &mut self.forward_reached,
        );
        graph.reach_within(
            pivot,
            Direction::Backward,
            &self.eligible,
            &mut self.backward,
            &mut self.backward_reached,
        );

        let mut members: Vec<Vertex> = self
            .forward_reached
            .iter()
            .copied()
            .filter(|&v| self.backward.contains(v))
            .collect();
        members.sort_unstable();

        for &v in &self.forward_reached {
            self.forward.remove(v);
        }
        for &v in &self.backward_reached {
            self.backward.remove(v);
        }
        self.forward_reached.clear();
        self.backward_reached.clear();
        for &v in &members {
            self.eligible.remove(v);
        }

        let nontrivial = members.len() > 1 || graph.has_self_loop(pivot);
        Component {
            pivot,
            members,
            nontrivial,
        }
    }
}

impl Iterator for SccDecomposer<'_> {
    type Item = Component;

    fn next(&mut self) -> Option<Component> {
        let n = self.graph.node_count();
        while self.cursor < n && !self.eligible.contains(self.cursor) {
            self.cursor += 1;
        }
        if self.cursor >= n {
            return None;
        }
        let pivot = self.cursor;
        self.cursor += 1;
        Some(self.component_at(pivot))
    }
}

/// Full decomposition of the subgraph induced by `active` vertices
/// `>= threshold`, singletons included.
pub fn decompose(graph: &CsrDigraph, active: &VertexMask, threshold: Vertex) -> Vec<Component> {
    SccDecomposer::new(graph, active, threshold).collect()
}

/// The component containing `pivot` in the subgraph induced by `active`
/// vertices `>= pivot`, or `None` if `pivot` is inactive.
pub fn component_of(graph: &CsrDigraph, active: &VertexMask, pivot: Vertex) -> Option<Component> {
    if !active.contains(pivot) {
        return None;
    }
    SccDecomposer::new(graph, active, pivot).next()
}
