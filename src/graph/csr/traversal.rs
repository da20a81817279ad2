//! Masked reachability over the forward or reverse index.

use crate::graph::{access::VertexMask, csr::CsrDigraph, Vertex};

/// Which adjacency a traversal follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Out-edges (`u -> v` visits `v` from `u`).
    Forward,
    /// In-edges (`u -> v` visits `u` from `v`).
    Backward,
}

impl CsrDigraph {
    /// Neighbors of `node` in the given direction.
    #[inline]
    pub fn adjacent(&self, node: Vertex, direction: Direction) -> &[Vertex] {
        match direction {
            Direction::Forward => self.neighbors(node),
            Direction::Backward => self.in_neighbors(node),
        }
    }

    /// Breadth-first reachability from `start`, restricted to `allowed` vertices.
    ///
    /// Every reached vertex is marked in `visited` and appended to `reached` in
    /// BFS order (`start` first). `reached` doubles as the queue, so no extra
    /// frontier buffer is allocated. Vertices already marked in `visited` are
    /// treated as seen and not expanded again; the caller owns clearing it
    /// (cheaply, by walking `reached`).
    ///
    /// `start` itself is reached even if it is not in `allowed`.
    ///
    /// **Time complexity**: \(O(|reached| + \sum \deg)\) over reached vertices
    pub fn reach_within(
        &self,
        start: Vertex,
        direction: Direction,
        allowed: &VertexMask,
        visited: &mut VertexMask,
        reached: &mut Vec<Vertex>,
    ) {
        assert!(start < self.node_count(), "start {start} out of bounds");
        assert!(
            allowed.len_bits() >= self.node_count() && visited.len_bits() >= self.node_count(),
            "mask too small for node_count"
        );

        let base = reached.len();
        if !visited.insert(start) {
            return;
        }
        reached.push(start);

        let mut head = base;
        while head < reached.len() {
            let u = reached[head];
            head += 1;
            for &v in self.adjacent(u, direction) {
                // SAFETY: constructors guarantee every stored id is `< node_count()`,
                // and both masks were checked to cover `node_count()` bits.
                if unsafe { allowed.contains_unchecked(v) } && visited.insert(v) {
                    reached.push(v);
                }
            }
        }
    }

    /// Vertices reachable from `start` in BFS order, over the whole graph.
    pub fn bfs(&self, start: Vertex, direction: Direction) -> Vec<Vertex> {
        let allowed = VertexMask::full(self.node_count());
        let mut visited = VertexMask::new(self.node_count());
        let mut out = Vec::with_capacity(self.node_count());
        self.reach_within(start, direction, &allowed, &mut visited, &mut out);
        out
    }
}
