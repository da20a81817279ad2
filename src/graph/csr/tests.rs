//! Tests for the CSR digraph.

use super::*;
use crate::graph::access::VertexMask;

#[test]
fn test_csr_in_neighbors_basic() {
    // 0 -> 1
    // 1 -> 2
    // 2 -> 0
    let adjacency = vec![vec![1], vec![2], vec![0]];
    let graph = CsrDigraph::from_adjacency(&adjacency);

    assert_eq!(graph.in_neighbors(0), &[2]);
    assert_eq!(graph.in_neighbors(1), &[0]);
    assert_eq!(graph.in_neighbors(2), &[1]);

    assert_eq!(graph.in_degree(0), 1);
    assert_eq!(graph.in_degree(1), 1);
    assert_eq!(graph.in_degree(2), 1);
}

#[test]
fn test_csr_in_neighbors_complex() {
    // 0 -> 1, 2
    // 1 -> 2
    // 2 ->
    // 3 -> 1
    let adjacency = vec![vec![1, 2], vec![2], vec![], vec![1]];
    let graph = CsrDigraph::from_adjacency(&adjacency);

    assert!(graph.in_neighbors(0).is_empty());
    // Sources land in increasing order from the counting sort.
    assert_eq!(graph.in_neighbors(1), &[0, 3]);
    assert_eq!(graph.in_neighbors(2), &[0, 1]);
    assert!(graph.in_neighbors(3).is_empty());
    assert_eq!(graph.edge_count(), 4);
}

#[test]
fn test_from_edges_matches_adjacency() {
    let edges = [(0, 1), (1, 2), (2, 0), (1, 0)];
    let a = CsrDigraph::from_edges(3, &edges);
    let b = CsrDigraph::from_adjacency(&[vec![1], vec![2, 0], vec![0]]);
    assert_eq!(a, b);
    assert_eq!(a.edges().collect::<Vec<_>>(), vec![(0, 1), (1, 2), (1, 0), (2, 0)]);
}

#[test]
fn test_from_csr_parts_reconstruction() {
    // 0 -> 1, 2
    // 1 -> 2
    // 2 ->
    let offsets = vec![0, 2, 3, 3];
    let edges = vec![1, 2, 2];

    let graph = CsrDigraph::from_csr_parts(offsets, edges);

    assert_eq!(graph.neighbors(0), &[1, 2]);
    assert_eq!(graph.in_neighbors(2), &[0, 1]);
    assert_eq!(graph.in_degree(2), 2);
}

#[test]
fn test_try_from_csr_parts_rejects_bad_parts() {
    assert!(CsrDigraph::try_from_csr_parts(vec![], vec![]).is_err());
    assert!(CsrDigraph::try_from_csr_parts(vec![0, 2, 1], vec![0, 1]).is_err());
    assert!(CsrDigraph::try_from_csr_parts(vec![0, 1], vec![0, 0]).is_err());
    assert!(CsrDigraph::try_from_csr_parts(vec![0, 1], vec![5]).is_err());
    assert!(CsrDigraph::try_from_csr_parts(vec![1, 1], vec![0]).is_err());
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_from_adjacency_panics_on_out_of_bounds() {
    let _ = CsrDigraph::from_adjacency(&[vec![3]]);
}

#[test]
fn test_empty_graph() {
    let adjacency: Vec<Vec<usize>> = vec![];
    let graph = CsrDigraph::from_adjacency(&adjacency);
    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.edges().count(), 0);
}

#[test]
fn test_disconnected_graph() {
    let adjacency = vec![vec![]; 5];
    let graph = CsrDigraph::from_adjacency(&adjacency);

    for i in 0..5 {
        assert_eq!(graph.in_degree(i), 0);
        assert!(graph.in_neighbors(i).is_empty());
        assert!(!graph.has_self_loop(i));
    }
}

#[test]
fn test_self_loop_and_parallel_edges_are_kept() {
    let graph = CsrDigraph::from_edges(2, &[(0, 0), (0, 1), (0, 1)]);
    assert!(graph.has_self_loop(0));
    assert_eq!(graph.degree(0), 3);
    assert_eq!(graph.in_neighbors(1), &[0, 0]);
}

#[test]
fn test_reach_within_respects_mask() {
    // 0 -> 1 -> 2 -> 3, 1 -> 3
    let graph = CsrDigraph::from_adjacency(&[vec![1], vec![2, 3], vec![3], vec![]]);
    let mut allowed = VertexMask::full(4);
    allowed.remove(2);
    let mut visited = VertexMask::new(4);
    let mut reached = Vec::new();
    graph.reach_within(0, Direction::Forward, &allowed, &mut visited, &mut reached);
    assert_eq!(reached, vec![0, 1, 3]);

    visited.clear();
    reached.clear();
    graph.reach_within(3, Direction::Backward, &allowed, &mut visited, &mut reached);
    assert_eq!(reached, vec![3, 1, 0]);
}

#[test]
fn test_bfs_order() {
    let graph = CsrDigraph::from_adjacency(&[vec![1, 2], vec![3], vec![3], vec![]]);
    assert_eq!(graph.bfs(0, Direction::Forward), vec![0, 1, 2, 3]);
    assert_eq!(graph.bfs(3, Direction::Backward), vec![3, 1, 2, 0]);
}
