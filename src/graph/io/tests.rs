//! Tests for the text and binary codecs.

use super::*;
use crate::graph::io::text::{parse_header, TextHeader};

const TRIANGLE_PLUS_BACK: &str = "\
# SNAP directed edge list: source target
# Nodes: 3 Edges: 4
# FromNodeId\tToNodeId
0 1
1 2
2 0
1 0
";

#[test]
fn parses_snap_edge_list() {
    let g = parse_text(TRIANGLE_PLUS_BACK.as_bytes()).unwrap();
    assert_eq!(g.node_count(), 3);
    assert_eq!(g.edge_count(), 4);
    assert_eq!(g.neighbors(1), &[2, 0]);
    assert_eq!(g.in_neighbors(0), &[1, 2]);
}

#[test]
fn header_is_advisory_and_can_add_isolated_vertices() {
    let g = parse_text("# Nodes: 10 Edges: 1\n0 1\n".as_bytes()).unwrap();
    assert_eq!(g.node_count(), 10);
    assert_eq!(g.edge_count(), 1);

    // Header smaller than the referenced ids does not truncate the graph.
    let g = parse_text("# Nodes: 2 Edges: 9\n0 5\n".as_bytes()).unwrap();
    assert_eq!(g.node_count(), 6);
}

#[test]
fn no_header_uses_max_id() {
    let g = parse_text("3 7\n7 3\n".as_bytes()).unwrap();
    assert_eq!(g.node_count(), 8);
    assert!(g.has_edge(3, 7));
    assert!(g.has_edge(7, 3));
}

#[test]
fn malformed_lines_are_skipped() {
    let text = "0 1\nhello world\n1\n-1 2\n1 0 extra columns\n\n# late comment\n";
    let g = parse_text(text.as_bytes()).unwrap();
    assert_eq!(g.edges().collect::<Vec<_>>(), vec![(0, 1), (1, 0)]);
}

#[test]
fn empty_input_is_an_empty_graph() {
    let g = parse_text("".as_bytes()).unwrap();
    assert_eq!(g.node_count(), 0);
    assert_eq!(g.edge_count(), 0);
}

#[test]
fn header_tokens() {
    assert_eq!(
        parse_header(" Nodes: 262111 Edges: 1234877"),
        TextHeader {
            nodes: Some(262_111),
            edges: Some(1_234_877)
        }
    );
    assert_eq!(parse_header(" just a comment"), TextHeader::default());
}

#[test]
fn binary_round_trip_in_memory() {
    let g = parse_text(TRIANGLE_PLUS_BACK.as_bytes()).unwrap();
    let mut buf = Vec::new();
    write_binary(&mut buf, &g).unwrap();
    // header + n offsets + m targets
    assert_eq!(buf.len(), 4 * (3 + 3 + 4));
    assert!(has_binary_magic(&buf));
    assert_eq!(decode_binary(&buf).unwrap(), g);
}

#[test]
fn binary_rejects_bad_magic() {
    let mut buf = Vec::new();
    write_binary(&mut buf, &CsrDigraph::from_edges(2, &[(0, 1)])).unwrap();
    buf[0] ^= 0xFF;
    match decode_binary(&buf) {
        Err(GraphError::BadMagic { .. }) => {}
        other => panic!("expected BadMagic, got {other:?}"),
    }
}

#[test]
fn binary_rejects_truncation() {
    let mut buf = Vec::new();
    write_binary(&mut buf, &CsrDigraph::from_edges(3, &[(0, 1), (1, 2), (2, 0)])).unwrap();

    match decode_binary(&buf[..8]) {
        Err(GraphError::Truncated { section: "header", .. }) => {}
        other => panic!("expected truncated header, got {other:?}"),
    }
    match decode_binary(&buf[..12 + 4]) {
        Err(GraphError::Truncated { section: "offsets", .. }) => {}
        other => panic!("expected truncated offsets, got {other:?}"),
    }
    match decode_binary(&buf[..buf.len() - 1]) {
        Err(GraphError::Truncated { section: "targets", .. }) => {}
        other => panic!("expected truncated targets, got {other:?}"),
    }
}

#[test]
fn binary_rejects_negative_counts() {
    let mut buf = Vec::new();
    buf.extend_from_slice(&GRAPH_MAGIC.to_le_bytes());
    buf.extend_from_slice(&(-1i32).to_le_bytes());
    buf.extend_from_slice(&0i32.to_le_bytes());
    match decode_binary(&buf) {
        Err(GraphError::Negative { field: "node count", value: -1 }) => {}
        other => panic!("expected negative node count, got {other:?}"),
    }
}

#[test]
fn binary_rejects_out_of_range_target() {
    let mut buf = Vec::new();
    for word in [GRAPH_MAGIC as i32, 1, 1, 0, 4] {
        buf.extend_from_slice(&word.to_le_bytes());
    }
    assert!(matches!(decode_binary(&buf), Err(GraphError::InvalidCsr(_))));
}

#[test]
fn out_of_range_ids_are_skipped() {
    let text = "0 1\n0 18446744073709551615\n4294967296 0\n2147483648 1\n1 0\n";
    let g = parse_text(text.as_bytes()).unwrap();
    assert_eq!(g.node_count(), 2);
    assert_eq!(g.edges().collect::<Vec<_>>(), vec![(0, 1), (1, 0)]);

    let g = parse_text("0 18446744073709551615\n".as_bytes()).unwrap();
    assert_eq!(g.node_count(), 0);
    assert_eq!(g.edge_count(), 0);
}

#[test]
fn oversized_header_count_is_ignored() {
    let g = parse_text("# Nodes: 1000000000000 Edges: 1\n0 1\n".as_bytes()).unwrap();
    assert_eq!(g.node_count(), 2);
    assert_eq!(parse_header(" Nodes: 2147483648 Edges: 3").nodes, None);
    assert_eq!(parse_header(" Nodes: 2147483647").nodes, Some(2_147_483_647));
}
