use std::{fs, io::Write};

use simple_cycles::{
    graph::io::{self, has_binary_magic, GRAPH_MAGIC},
    CsrDigraph, GraphError,
};

const SNAP: &str = "\
# Directed graph: toy.txt
# Nodes: 6 Edges: 7
# FromNodeId\tToNodeId
0\t1
1\t2
2\t0
1\t0
3\t4
4\t3
not an edge
2\t2
";

fn assert_transpose(graph: &CsrDigraph) {
    for v in 0..graph.node_count() {
        let mut expected: Vec<_> = (0..graph.node_count())
            .flat_map(|u| graph.neighbors(u).iter().filter(move |&&w| w == v).map(move |_| u))
            .collect();
        expected.sort_unstable();
        let mut actual = graph.in_neighbors(v).to_vec();
        actual.sort_unstable();
        assert_eq!(actual, expected, "in-neighbors of {v}");
    }
}

#[test]
fn text_to_binary_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let text_path = dir.path().join("toy.txt");
    let bin_path = dir.path().join("toy.bin");
    fs::write(&text_path, SNAP).unwrap();

    let text = io::load_text(&text_path).unwrap();
    assert_eq!(text.node_count(), 6);
    assert_eq!(text.edge_count(), 7);
    assert_transpose(&text);

    io::store_binary(&bin_path, &text).unwrap();
    let bytes = fs::read(&bin_path).unwrap();
    assert!(has_binary_magic(&bytes));
    assert_eq!(bytes.len(), 4 * (3 + 6 + 7));

    let binary = io::load_binary(&bin_path).unwrap();
    assert_eq!(binary, text);
    for v in 0..text.node_count() {
        assert_eq!(binary.neighbors(v), text.neighbors(v));
    }
    assert_transpose(&binary);
}

#[test]
fn load_detects_format() {
    let dir = tempfile::tempdir().unwrap();
    let text_path = dir.path().join("graph.txt");
    let bin_path = dir.path().join("graph.bin");
    fs::write(&text_path, SNAP).unwrap();

    let text = io::load(&text_path).unwrap();
    io::store_binary(&bin_path, &text).unwrap();
    assert_eq!(io::load(&bin_path).unwrap(), text);
}

#[test]
fn missing_file_is_an_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.bin");
    match io::load(&missing) {
        Err(GraphError::Open { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected open error, got {other:?}"),
    }
}

#[test]
fn truncated_binary_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.bin");
    let mut file = fs::File::create(&path).unwrap();
    for word in [GRAPH_MAGIC as i32, 2, 2, 0] {
        file.write_all(&word.to_le_bytes()).unwrap();
    }
    drop(file);

    let err = io::load_binary(&path).unwrap_err();
    assert!(matches!(err, GraphError::Truncated { section: "offsets", .. }), "{err}");
}

#[test]
fn text_loader_rejects_nothing_but_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.txt");
    fs::write(&path, "garbage\n\x01\x02\n# Nodes: x\n").unwrap();
    let g = io::load_text(&path).unwrap();
    assert_eq!(g.node_count(), 0);
}

#[test]
fn binary_loader_rejects_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edges.txt");
    fs::write(&path, "0 1\n1 0\n2 3\n3 2\n").unwrap();
    assert!(matches!(io::load_binary(&path), Err(GraphError::BadMagic { .. })));
}
