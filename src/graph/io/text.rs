//! Tolerant SNAP-style edge-list parser.
//!
//! ```text
//! # Directed graph
//! # Nodes: 3 Edges: 4
//! 0 1
//! 1 2
//! 2 0
//! 1 0
//! ```

use std::io::BufRead;

use tracing::{debug, trace};

use crate::graph::{
    io::{GraphError, GraphResult},
    CsrDigraph, Vertex,
};

/// Counts advertised by a `# Nodes: <n> Edges: <m>` comment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextHeader {
    pub(crate) nodes: Option<usize>,
    pub(crate) edges: Option<usize>,
}

/// Parses a text edge list into a graph.
///
/// - Leading `#` lines are comments; a `# Nodes: <n> Edges: <m>` comment among
///   them is advisory.
/// - Data lines are `<u> <v>` pairs of 0-indexed vertex ids; further columns are
///   ignored.
/// - Unparsable lines (and `#` lines after the preamble) are skipped.
///
/// Ids above `i32::MAX` make their line unparsable, and an oversized
/// `Nodes:` count is ignored.
///
/// The node count is the larger of the advertised count and the maximum
/// referenced id + 1, so isolated trailing vertices announced by the header
/// are kept.
pub fn parse_text<R: BufRead>(reader: R) -> GraphResult<CsrDigraph> {
    let mut header = TextHeader::default();
    let mut in_preamble = true;
    let mut edges: Vec<(Vertex, Vertex)> = Vec::new();
    let mut max_id: Option<Vertex> = None;
    let mut skipped = 0usize;

    for (lineno, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| GraphError::Io {
            context: "reading text graph",
            source,
        })?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(comment) = line.strip_prefix('#') {
            if in_preamble {
                let parsed = parse_header(comment);
                header.nodes = parsed.nodes.or(header.nodes);
                header.edges = parsed.edges.or(header.edges);
            }
            continue;
        }
        in_preamble = false;

        let mut cols = line.split_whitespace();
        let pair = (
            cols.next().and_then(parse_id),
            cols.next().and_then(parse_id),
        );
        match pair {
            (Some(u), Some(v)) => {
                max_id = Some(max_id.map_or(u.max(v), |m| m.max(u).max(v)));
                edges.push((u, v));
            }
            _ => {
                skipped += 1;
                trace!(line = lineno + 1, "skipping unparsable or out-of-range edge line");
            }
        }
    }

    // Ids are capped at `i32::MAX`, so the increment cannot overflow.
    let node_count = header
        .nodes
        .unwrap_or(0)
        .max(max_id.map_or(0, |m| m + 1));

    if let Some(advertised) = header.edges {
        if advertised != edges.len() {
            debug!(
                advertised,
                parsed = edges.len(),
                "edge count differs from header"
            );
        }
    }
    debug!(node_count, edge_count = edges.len(), skipped, "parsed text graph");

    Ok(CsrDigraph::from_edges(node_count, &edges))
}

/// Parses a vertex id or vertex count.
///
/// Values outside `0..=i32::MAX` are rejected: the binary format stores ids as
/// `i32`, and larger values would only describe a graph too large to build.
fn parse_id(token: &str) -> Option<Vertex> {
    token
        .parse::<i32>()
        .ok()
        .and_then(|id| Vertex::try_from(id).ok())
}

/// Extracts `Nodes:` / `Edges:` counts from a comment body.
pub(crate) fn parse_header(comment: &str) -> TextHeader {
    let mut header = TextHeader::default();
    let mut tokens = comment.split_whitespace();
    while let Some(tok) = tokens.next() {
        match tok {
            "Nodes:" => header.nodes = tokens.next().and_then(parse_id),
            "Edges:" => header.edges = tokens.next().and_then(|t| t.parse().ok()),
            _ => {}
        }
    }
    header
}
