//! Graph file loaders.
//!
//! Two on-disk formats are supported:
//! - **text**: a tolerant SNAP-style `<u> <v>` edge list ([`parse_text`])
//! - **binary**: a fixed-width little-endian CSR dump ([`decode_binary`])
//!
//! Loading is strict for binary files (bad magic or truncation is an error) and
//! tolerant for text files (malformed lines are skipped).

use std::{
    fs::{self, File},
    io::BufWriter,
    path::Path,
};

use tracing::info;

use crate::graph::CsrDigraph;

mod binary;
mod error;
mod text;

pub use binary::{decode_binary, has_binary_magic, read_binary, write_binary, GRAPH_MAGIC};
pub use error::{GraphError, GraphResult};
pub use text::parse_text;

fn read_file(path: &Path) -> GraphResult<Vec<u8>> {
    fs::read(path).map_err(|source| GraphError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a text edge-list file.
pub fn load_text(path: impl AsRef<Path>) -> GraphResult<CsrDigraph> {
    let path = path.as_ref();
    let bytes = read_file(path)?;
    let graph = parse_text(bytes.as_slice())?;
    info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded text graph"
    );
    Ok(graph)
}

/// Loads a binary graph file.
pub fn load_binary(path: impl AsRef<Path>) -> GraphResult<CsrDigraph> {
    let path = path.as_ref();
    let bytes = read_file(path)?;
    let graph = decode_binary(&bytes)?;
    info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded binary graph"
    );
    Ok(graph)
}

/// Loads a graph, choosing the binary codec when the file opens with
/// [`GRAPH_MAGIC`] and the text parser otherwise.
pub fn load(path: impl AsRef<Path>) -> GraphResult<CsrDigraph> {
    let path = path.as_ref();
    let bytes = read_file(path)?;
    let graph = if has_binary_magic(&bytes) {
        decode_binary(&bytes)?
    } else {
        parse_text(bytes.as_slice())?
    };
    info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded graph"
    );
    Ok(graph)
}

/// Stores `graph` in binary form at `path`, replacing any existing file.
pub fn store_binary(path: impl AsRef<Path>, graph: &CsrDigraph) -> GraphResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| GraphError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    write_binary(BufWriter::new(file), graph)?;
    info!(path = %path.display(), "stored binary graph");
    Ok(())
}

#[cfg(test)]
mod tests;
