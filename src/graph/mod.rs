//! Graph storage and loading.
//!
//! - `csr`: immutable forward + reverse CSR adjacency
//! - `io`: text edge-list and binary CSR loaders
//! - `access`: dense per-vertex masks

pub mod access;
pub mod csr;
pub mod io;

pub use access::VertexMask;
pub use csr::CsrDigraph;
pub use io::GraphError;

/// Dense vertex id in `0..node_count`.
pub type Vertex = usize;
