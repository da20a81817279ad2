//! Error types for graph loading and storing.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur while loading, storing or assembling a graph.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The graph file could not be opened or created.
    #[error("could not open {}: {source}", path.display())]
    Open {
        /// Path that failed.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// Reading or writing an already-open stream failed.
    #[error("i/o error while {context}: {source}")]
    Io {
        /// What was being read or written.
        context: &'static str,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// The binary header does not start with the expected magic constant.
    #[error("invalid graph file header (magic {found:#010x}); file may be corrupt")]
    BadMagic {
        /// Magic value actually read.
        found: u32,
    },

    /// The stream ended before a header or payload section was complete.
    #[error("truncated {section}: expected {expected} bytes, found {found}")]
    Truncated {
        /// Section being read (`header`, `offsets`, `targets`).
        section: &'static str,
        /// Bytes required.
        expected: usize,
        /// Bytes available.
        found: usize,
    },

    /// A header count or payload entry is negative.
    #[error("negative {field} in binary graph: {value}")]
    Negative {
        /// Which value was negative.
        field: &'static str,
        /// The offending value.
        value: i32,
    },

    /// The graph does not fit the 32-bit binary format.
    #[error("graph too large for the binary format: {0}")]
    TooLarge(String),

    /// Offsets/targets do not describe a valid CSR graph.
    #[error("invalid CSR: {0}")]
    InvalidCsr(String),
}

/// Result type alias for graph I/O.
pub type GraphResult<T> = std::result::Result<T, GraphError>;
