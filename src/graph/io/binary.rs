//! Binary CSR codec.
//!
//! Layout (all fields little-endian `i32`):
//!
//! | Field | Count |
//! |-------|-------|
//! | magic `0xDEADBEEF` | 1 |
//! | node count `n` | 1 |
//! | edge count `m` | 1 |
//! | forward row start of each vertex | `n` |
//! | forward edge targets | `m` |
//!
//! The row end of vertex `n - 1` is implicitly `m`. The reverse index is never
//! stored; it is rebuilt on every load.

use std::io::{Read, Write};

use zerocopy::{
    byteorder::{LittleEndian, I32},
    AsBytes, FromBytes, FromZeroes,
};

use crate::graph::{
    io::{GraphError, GraphResult},
    CsrDigraph,
};

/// Magic constant opening every binary graph file.
pub const GRAPH_MAGIC: u32 = 0xDEAD_BEEF;

const WORD: usize = core::mem::size_of::<i32>();

#[derive(FromZeroes, FromBytes, AsBytes, Clone, Copy)]
#[repr(C)]
struct BinaryHeader {
    magic: I32<LittleEndian>,
    nodes: I32<LittleEndian>,
    edges: I32<LittleEndian>,
}

const HEADER_LEN: usize = core::mem::size_of::<BinaryHeader>();

/// Returns `true` if `bytes` opens with the binary magic constant.
pub fn has_binary_magic(bytes: &[u8]) -> bool {
    bytes.len() >= WORD && bytes[..WORD] == GRAPH_MAGIC.to_le_bytes()
}

/// Reads a whole binary graph from `reader`.
pub fn read_binary<R: Read>(mut reader: R) -> GraphResult<CsrDigraph> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|source| GraphError::Io {
            context: "reading binary graph",
            source,
        })?;
    decode_binary(&bytes)
}

/// Decodes a binary graph from an in-memory buffer.
///
/// Trailing bytes after the target section are ignored.
pub fn decode_binary(bytes: &[u8]) -> GraphResult<CsrDigraph> {
    if bytes.len() < HEADER_LEN {
        return Err(GraphError::Truncated {
            section: "header",
            expected: HEADER_LEN,
            found: bytes.len(),
        });
    }
    let header = BinaryHeader::read_from(&bytes[..HEADER_LEN]).ok_or(GraphError::Truncated {
        section: "header",
        expected: HEADER_LEN,
        found: bytes.len(),
    })?;

    let found = header.magic.get() as u32;
    if found != GRAPH_MAGIC {
        return Err(GraphError::BadMagic { found });
    }
    let n = non_negative("node count", header.nodes.get())?;
    let m = non_negative("edge count", header.edges.get())?;

    let payload = &bytes[HEADER_LEN..];
    let (offset_bytes, payload) = split_section(payload, "offsets", n)?;
    let (target_bytes, _) = split_section(payload, "targets", m)?;

    let mut offsets = decode_words(offset_bytes, "row offset")?;
    offsets.push(m);
    let targets = decode_words(target_bytes, "edge target")?;

    CsrDigraph::try_from_csr_parts(offsets, targets)
}

/// Writes `graph` in binary form.
pub fn write_binary<W: Write>(mut writer: W, graph: &CsrDigraph) -> GraphResult<()> {
    let header = BinaryHeader {
        magic: I32::new(GRAPH_MAGIC as i32),
        nodes: I32::new(to_i32("node count", graph.node_count())?),
        edges: I32::new(to_i32("edge count", graph.edge_count())?),
    };

    // Row starts only; the final `n + 1`-th offset is implied by the edge count.
    let n = graph.node_count();
    let words = graph.offsets()[..n]
        .iter()
        .chain(graph.targets())
        .map(|&x| to_i32("offset", x).map(I32::<LittleEndian>::new))
        .collect::<GraphResult<Vec<_>>>()?;

    let io = |source| GraphError::Io {
        context: "writing binary graph",
        source,
    };
    writer.write_all(header.as_bytes()).map_err(io)?;
    writer.write_all(words.as_slice().as_bytes()).map_err(io)?;
    writer.flush().map_err(io)
}

fn split_section<'a>(
    bytes: &'a [u8],
    section: &'static str,
    count: usize,
) -> GraphResult<(&'a [u8], &'a [u8])> {
    let expected = count.checked_mul(WORD).ok_or_else(|| {
        GraphError::TooLarge(format!("{section} section of {count} entries"))
    })?;
    if bytes.len() < expected {
        return Err(GraphError::Truncated {
            section,
            expected,
            found: bytes.len(),
        });
    }
    Ok(bytes.split_at(expected))
}

fn decode_words(bytes: &[u8], field: &'static str) -> GraphResult<Vec<usize>> {
    bytes
        .chunks_exact(WORD)
        .map(|chunk| {
            let mut word = [0u8; WORD];
            word.copy_from_slice(chunk);
            non_negative(field, i32::from_le_bytes(word))
        })
        .collect()
}

fn non_negative(field: &'static str, value: i32) -> GraphResult<usize> {
    usize::try_from(value).map_err(|_| GraphError::Negative { field, value })
}

fn to_i32(field: &str, value: usize) -> GraphResult<i32> {
    i32::try_from(value).map_err(|_| GraphError::TooLarge(format!("{field} {value} exceeds i32")))
}
