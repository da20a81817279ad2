//! Reverse-index construction by counting sort.

use crate::graph::Vertex;

/// Builds the CSC (reverse) index of a forward CSR.
///
/// Count in-degrees, prefix-sum them into column offsets, then scatter each
/// source id into its column. Sources within a column appear in increasing
/// order because rows are scanned in order.
///
/// **Time complexity**: \(O(n + m)\)
pub(super) fn transpose(offsets: &[usize], targets: &[Vertex]) -> (Vec<usize>, Vec<Vertex>) {
    let n = offsets.len() - 1;

    // Count incoming edges for each node, shifted by one so the prefix sum
    // lands directly in `col_offsets`.
    let mut col_offsets = vec![0usize; n + 1];
    for &v in targets {
        col_offsets[v + 1] += 1;
    }
    for i in 0..n {
        col_offsets[i + 1] += col_offsets[i];
    }

    let mut sources = vec![0usize; targets.len()];
    let mut write_pos = col_offsets[..n].to_vec();
    for u in 0..n {
        for &v in &targets[offsets[u]..offsets[u + 1]] {
            sources[write_pos[v]] = u;
            write_pos[v] += 1;
        }
    }

    (col_offsets, sources)
}
