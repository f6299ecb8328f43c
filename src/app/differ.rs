use crate::app::models::{DiffRow, LineSet};

/// Paths held by exactly one of the two inventories, in byte-wise order.
///
/// Paths both sides agree on never produce a row.
pub fn diff(left: &LineSet, right: &LineSet) -> Vec<DiffRow> {
    // BTreeSet's symmetric difference already walks both sets in order.
    left.symmetric_difference(right)
        .map(|path| DiffRow {
            path: path.clone(),
            present_in_left: left.contains(path),
            present_in_right: right.contains(path),
        })
        .collect()
}
