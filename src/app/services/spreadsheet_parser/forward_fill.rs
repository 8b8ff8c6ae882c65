//! Merged-cell repair
//!
//! Merged cells are exported as a value in the top cell and blanks below it.
//! Filling each column downward restores the value on every row it spans.

use crate::app::services::cell_normalizer::RawCell;

/// Fill empty cells with the last non-empty value above them in the same column
///
/// Returns the number of cells filled. Rows may be ragged; a column that a
/// row does not reach is left alone.
pub fn forward_fill(rows: &mut [Vec<RawCell>]) -> usize {
    let mut last_seen: Vec<Option<RawCell>> = Vec::new();
    let mut filled = 0;

    for row in rows.iter_mut() {
        if last_seen.len() < row.len() {
            last_seen.resize(row.len(), None);
        }
        for (column, cell) in row.iter_mut().enumerate() {
            if cell.is_empty() {
                if let Some(previous) = &last_seen[column] {
                    *cell = previous.clone();
                    filled += 1;
                }
            } else {
                last_seen[column] = Some(cell.clone());
            }
        }
    }

    filled
}
