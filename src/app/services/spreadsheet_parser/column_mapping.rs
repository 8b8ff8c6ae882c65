//! Fixed column layout of the contract spreadsheet
//!
//! Data columns are positional. Older exports carry a leading row-number
//! column that is dropped before mapping.

use crate::app::models::RecordField;
use crate::app::services::cell_normalizer::RawCell;
use crate::{Error, Result};

/// Column layout for a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Index of the first data column
    pub offset: usize,
}

impl ColumnLayout {
    pub fn new(row_number_column: bool) -> Self {
        Self {
            offset: usize::from(row_number_column),
        }
    }

    /// Number of columns the sheet is expected to have
    pub fn expected_width(&self) -> usize {
        self.offset + RecordField::ALL.len()
    }

    /// Check the grid has exactly the expected data columns
    ///
    /// Extra columns are tolerated only while every data cell in them is empty,
    /// since formatting alone can widen a sheet's used range.
    pub fn validate(&self, grid: &[Vec<RawCell>], data_start: usize) -> Result<()> {
        let width = grid.iter().map(Vec::len).max().unwrap_or(0);
        let expected = self.expected_width();

        if width < expected {
            return Err(Error::parse(format!(
                "Expected {} columns but the sheet has {}",
                expected, width
            )));
        }

        let stray = grid.iter().skip(data_start).enumerate().find_map(|(index, row)| {
            row.iter()
                .skip(expected)
                .position(|cell| !cell.is_empty())
                .map(|column| (data_start + index + 1, expected + column + 1))
        });
        if let Some((row, column)) = stray {
            return Err(Error::parse(format!(
                "Expected {} columns but row {} has data in column {}",
                expected, row, column
            )));
        }

        Ok(())
    }

    /// Data cells of one sheet row, padded to the full field count
    pub fn data_cells(&self, row: &[RawCell]) -> Vec<RawCell> {
        (0..RecordField::ALL.len())
            .map(|index| {
                row.get(self.offset + index)
                    .cloned()
                    .unwrap_or(RawCell::Empty)
            })
            .collect()
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::new(true)
    }
}
