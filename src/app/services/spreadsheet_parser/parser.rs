//! Core spreadsheet parser implementation
//!
//! This module handles workbook reading and coordinates the layout check,
//! merged-cell repair and per-row conversion.

use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info, warn};

use super::column_mapping::ColumnLayout;
use super::forward_fill::forward_fill;
use super::row_parser::{RowOutcome, parse_rental_row};
use super::stats::{CellWarning, ParseResult, ParseStats};
use crate::app::services::cell_normalizer::RawCell;
use crate::config::ParserConfig;
use crate::{Error, Result};
use calamine::{Reader, open_workbook_auto_from_rs};

/// Parser for contract spreadsheet exports
///
/// Layout decisions (header block, leading row-number column, fallback
/// policy) all come from [`ParserConfig`], so both export generations are
/// handled by configuration rather than separate code paths.
#[derive(Debug, Clone)]
pub struct SpreadsheetParser {
    config: ParserConfig,
    layout: ColumnLayout,
}

impl SpreadsheetParser {
    pub fn new(config: ParserConfig) -> Self {
        let layout = ColumnLayout::new(config.row_number_column);
        Self { config, layout }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a workbook file from disk
    pub fn parse_file(&self, path: &Path) -> Result<ParseResult> {
        info!("Parsing spreadsheet: {}", path.display());
        let bytes = std::fs::read(path)
            .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;
        self.parse_bytes(&bytes)
    }

    /// Parse an in-memory workbook
    ///
    /// A structurally unreadable workbook or a sheet with the wrong column
    /// count is an error; everything else is reported through the stats.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ParseResult> {
        let grid = read_grid(bytes)?;
        self.parse_grid(grid)
    }

    /// Parse an already-read grid of cells
    pub fn parse_grid(&self, grid: Vec<Vec<RawCell>>) -> Result<ParseResult> {
        let data_start = self.config.header.rows_to_skip();
        self.layout.validate(&grid, data_start)?;

        let mut stats = ParseStats::new();
        let mut sheet_rows = Vec::new();
        let mut data = Vec::new();

        for (index, row) in grid.iter().enumerate().skip(data_start) {
            stats.total_rows += 1;

            let cells: Vec<RawCell> = self
                .layout
                .data_cells(row)
                .into_iter()
                .map(|cell| if cell.is_null_marker() { RawCell::Empty } else { cell })
                .collect();

            if cells.iter().all(RawCell::is_empty) {
                stats.blank_rows += 1;
                continue;
            }
            sheet_rows.push(index + 1);
            data.push(cells);
        }

        if self.config.fill_merged_cells {
            stats.cells_filled = forward_fill(&mut data);
            debug!("Filled {} merged cells", stats.cells_filled);
        }

        let mut rows = Vec::with_capacity(data.len());
        for (sheet_row, cells) in sheet_rows.into_iter().zip(data) {
            match parse_rental_row(&cells, self.config.fallback) {
                RowOutcome::Parsed(row, failures) => {
                    for (field, failure) in failures {
                        warn!("Row {} {}: {}", sheet_row, field, failure);
                        stats.warnings.push(CellWarning {
                            row: sheet_row,
                            field,
                            failure,
                        });
                    }
                    rows.push(row);
                    stats.records_parsed += 1;
                }
                RowOutcome::MissingRequired(field) => {
                    debug!("Dropped row {}: missing {}", sheet_row, field);
                    stats.rows_dropped += 1;
                }
            }
        }

        info!(
            "Parsed {} rental rows from {} sheet rows ({} dropped, {} warnings)",
            stats.records_parsed,
            stats.total_rows,
            stats.rows_dropped,
            stats.warnings.len()
        );

        Ok(ParseResult { rows, stats })
    }
}

impl Default for SpreadsheetParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

/// Read the first worksheet into an absolute grid of cells
///
/// Row and column positions match the sheet even when the used range does
/// not start at `A1`.
pub fn read_grid(bytes: &[u8]) -> Result<Vec<Vec<RawCell>>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| Error::workbook("Unreadable workbook", e))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::parse("Workbook contains no worksheets"))?
        .map_err(|e| Error::workbook("Failed to read first worksheet", e))?;

    let Some((start_row, start_column)) = range.start() else {
        return Ok(Vec::new());
    };

    let mut grid = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells = vec![RawCell::Empty; start_column as usize];
        cells.extend(row.iter().map(RawCell::from));
        grid.push(cells);
    }

    debug!("Read worksheet grid of {} rows", grid.len());
    Ok(grid)
}
