//! Parsing statistics and result structures for spreadsheet imports
//!
//! This module provides types for tracking how many sheet rows became rental
//! rows, how many were dropped, and which cells could not be normalized.

use crate::app::models::{RecordField, RentalRow};
use crate::app::services::cell_normalizer::NormalizationFailure;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parsing result with rows and statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Rows that passed required-field checks, in sheet order
    pub rows: Vec<RentalRow>,

    pub stats: ParseStats,
}

/// A cell that was stored through the fallback policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellWarning {
    /// 1-based sheet row
    pub row: usize,

    pub field: RecordField,
    pub failure: NormalizationFailure,
}

impl fmt::Display for CellWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}, {}: {}", self.row, self.field, self.failure)
    }
}

/// Parsing statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseStats {
    /// Sheet rows after the header block
    pub total_rows: usize,

    /// Entirely blank rows that were ignored
    pub blank_rows: usize,

    pub records_parsed: usize,

    /// Rows dropped for a missing required field
    pub rows_dropped: usize,

    /// Cells repaired by merged-cell fill
    pub cells_filled: usize,

    pub warnings: Vec<CellWarning>,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Data rows, i.e. rows that were not blank
    pub fn data_rows(&self) -> usize {
        self.total_rows - self.blank_rows
    }

    /// Calculate success rate as a percentage of data rows
    pub fn success_rate(&self) -> f64 {
        let data_rows = self.data_rows();
        if data_rows == 0 {
            0.0
        } else {
            (self.records_parsed as f64 / data_rows as f64) * 100.0
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
