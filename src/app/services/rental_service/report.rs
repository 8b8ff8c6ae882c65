//! Operation results

use crate::app::models::{RecordField, RentalRecord};
use crate::app::services::cell_normalizer::NormalizationFailure;
use crate::app::services::reconciler::{ReconcileMode, ReconcileSummary};
use crate::app::services::spreadsheet_parser::ParseStats;
use serde::Serialize;

/// Outcome of one spreadsheet import
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub mode: ReconcileMode,
    pub parse: ParseStats,
    pub summary: ReconcileSummary,
}

impl ImportReport {
    pub fn created(&self) -> usize {
        self.summary.created
    }

    pub fn updated(&self) -> usize {
        self.summary.updated
    }
}

/// Outcome of adding a single row
#[derive(Debug, Clone)]
pub struct AddOutcome {
    pub id: i64,

    /// Cells that could not be normalized and were resolved by the fallback policy
    pub warnings: Vec<(RecordField, NormalizationFailure)>,
}

/// Outcome of editing a single field
#[derive(Debug, Clone)]
pub struct EditOutcome {
    pub id: i64,
    pub field: RecordField,

    /// False when the stored value already matched
    pub changed: bool,
    pub warning: Option<NormalizationFailure>,
}

/// Records returned by a full listing
#[derive(Debug, Clone)]
pub struct ListReport {
    pub records: Vec<RentalRecord>,

    /// Records whose lifecycle values were rewritten
    pub lifecycle_updates: usize,

    /// Records whose end month could not be read
    pub malformed: usize,
}
