//! Conversion of one spreadsheet row into a typed rental row

use crate::app::models::{RecordField, RentalRow};
use crate::app::services::cell_normalizer::{FallbackPolicy, NormalizationFailure, RawCell};

static EMPTY_CELL: RawCell = RawCell::Empty;

/// Result of parsing one data row
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// Row converted, with any non-fatal normalization failures
    Parsed(RentalRow, Vec<(RecordField, NormalizationFailure)>),
    /// Row lacks a required value and is dropped
    MissingRequired(RecordField),
}

/// Parse the fifteen data cells of a row
///
/// Required columns are checked before anything is normalized so that a
/// dropped row never contributes warnings.
pub fn parse_rental_row(cells: &[RawCell], fallback: FallbackPolicy) -> RowOutcome {
    let cell_for = |field: RecordField| cells.get(field.position()).unwrap_or(&EMPTY_CELL);

    if let Some(missing) = RecordField::ALL
        .into_iter()
        .filter(RecordField::is_required)
        .find(|field| cell_for(*field).cell_text().is_none())
    {
        return RowOutcome::MissingRequired(missing);
    }

    let mut row = RentalRow::default();
    let mut warnings = Vec::new();

    for field in RecordField::ALL {
        match field.assign_cell(&mut row, cell_for(field), fallback) {
            Ok(Some(failure)) => warnings.push((field, failure)),
            Ok(None) => {}
            // Only a blank required cell fails, and those were checked above
            Err(_) => return RowOutcome::MissingRequired(field),
        }
    }

    RowOutcome::Parsed(row, warnings)
}
