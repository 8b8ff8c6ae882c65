//! Field-by-field comparison of rental rows

use crate::app::models::{FieldValue, RecordField, RentalRow};
use serde::Serialize;
use std::fmt;

/// One field whose stored value differs from the incoming value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldChange {
    pub field: RecordField,
    pub before: FieldValue,
    pub after: FieldValue,
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.field, self.before, self.after)
    }
}

/// Fields of `incoming` that differ from `stored`
///
/// Key fields are never reported: a matching key is what paired the rows.
pub fn diff_rows(stored: &RentalRow, incoming: &RentalRow) -> Vec<FieldChange> {
    RecordField::ALL
        .into_iter()
        .filter(|field| !field.is_key())
        .filter_map(|field| {
            let before = field.value(stored);
            let after = field.value(incoming);
            (before != after).then_some(FieldChange {
                field,
                before,
                after,
            })
        })
        .collect()
}
