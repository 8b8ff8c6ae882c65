//! Conversion between table rows and rental records

use crate::app::models::{
    Attachment, AttachmentKind, Attachments, LifecycleState, RecordField, RentalRecord, RentalRow,
};
use crate::{Error, Result};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use std::sync::LazyLock;
use tracing::warn;

/// Every column read back for a record, in table order
pub static SELECT_COLUMNS: LazyLock<Vec<String>> = LazyLock::new(|| {
    let mut columns = vec!["id".to_string()];
    columns.extend(RecordField::ALL.iter().map(|field| field.name().to_string()));
    columns.push("state".to_string());
    columns.push("notification".to_string());
    for kind in AttachmentKind::ALL {
        for suffix in ["url", "name", "uploaded_at"] {
            columns.push(format!("{}_{}", kind.column_prefix(), suffix));
        }
    }
    columns
});

fn column_error(column: &str, source: sqlx::Error) -> Error {
    Error::database(format!("Failed to read column '{}'", column), source)
}

/// Stored state text, read as Safe when it is not a known state
fn stored_state(id: i64, text: &str) -> LifecycleState {
    text.parse().unwrap_or_else(|_| {
        warn!("Record {} has unknown state '{}', using safe", id, text);
        LifecycleState::Safe
    })
}

fn attachment_from_row(row: &SqliteRow, kind: AttachmentKind) -> Result<Attachment> {
    let get = |suffix: &str| -> Result<Option<String>> {
        let column = format!("{}_{}", kind.column_prefix(), suffix);
        row.try_get::<Option<String>, _>(column.as_str())
            .map_err(|e| column_error(&column, e))
    };
    Ok(Attachment {
        url: get("url")?,
        name: get("name")?,
        uploaded_at: get("uploaded_at")?,
    })
}

/// Build a record from a row selected with [`SELECT_COLUMNS`]
pub fn record_from_row(row: &SqliteRow) -> Result<RentalRecord> {
    let mut data = RentalRow::default();
    for field in RecordField::ALL {
        let text: Option<String> = row
            .try_get(field.name())
            .map_err(|e| column_error(field.name(), e))?;
        field.load_column_text(&mut data, text);
    }

    let id: i64 = row.try_get("id").map_err(|e| column_error("id", e))?;
    let state: String = row
        .try_get("state")
        .map_err(|e| column_error("state", e))?;
    let notification: bool = row
        .try_get("notification")
        .map_err(|e| column_error("notification", e))?;

    let mut attachments = Attachments::default();
    for kind in AttachmentKind::ALL {
        attachments.set(kind, attachment_from_row(row, kind)?);
    }

    Ok(RentalRecord {
        id,
        data,
        state: stored_state(id, &state),
        notification,
        attachments,
    })
}
