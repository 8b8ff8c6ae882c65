//! Record table definition

use crate::app::models::{AttachmentKind, RecordField};
use crate::constants::RENTAL_TABLE;
use crate::{Error, Result};
use sqlx::SqlitePool;
use tracing::debug;

/// `CREATE TABLE` statement for the record table
///
/// Amount columns are `TEXT` because a cell may hold a placeholder such as
/// "N/A" instead of a number.
pub fn create_table_sql() -> String {
    let mut columns = vec!["id INTEGER PRIMARY KEY AUTOINCREMENT".to_string()];

    for field in RecordField::ALL {
        let definition = if field.is_required() {
            format!("{} TEXT NOT NULL", field.name())
        } else if field == RecordField::NomorHp {
            format!("{} TEXT NOT NULL DEFAULT ''", field.name())
        } else {
            format!("{} TEXT", field.name())
        };
        columns.push(definition);
    }

    columns.push("state TEXT NOT NULL DEFAULT 'safe'".to_string());
    columns.push("notification BOOLEAN NOT NULL DEFAULT 0".to_string());

    for kind in AttachmentKind::ALL {
        for suffix in ["url", "name", "uploaded_at"] {
            columns.push(format!("{}_{} TEXT", kind.column_prefix(), suffix));
        }
    }

    columns.push("UNIQUE (tid, lokasi)".to_string());

    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
        RENTAL_TABLE,
        columns.join(",\n    ")
    )
}

/// Create the record table if it does not exist yet
pub async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(&create_table_sql())
        .execute(pool)
        .await
        .map_err(|e| Error::database("Failed to create record table", e))?;
    debug!("Record table '{}' ready", RENTAL_TABLE);
    Ok(())
}
