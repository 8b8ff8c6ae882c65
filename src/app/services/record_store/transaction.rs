//! Transactional access to the record table

use super::row_mapping::{SELECT_COLUMNS, record_from_row};
use crate::app::models::{
    Attachment, AttachmentKind, LifecycleState, NaturalKey, RecordField, RentalRecord, RentalRow,
};
use crate::app::services::reconciler::RecordLedger;
use crate::constants::RENTAL_TABLE;
use crate::{Error, Result};
use async_trait::async_trait;
use sqlx::{Sqlite, Transaction};
use tracing::debug;

/// Unit of work against the record table
///
/// Dropping a `StoreTx` without calling [`StoreTx::commit`] rolls it back.
pub struct StoreTx {
    tx: Transaction<'static, Sqlite>,
}

impl std::fmt::Debug for StoreTx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreTx").finish_non_exhaustive()
    }
}

impl StoreTx {
    pub(super) fn new(tx: Transaction<'static, Sqlite>) -> Self {
        Self { tx }
    }

    fn select_sql(filter: &str) -> String {
        format!(
            "SELECT {} FROM {} {}",
            SELECT_COLUMNS.join(", "),
            RENTAL_TABLE,
            filter
        )
    }

    pub async fn find_by_id(&mut self, id: i64) -> Result<Option<RentalRecord>> {
        let row = sqlx::query(&Self::select_sql("WHERE id = ?"))
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| Error::database(format!("Failed to load record {}", id), e))?;
        row.as_ref().map(record_from_row).transpose()
    }

    /// All records in id order
    pub async fn list_all(&mut self) -> Result<Vec<RentalRecord>> {
        let rows = sqlx::query(&Self::select_sql("ORDER BY id"))
            .fetch_all(&mut *self.tx)
            .await
            .map_err(|e| Error::database("Failed to list records", e))?;
        rows.iter().map(record_from_row).collect()
    }

    /// Persist lifecycle values for record `id`
    pub async fn set_lifecycle(
        &mut self,
        id: i64,
        state: LifecycleState,
        notification: bool,
    ) -> Result<()> {
        let sql = format!(
            "UPDATE {} SET state = ?, notification = ? WHERE id = ?",
            RENTAL_TABLE
        );
        sqlx::query(&sql)
            .bind(state.as_str())
            .bind(notification)
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| Error::database(format!("Failed to update state of {}", id), e))?;
        Ok(())
    }

    /// Record an attachment descriptor in one slot of record `id`
    pub async fn set_attachment(
        &mut self,
        id: i64,
        kind: AttachmentKind,
        attachment: &Attachment,
    ) -> Result<()> {
        let prefix = kind.column_prefix();
        let sql = format!(
            "UPDATE {} SET {prefix}_url = ?, {prefix}_name = ?, {prefix}_uploaded_at = ? WHERE id = ?",
            RENTAL_TABLE
        );
        let result = sqlx::query(&sql)
            .bind(&attachment.url)
            .bind(&attachment.name)
            .bind(&attachment.uploaded_at)
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| Error::database(format!("Failed to link {} to {}", kind, id), e))?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found(format!("record id {}", id)));
        }
        Ok(())
    }

    /// Delete record `id`, returning whether it existed
    pub async fn delete(&mut self, id: i64) -> Result<bool> {
        let sql = format!("DELETE FROM {} WHERE id = ?", RENTAL_TABLE);
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| Error::database(format!("Failed to delete record {}", id), e))?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn commit(self) -> Result<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| Error::database("Failed to commit transaction", e))
    }

    pub async fn rollback(self) -> Result<()> {
        self.tx
            .rollback()
            .await
            .map_err(|e| Error::database("Failed to roll back transaction", e))
    }
}

#[async_trait]
impl RecordLedger for StoreTx {
    async fn find_by_key(&mut self, key: &NaturalKey) -> Result<Option<RentalRecord>> {
        let row = sqlx::query(&Self::select_sql("WHERE tid = ? AND lokasi = ?"))
            .bind(&key.tid)
            .bind(&key.lokasi)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| Error::database(format!("Failed to look up {}", key), e))?;
        row.as_ref().map(record_from_row).transpose()
    }

    async fn insert(&mut self, row: &RentalRow) -> Result<i64> {
        let columns: Vec<&str> = RecordField::ALL.iter().map(|field| field.name()).collect();
        let sql = format!(
            "INSERT INTO {} ({}, state, notification) VALUES ({}, ?, ?)",
            RENTAL_TABLE,
            columns.join(", "),
            vec!["?"; columns.len()].join(", ")
        );

        let mut query = sqlx::query(&sql);
        for field in RecordField::ALL {
            query = query.bind(field.column_text(row));
        }
        let result = query
            .bind(LifecycleState::Safe.as_str())
            .bind(false)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| Error::from_write(e, &row.key()))?;

        let id = result.last_insert_rowid();
        debug!("Inserted record {} for {}", id, row.key());
        Ok(id)
    }

    async fn update_fields(
        &mut self,
        id: i64,
        row: &RentalRow,
        fields: &[RecordField],
    ) -> Result<()> {
        if fields.is_empty() {
            return Ok(());
        }

        let assignments: Vec<String> = fields
            .iter()
            .map(|field| format!("{} = ?", field.name()))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?",
            RENTAL_TABLE,
            assignments.join(", ")
        );

        let mut query = sqlx::query(&sql);
        for field in fields {
            query = query.bind(field.column_text(row));
        }
        let result = query
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| Error::from_write(e, &row.key()))?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found(format!("record id {}", id)));
        }
        Ok(())
    }
}
