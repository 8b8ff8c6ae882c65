//! Persistence capability used by the reconciler

use crate::Result;
use crate::app::models::{NaturalKey, RecordField, RentalRecord, RentalRow};
use async_trait::async_trait;

/// Lookup and write access to stored records
///
/// Implemented by a record store transaction, so every call made during one
/// reconciliation lands in the same unit of work.
#[async_trait]
pub trait RecordLedger: Send {
    /// Record stored under `key`, if any
    async fn find_by_key(&mut self, key: &NaturalKey) -> Result<Option<RentalRecord>>;

    /// Insert a new record with default lifecycle values, returning its id
    async fn insert(&mut self, row: &RentalRow) -> Result<i64>;

    /// Overwrite `fields` of record `id` with the values in `row`
    async fn update_fields(
        &mut self,
        id: i64,
        row: &RentalRow,
        fields: &[RecordField],
    ) -> Result<()>;
}
