//! Tests for the reconciler
//!
//! Provides an in-memory ledger that counts writes, and one that fails on
//! demand, so decisions can be checked without a database.

use crate::app::models::{
    Attachments, LifecycleState, MoneyValue, NaturalKey, RecordField, RentalRecord, RentalRow,
};
use crate::app::services::reconciler::RecordLedger;
use crate::{Error, Result};
use async_trait::async_trait;


/// Ledger backed by a vector of records
#[derive(Debug, Default)]
pub struct MemoryLedger {
    pub records: Vec<RentalRecord>,
    pub inserts: usize,
    pub field_writes: usize,
    next_id: i64,
}

impl MemoryLedger {
    pub fn with_rows(rows: &[RentalRow]) -> Self {
        let mut ledger = Self::default();
        for row in rows {
            ledger.push(row.clone());
        }
        ledger
    }

    fn push(&mut self, row: RentalRow) -> i64 {
        self.next_id += 1;
        self.records.push(RentalRecord {
            id: self.next_id,
            data: row,
            state: LifecycleState::Safe,
            notification: false,
            attachments: Attachments::default(),
        });
        self.next_id
    }

    pub fn get(&self, tid: &str, lokasi: &str) -> Option<&RentalRecord> {
        self.records
            .iter()
            .find(|record| record.data.tid == tid && record.data.lokasi == lokasi)
    }
}

#[async_trait]
impl RecordLedger for MemoryLedger {
    async fn find_by_key(&mut self, key: &NaturalKey) -> Result<Option<RentalRecord>> {
        Ok(self.get(&key.tid, &key.lokasi).cloned())
    }

    async fn insert(&mut self, row: &RentalRow) -> Result<i64> {
        if self.get(&row.tid, &row.lokasi).is_some() {
            return Err(Error::duplicate_key(&row.key()));
        }
        self.inserts += 1;
        Ok(self.push(row.clone()))
    }

    async fn update_fields(
        &mut self,
        id: i64,
        row: &RentalRow,
        fields: &[RecordField],
    ) -> Result<()> {
        let record = self
            .records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| Error::not_found(format!("record {}", id)))?;
        for field in fields {
            field.load_column_text(&mut record.data, field.column_text(row));
        }
        self.field_writes += fields.len();
        Ok(())
    }
}

/// Ledger whose inserts fail after a number of successes
#[derive(Debug, Default)]
pub struct FailingLedger {
    pub inner: MemoryLedger,
    pub inserts_before_failure: usize,
}

#[async_trait]
impl RecordLedger for FailingLedger {
    async fn find_by_key(&mut self, key: &NaturalKey) -> Result<Option<RentalRecord>> {
        self.inner.find_by_key(key).await
    }

    async fn insert(&mut self, row: &RentalRow) -> Result<i64> {
        if self.inner.inserts >= self.inserts_before_failure {
            return Err(Error::configuration("simulated store failure"));
        }
        self.inner.insert(row).await
    }

    async fn update_fields(
        &mut self,
        id: i64,
        row: &RentalRow,
        fields: &[RecordField],
    ) -> Result<()> {
        self.inner.update_fields(id, row, fields).await
    }
}

/// Create a test row with the given key
pub fn create_test_row(tid: &str, lokasi: &str) -> RentalRow {
    RentalRow {
        jenis_mesin: "ATM".to_string(),
        tid: tid.to_string(),
        kc_supervisi: "KC Surabaya".to_string(),
        lokasi: lokasi.to_string(),
        vendor_cro: Some("PT Vendor".to_string()),
        harga_sewa_tahun: Some(MoneyValue::Amount(1_250_000.0)),
        periode_akhir: Some("2026-12".to_string()),
        nomor_hp: "0811".to_string(),
        ..Default::default()
    }
}
