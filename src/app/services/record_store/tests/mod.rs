//! Tests for the SQLite record store
//!
//! Every test runs against its own `sqlite::memory:` database.

use super::RecordStore;
use crate::app::models::{MoneyValue, RentalRow};


/// Fresh in-memory store
pub async fn create_test_store() -> RecordStore {
    RecordStore::in_memory().await.unwrap()
}

/// Create a test row with the given key
pub fn create_test_row(tid: &str, lokasi: &str) -> RentalRow {
    RentalRow {
        jenis_mesin: "CRM".to_string(),
        tid: tid.to_string(),
        kc_supervisi: "KC Medan".to_string(),
        lokasi: lokasi.to_string(),
        harga_sewa_tahun: Some(MoneyValue::Amount(2_400_000.5)),
        total_harga_sewa_periode: Some(MoneyValue::Text("N/A".to_string())),
        periode_awal: Some("2024-01".to_string()),
        periode_akhir: Some("2026-12".to_string()),
        ..Default::default()
    }
}
