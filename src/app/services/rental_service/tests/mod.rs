//! Tests for the rental service
//!
//! Each test gets its own in-memory store and a temporary attachment
//! directory.

use super::RentalService;
use crate::Result;
use crate::app::models::{AttachmentKind, FieldValue, NaturalKey};
use crate::app::services::attachment_store::{AttachmentStore, FsAttachmentStore, StoredAttachment};
use crate::app::services::lifecycle::LifecycleEvaluator;
use crate::app::services::record_store::RecordStore;
use crate::app::services::spreadsheet_parser::SpreadsheetParser;
use crate::app::services::spreadsheet_parser::tests::{contract_cells, legacy_grid, xlsx_bytes};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tempfile::TempDir;


/// Service over a fresh store with attachments under a temporary directory
pub async fn create_test_service() -> (RentalService, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::in_memory().await.unwrap();
    let attachments = FsAttachmentStore::new(dir.path().join("files"), "files");
    let service = RentalService::new(
        store,
        Arc::new(attachments),
        SpreadsheetParser::default(),
        LifecycleEvaluator::default(),
    );
    (service, dir)
}

/// Legacy-layout workbook with one complete row per key
pub fn workbook(keys: &[(&str, &str)]) -> Vec<u8> {
    let rows = keys
        .iter()
        .map(|(tid, lokasi)| contract_cells(tid, lokasi))
        .collect();
    xlsx_bytes(&legacy_grid(rows))
}

/// Field values for a complete row
pub fn row_values(tid: &str, lokasi: &str) -> BTreeMap<String, FieldValue> {
    [
        ("jenis_mesin", FieldValue::Text("ATM".to_string())),
        ("tid", FieldValue::Text(tid.to_string())),
        ("kc_supervisi", FieldValue::Text("KC Bandung".to_string())),
        ("lokasi", FieldValue::Text(lokasi.to_string())),
        ("harga_sewa_tahun", FieldValue::Text("Rp 1.250.000".to_string())),
        ("periode_akhir", FieldValue::Text("Desember 2030".to_string())),
        ("pic", FieldValue::Text("Sari".to_string())),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value))
    .collect()
}

pub fn key(tid: &str, lokasi: &str) -> NaturalKey {
    NaturalKey::new(tid, lokasi)
}

/// Attachment store that shuts the record store down right after writing,
/// so the slot update that follows cannot commit
#[derive(Debug)]
pub struct ClosingAttachmentStore {
    pub inner: FsAttachmentStore,
    pub store: RecordStore,
}

#[async_trait]
impl AttachmentStore for ClosingAttachmentStore {
    async fn store(
        &self,
        key: &NaturalKey,
        kind: AttachmentKind,
        filename: &str,
        bytes: &[u8],
    ) -> Result<StoredAttachment> {
        let stored = self.inner.store(key, kind, filename, bytes).await?;
        self.store.close().await;
        Ok(stored)
    }

    async fn remove(&self, url: &str) -> Result<bool> {
        self.inner.remove(url).await
    }
}
