//! Service operations over the record store

use super::report::{AddOutcome, EditOutcome, ImportReport, ListReport};
use crate::app::models::{
    Attachment, AttachmentKind, FieldValue, NaturalKey, RecordField, RentalRecord, RentalRow,
};
use crate::app::services::attachment_store::{AttachmentStore, FsAttachmentStore, StoredAttachment};
use crate::app::services::cell_normalizer::FallbackPolicy;
use crate::app::services::lifecycle::{ExpiryBasis, LifecycleEvaluator};
use crate::app::services::reconciler::{ReconcileMode, Reconciler, RecordLedger};
use crate::app::services::record_store::RecordStore;
use crate::app::services::spreadsheet_parser::SpreadsheetParser;
use crate::app::services::workbook_export::write_workbook;
use crate::config::Config;
use crate::{Error, Result};
use chrono::NaiveDateTime;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Rental contract operations
#[derive(Debug, Clone)]
pub struct RentalService {
    store: RecordStore,
    attachments: Arc<dyn AttachmentStore>,
    parser: SpreadsheetParser,
    evaluator: LifecycleEvaluator,
}

impl RentalService {
    pub fn new(
        store: RecordStore,
        attachments: Arc<dyn AttachmentStore>,
        parser: SpreadsheetParser,
        evaluator: LifecycleEvaluator,
    ) -> Self {
        Self {
            store,
            attachments,
            parser,
            evaluator,
        }
    }

    /// Open the configured database and attachment directory
    pub async fn connect(config: &Config) -> Result<Self> {
        let store = RecordStore::connect(&config.database).await?;
        let attachments = FsAttachmentStore::new(
            config.attachments.root_dir.clone(),
            config.attachments.url_prefix.clone(),
        );
        Ok(Self::new(
            store,
            Arc::new(attachments),
            SpreadsheetParser::new(config.parser.clone()),
            LifecycleEvaluator::new(config.lifecycle.warning_window_days),
        ))
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    fn fallback(&self) -> FallbackPolicy {
        self.parser.config().fallback
    }

    // -------------------------------------------------------------------------
    // Imports
    // -------------------------------------------------------------------------

    /// Create records for keys not yet stored; known keys are skipped
    pub async fn import_create(&self, workbook: &[u8]) -> Result<ImportReport> {
        self.import(workbook, ReconcileMode::Create).await
    }

    /// Overwrite differing fields of stored records; unknown keys are skipped
    pub async fn import_update(&self, workbook: &[u8]) -> Result<ImportReport> {
        self.import(workbook, ReconcileMode::Update).await
    }

    /// Create unknown keys and update known ones
    pub async fn import_upsert(&self, workbook: &[u8]) -> Result<ImportReport> {
        self.import(workbook, ReconcileMode::Upsert).await
    }

    /// Import a workbook from disk
    pub async fn import_file(&self, path: &Path, mode: ReconcileMode) -> Result<ImportReport> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;
        self.import(&bytes, mode).await
    }

    /// Parse `workbook` and reconcile every row in a single transaction
    ///
    /// A parse error persists nothing. A store error partway through drops
    /// the transaction, so the whole workbook is rolled back.
    pub async fn import(&self, workbook: &[u8], mode: ReconcileMode) -> Result<ImportReport> {
        let parsed = self.parser.parse_bytes(workbook)?;

        let mut tx = self.store.begin().await?;
        let reconciler = Reconciler::new(mode);
        let summary = reconciler.reconcile(&parsed.rows, &mut tx).await?;
        tx.commit().await?;

        info!(
            "Import ({}) committed: {} created, {} updated, {} skipped",
            mode, summary.created, summary.updated, summary.skipped
        );

        Ok(ImportReport {
            mode,
            parse: parsed.stats,
            summary,
        })
    }

    // -------------------------------------------------------------------------
    // Single-record edits
    // -------------------------------------------------------------------------

    /// Add one record from named field values
    ///
    /// Unknown names are rejected before anything else, blank required fields
    /// before the key lookup, and an existing key before any write.
    pub async fn add_row(&self, values: &BTreeMap<String, FieldValue>) -> Result<AddOutcome> {
        for name in values.keys() {
            name.parse::<RecordField>()?;
        }

        let mut row = RentalRow::default();
        let mut warnings = Vec::new();
        for field in RecordField::ALL {
            let value = values
                .get(field.name())
                .cloned()
                .unwrap_or(FieldValue::Null);
            if let Some(failure) = field.assign(&mut row, value, self.fallback())? {
                warn!("{}: {}", field, failure);
                warnings.push((field, failure));
            }
        }

        let key = row.key();
        let mut tx = self.store.begin().await?;
        if tx.find_by_key(&key).await?.is_some() {
            tx.rollback().await?;
            return Err(Error::duplicate_key(&key));
        }
        let id = tx.insert(&row).await?;
        tx.commit().await?;

        info!("Added record {} for {}", id, key);
        Ok(AddOutcome { id, warnings })
    }

    /// Set one field of the record identified by `key`
    pub async fn edit_field(
        &self,
        key: &NaturalKey,
        field_name: &str,
        value: FieldValue,
    ) -> Result<EditOutcome> {
        let field: RecordField = field_name.parse()?;

        let mut tx = self.store.begin().await?;
        let record = tx
            .find_by_key(key)
            .await?
            .ok_or_else(|| Error::not_found(key.to_string()))?;

        let mut data = record.data.clone();
        let warning = field.assign(&mut data, value, self.fallback())?;
        if let Some(failure) = &warning {
            warn!("{} of record {}: {}", field, record.id, failure);
        }

        if data == record.data {
            tx.rollback().await?;
            debug!("Record {} already has this {}", record.id, field);
            return Ok(EditOutcome {
                id: record.id,
                field,
                changed: false,
                warning,
            });
        }

        tx.update_fields(record.id, &data, &[field]).await?;
        tx.commit().await?;

        info!("Updated {} of record {}", field, record.id);
        Ok(EditOutcome {
            id: record.id,
            field,
            changed: true,
            warning,
        })
    }

    /// Delete the record identified by `key` and release its attachments
    pub async fn delete_row(&self, key: &NaturalKey) -> Result<()> {
        let mut tx = self.store.begin().await?;
        let record = tx
            .find_by_key(key)
            .await?
            .ok_or_else(|| Error::not_found(key.to_string()))?;
        tx.delete(record.id).await?;
        tx.commit().await?;

        info!("Deleted record {} for {}", record.id, key);
        self.release_files(record.attachments.urls()).await;
        Ok(())
    }

    /// Delete every listed id that exists, returning how many were deleted
    pub async fn batch_delete(&self, ids: &BTreeSet<i64>) -> Result<usize> {
        let mut tx = self.store.begin().await?;
        let mut urls = Vec::new();
        let mut deleted = 0;

        for &id in ids {
            let Some(record) = tx.find_by_id(id).await? else {
                debug!("Record {} not present, skipping", id);
                continue;
            };
            if tx.delete(id).await? {
                deleted += 1;
                urls.extend(record.attachments.urls());
            }
        }
        tx.commit().await?;

        info!("Deleted {} of {} requested records", deleted, ids.len());
        self.release_files(urls).await;
        Ok(deleted)
    }

    async fn release_files(&self, urls: Vec<String>) {
        for url in urls {
            match self.attachments.remove(&url).await {
                Ok(true) => debug!("Released {}", url),
                Ok(false) => debug!("Attachment {} already gone", url),
                Err(e) => warn!("Failed to release {}: {}", url, e),
            }
        }
    }

    // -------------------------------------------------------------------------
    // Listing and export
    // -------------------------------------------------------------------------

    /// Every record, with lifecycle values refreshed for the current time
    pub async fn list_all(&self) -> Result<ListReport> {
        self.list_all_at(chrono::Local::now().naive_local()).await
    }

    /// Every record, with lifecycle values refreshed as of `now`
    ///
    /// Only records whose values changed are written back.
    pub async fn list_all_at(&self, now: NaiveDateTime) -> Result<ListReport> {
        let mut tx = self.store.begin().await?;
        let mut records = tx.list_all().await?;
        let mut lifecycle_updates = 0;
        let mut malformed = 0;

        for record in &mut records {
            let evaluation = self.evaluator.evaluate_record(record, now);
            if let ExpiryBasis::Malformed(text) = &evaluation.basis {
                malformed += 1;
                warn!(
                    "Record {} {} has unreadable periode_akhir '{}'",
                    record.id,
                    record.key(),
                    text
                );
            }

            if LifecycleEvaluator::needs_update(record, &evaluation) {
                tx.set_lifecycle(record.id, evaluation.state, evaluation.notification)
                    .await?;
                record.state = evaluation.state;
                record.notification = evaluation.notification;
                lifecycle_updates += 1;
            }
        }
        tx.commit().await?;

        debug!(
            "Listed {} records ({} lifecycle updates)",
            records.len(),
            lifecycle_updates
        );
        Ok(ListReport {
            records,
            lifecycle_updates,
            malformed,
        })
    }

    /// Write every record to an xlsx workbook, returning the record count
    pub async fn export_workbook(&self, path: &Path) -> Result<usize> {
        let listing = self.list_all().await?;
        write_workbook(&listing.records, path)?;
        let count = listing.records.len();
        info!("Exported {} records to {}", count, path.display());
        Ok(count)
    }

    // -------------------------------------------------------------------------
    // Attachments
    // -------------------------------------------------------------------------

    /// Store a document and link it to one slot of the record
    ///
    /// The file is written before the slot update commits and is left in
    /// place if that commit fails. A replaced file is released once the new
    /// descriptor is committed.
    pub async fn upload_attachment(
        &self,
        key: &NaturalKey,
        kind: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<StoredAttachment> {
        let kind: AttachmentKind = kind.parse()?;
        let record = self
            .store
            .fetch_by_key(key)
            .await?
            .ok_or_else(|| Error::not_found(key.to_string()))?;

        let stored = self.attachments.store(key, kind, filename, bytes).await?;
        let previous = record.attachments.get(kind).url.clone();

        let mut tx = self.store.begin().await?;
        tx.set_attachment(
            record.id,
            kind,
            &Attachment {
                url: Some(stored.url.clone()),
                name: Some(filename.to_string()),
                uploaded_at: Some(stored.uploaded_at.clone()),
            },
        )
        .await?;
        tx.commit().await?;

        info!(
            "Linked {} to {} of record {}",
            stored.stored_name, kind, record.id
        );
        if let Some(previous) = previous.filter(|url| *url != stored.url) {
            self.release_files(vec![previous]).await;
        }
        Ok(stored)
    }

    /// Look up a record without touching lifecycle values
    pub async fn find(&self, key: &NaturalKey) -> Result<Option<RentalRecord>> {
        self.store.fetch_by_key(key).await
    }
}
