//! Reconciliation decisions and batch application

use super::diff::{FieldChange, diff_rows};
use super::ledger::RecordLedger;
use super::stats::ReconcileSummary;
use crate::Result;
use crate::app::models::{RecordField, RentalRecord, RentalRow};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// How rows without / with a stored counterpart are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconcileMode {
    /// Insert unknown keys, skip known ones
    Create,
    /// Update known keys, skip unknown ones
    Update,
    /// Insert unknown keys and update known ones
    Upsert,
}

impl fmt::Display for ReconcileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReconcileMode::Create => "create",
            ReconcileMode::Update => "update",
            ReconcileMode::Upsert => "upsert",
        })
    }
}

/// Why a row produced no write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Create mode and the key is already stored
    AlreadyExists,
    /// Update mode and the key is not stored
    NotFound,
    /// Stored record already matches
    Unchanged,
}

/// Outcome for one incoming row
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Create,
    UpdateFields { id: i64, changes: Vec<FieldChange> },
    NoOp(SkipReason),
}

/// Decide what to do with `incoming` given the stored record for its key
pub fn decide(
    mode: ReconcileMode,
    stored: Option<&RentalRecord>,
    incoming: &RentalRow,
) -> Decision {
    match (mode, stored) {
        (ReconcileMode::Update, None) => Decision::NoOp(SkipReason::NotFound),
        (_, None) => Decision::Create,
        (ReconcileMode::Create, Some(_)) => Decision::NoOp(SkipReason::AlreadyExists),
        (_, Some(record)) => {
            let changes = diff_rows(&record.data, incoming);
            if changes.is_empty() {
                Decision::NoOp(SkipReason::Unchanged)
            } else {
                Decision::UpdateFields {
                    id: record.id,
                    changes,
                }
            }
        }
    }
}

/// Applies decisions for a batch of rows through a [`RecordLedger`]
#[derive(Debug, Clone, Copy)]
pub struct Reconciler {
    mode: ReconcileMode,
}

impl Reconciler {
    pub fn new(mode: ReconcileMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ReconcileMode {
        self.mode
    }

    /// Reconcile `rows` in order
    ///
    /// Lookups see earlier writes of the same batch, so a key repeated in the
    /// sheet is created once. The first ledger error stops the batch; the
    /// caller discards the unit of work.
    pub async fn reconcile<L>(&self, rows: &[RentalRow], ledger: &mut L) -> Result<ReconcileSummary>
    where
        L: RecordLedger + ?Sized,
    {
        let mut summary = ReconcileSummary::new();

        for row in rows {
            let key = row.key();
            let stored = ledger.find_by_key(&key).await?;
            let decision = decide(self.mode, stored.as_ref(), row);

            match &decision {
                Decision::Create => {
                    let id = ledger.insert(row).await?;
                    debug!("Created record {} for {}", id, key);
                }
                Decision::UpdateFields { id, changes } => {
                    let fields: Vec<RecordField> =
                        changes.iter().map(|change| change.field).collect();
                    ledger.update_fields(*id, row, &fields).await?;
                    debug!("Updated record {} for {}: {} fields", id, key, fields.len());
                }
                Decision::NoOp(reason) => {
                    debug!("Skipped {}: {:?}", key, reason);
                }
            }

            summary.record(&decision);
        }

        info!(
            "Reconciled {} rows in {} mode: {} created, {} updated, {} skipped",
            rows.len(),
            self.mode,
            summary.created,
            summary.updated,
            summary.skipped
        );

        Ok(summary)
    }
}
