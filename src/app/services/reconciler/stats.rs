//! Summary statistics for a reconciled batch

use super::engine::{Decision, SkipReason};
use serde::Serialize;

/// Counts of decisions taken for a batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,

    /// Individual field overwrites across all updates
    pub field_writes: usize,

    /// Skips broken down by reason
    pub already_existing: usize,
    pub not_found: usize,
    pub unchanged: usize,
}

impl ReconcileSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one decision
    pub fn record(&mut self, decision: &Decision) {
        match decision {
            Decision::Create => self.created += 1,
            Decision::UpdateFields { changes, .. } => {
                self.updated += 1;
                self.field_writes += changes.len();
            }
            Decision::NoOp(reason) => {
                self.skipped += 1;
                match reason {
                    SkipReason::AlreadyExists => self.already_existing += 1,
                    SkipReason::NotFound => self.not_found += 1,
                    SkipReason::Unchanged => self.unchanged += 1,
                }
            }
        }
    }

    /// Rows that produced any write
    pub fn written(&self) -> usize {
        self.created + self.updated
    }
}
