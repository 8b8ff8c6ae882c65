//! Reconciliation of parsed rows against the record store
//!
//! Each incoming row is matched to a stored record by its `(tid, lokasi)`
//! natural key and resolved to one of three decisions: create a new record,
//! overwrite only the fields that differ, or leave the store untouched.
//!
//! ## Architecture
//!
//! - [`diff`] - Field-by-field comparison of stored and incoming rows
//! - [`engine`] - Decision rules per import mode and batch application
//! - [`ledger`] - Lookup and write capability the reconciler runs against
//! - [`stats`] - Summary counts for a reconciled batch

pub mod diff;
pub mod engine;
pub mod ledger;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use diff::{FieldChange, diff_rows};
pub use engine::{Decision, ReconcileMode, Reconciler, SkipReason, decide};
pub use ledger::RecordLedger;
pub use stats::ReconcileSummary;
