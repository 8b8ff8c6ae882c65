//! Contract lifecycle evaluation
//!
//! Classifies a record as safe or warning from its end-of-lease month. A
//! contract enters the warning state once the first day of its end month is
//! no more than the warning window away.

use crate::app::models::{LifecycleState, RentalRecord};
use crate::constants::WARNING_WINDOW_DAYS;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::Serialize;

/// What the evaluation was based on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryBasis {
    /// No end month recorded
    NoExpiry,
    /// First day of the end month
    Expiry(NaiveDate),
    /// End month present but unreadable
    Malformed(String),
}

/// Computed lifecycle values for one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub state: LifecycleState,
    pub notification: bool,
    pub basis: ExpiryBasis,
}

impl Evaluation {
    fn safe(basis: ExpiryBasis) -> Self {
        Self {
            state: LifecycleState::Safe,
            notification: false,
            basis,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self.basis, ExpiryBasis::Malformed(_))
    }
}

/// Evaluates lifecycle state against a fixed warning window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleEvaluator {
    warning_window_days: i64,
}

impl LifecycleEvaluator {
    pub fn new(warning_window_days: i64) -> Self {
        Self {
            warning_window_days,
        }
    }

    pub fn warning_window_days(&self) -> i64 {
        self.warning_window_days
    }

    /// Evaluate an end month (`YYYY-MM`) at `now`
    ///
    /// Absent, blank and malformed values all resolve to safe; the basis tells
    /// them apart.
    pub fn evaluate(&self, periode_akhir: Option<&str>, now: NaiveDateTime) -> Evaluation {
        let Some(text) = periode_akhir.map(str::trim).filter(|text| !text.is_empty()) else {
            return Evaluation::safe(ExpiryBasis::NoExpiry);
        };

        let Ok(end) = NaiveDate::parse_from_str(&format!("{}-01", text), "%Y-%m-%d") else {
            return Evaluation::safe(ExpiryBasis::Malformed(text.to_string()));
        };

        let Some(end_start) = end.and_hms_opt(0, 0, 0) else {
            return Evaluation::safe(ExpiryBasis::Malformed(text.to_string()));
        };

        let within_window = match TimeDelta::try_days(self.warning_window_days) {
            Some(window) => end_start.signed_duration_since(now) <= window,
            None => true,
        };

        if within_window {
            Evaluation {
                state: LifecycleState::Warning,
                notification: true,
                basis: ExpiryBasis::Expiry(end),
            }
        } else {
            Evaluation::safe(ExpiryBasis::Expiry(end))
        }
    }

    /// Evaluate a stored record
    pub fn evaluate_record(&self, record: &RentalRecord, now: NaiveDateTime) -> Evaluation {
        self.evaluate(record.data.periode_akhir.as_deref(), now)
    }

    /// Whether the stored lifecycle values differ from `evaluation`
    pub fn needs_update(record: &RentalRecord, evaluation: &Evaluation) -> bool {
        record.state != evaluation.state || record.notification != evaluation.notification
    }
}

impl Default for LifecycleEvaluator {
    fn default() -> Self {
        Self::new(WARNING_WINDOW_DAYS)
    }
}
