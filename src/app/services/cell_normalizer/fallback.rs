//! Fallback handling for cells that cannot be normalized

use super::{RawCell, normalize_currency, normalize_month};
use crate::app::models::MoneyValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What to store when a month or currency cell cannot be normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Store null and surface a warning
    #[default]
    Null,
    /// Keep the cell's original text
    Original,
}

/// Which normalizer rejected the cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Month,
    Currency,
}

/// A cell that could not be converted to its canonical form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationFailure {
    pub kind: FailureKind,

    /// Cell text as read
    pub raw: String,

    pub reason: String,
}

impl NormalizationFailure {
    pub fn new(kind: FailureKind, cell: &RawCell, reason: impl Into<String>) -> Self {
        Self {
            kind,
            raw: cell.cell_text().unwrap_or_default(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for NormalizationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            FailureKind::Month => "month",
            FailureKind::Currency => "currency",
        };
        write!(
            f,
            "{} value '{}' not recognised: {}",
            kind, self.raw, self.reason
        )
    }
}

impl FallbackPolicy {
    /// Normalize a month cell, applying this policy on failure
    pub fn resolve_month(self, cell: &RawCell) -> (Option<String>, Option<NormalizationFailure>) {
        match normalize_month(cell) {
            Ok(month) => (month, None),
            Err(failure) => {
                let value = match self {
                    FallbackPolicy::Null => None,
                    FallbackPolicy::Original => Some(failure.raw.clone()),
                };
                (value, Some(failure))
            }
        }
    }

    /// Normalize a currency cell, applying this policy on failure
    pub fn resolve_currency(
        self,
        cell: &RawCell,
    ) -> (Option<MoneyValue>, Option<NormalizationFailure>) {
        match normalize_currency(cell) {
            Ok(money) => (money, None),
            Err(failure) => {
                let value = match self {
                    FallbackPolicy::Null => None,
                    FallbackPolicy::Original => Some(MoneyValue::Text(failure.raw.clone())),
                };
                (value, Some(failure))
            }
        }
    }
}
