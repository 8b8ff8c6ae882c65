//! Currency normalization for `Rp` amounts written with Indonesian separators

use super::{FailureKind, NormalizationFailure, RawCell};
use crate::app::models::MoneyValue;
use crate::constants::CURRENCY_TOKEN_PATTERN;
use regex::Regex;
use std::sync::LazyLock;

static CURRENCY_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(CURRENCY_TOKEN_PATTERN).expect("valid currency token pattern"));

/// Normalize a cell to a currency amount
///
/// Numbers pass through. Text without any digit is a placeholder and is kept
/// as text. Otherwise the currency token, thousands dots, spaces and dashes
/// are removed and a decimal comma becomes a decimal point.
pub fn normalize_currency(cell: &RawCell) -> Result<Option<MoneyValue>, NormalizationFailure> {
    match cell {
        RawCell::Empty => Ok(None),
        RawCell::Number(amount) => Ok(Some(MoneyValue::Amount(*amount))),
        RawCell::Boolean(_) | RawCell::Date(_) => Err(NormalizationFailure::new(
            FailureKind::Currency,
            cell,
            "not a currency amount",
        )),
        RawCell::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            if !trimmed.chars().any(|c| c.is_ascii_digit()) {
                return Ok(Some(MoneyValue::Text(trimmed.to_string())));
            }

            let cleaned: String = CURRENCY_TOKEN
                .replace_all(trimmed, "")
                .chars()
                .filter(|c| !matches!(c, '.' | '-') && !c.is_whitespace())
                .map(|c| if c == ',' { '.' } else { c })
                .collect();

            cleaned
                .parse::<f64>()
                .map(|amount| Some(MoneyValue::Amount(amount)))
                .map_err(|e| {
                    NormalizationFailure::new(
                        FailureKind::Currency,
                        cell,
                        format!("'{}' is not a number ({})", cleaned, e),
                    )
                })
        }
    }
}
