//! Month normalization
//!
//! Accepts Indonesian month names (`"17 Januari 2024"`, `"Maret 2025"`),
//! spreadsheet date serials, typed dates and already-canonical `YYYY-MM`
//! strings, and produces the canonical `YYYY-MM` form.

use super::{FailureKind, NormalizationFailure, RawCell};
use crate::constants::{DATE_SERIAL_EPOCH, INDONESIAN_MONTHS, MAX_DATE_SERIAL, MONTH_FORMAT};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use regex::Regex;
use std::sync::LazyLock;

static CANONICAL_MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})-(\d{1,2})(?:-(\d{1,2}))?$").expect("valid canonical month pattern")
});

static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.\d+)?$").expect("valid numeric pattern"));

/// Normalize a cell to `YYYY-MM`
///
/// Empty cells yield `Ok(None)`. Anything that is present but not a
/// recognisable month is returned as a failure for the fallback policy.
pub fn normalize_month(cell: &RawCell) -> Result<Option<String>, NormalizationFailure> {
    match cell {
        RawCell::Empty => Ok(None),
        RawCell::Number(serial) => from_serial(cell, *serial).map(Some),
        RawCell::Date(value) => Ok(Some(value.format(MONTH_FORMAT).to_string())),
        RawCell::Boolean(_) => Err(NormalizationFailure::new(
            FailureKind::Month,
            cell,
            "boolean is not a date",
        )),
        RawCell::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            if NUMERIC.is_match(trimmed) {
                let serial = trimmed.parse::<f64>().map_err(|e| {
                    NormalizationFailure::new(FailureKind::Month, cell, e.to_string())
                })?;
                return from_serial(cell, serial).map(Some);
            }
            if let Some(month) = canonical_month(trimmed) {
                return Ok(Some(month));
            }
            parse_month_text(trimmed).map(Some).ok_or_else(|| {
                NormalizationFailure::new(
                    FailureKind::Month,
                    cell,
                    "expected 'day month year' or 'month year'",
                )
            })
        }
    }
}

/// Convert a spreadsheet date serial (days since 1899-12-30) to a timestamp
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 || serial > MAX_DATE_SERIAL {
        return None;
    }
    let (year, month, day) = DATE_SERIAL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?;
    let days = TimeDelta::try_days(serial.trunc() as i64)?;
    let seconds = TimeDelta::try_seconds((serial.fract() * 86_400.0).round() as i64)?;
    epoch.checked_add_signed(days)?.checked_add_signed(seconds)
}

fn from_serial(cell: &RawCell, serial: f64) -> Result<String, NormalizationFailure> {
    serial_to_datetime(serial)
        .map(|value| value.format(MONTH_FORMAT).to_string())
        .ok_or_else(|| {
            NormalizationFailure::new(FailureKind::Month, cell, "date serial out of range")
        })
}

fn canonical_month(text: &str) -> Option<String> {
    let captures = CANONICAL_MONTH.captures(text)?;
    let year = captures[1].parse::<i32>().ok()?;
    let month = captures[2].parse::<u32>().ok()?;
    let day = captures
        .get(3)
        .map_or(Ok(1), |day| day.as_str().parse::<u32>())
        .ok()?;
    NaiveDate::from_ymd_opt(year, month, day).map(|date| date.format(MONTH_FORMAT).to_string())
}

/// Replace Indonesian month names with their English equivalents
pub fn translate_month_names(text: &str) -> String {
    INDONESIAN_MONTHS
        .iter()
        .fold(text.to_string(), |acc, (indonesian, english)| {
            acc.replace(indonesian, english)
        })
}

fn parse_month_text(text: &str) -> Option<String> {
    let translated = translate_month_names(text);
    let collapsed = translated.split_whitespace().collect::<Vec<_>>().join(" ");

    NaiveDate::parse_from_str(&collapsed, "%d %B %Y")
        .or_else(|_| NaiveDate::parse_from_str(&format!("1 {}", collapsed), "%d %B %Y"))
        .ok()
        .map(|date| date.format(MONTH_FORMAT).to_string())
}
