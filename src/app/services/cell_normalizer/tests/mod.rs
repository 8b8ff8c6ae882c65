//! Tests for cell normalization
//!
//! Shared helpers for building raw cells used across the normalizer tests.

use super::RawCell;
use chrono::NaiveDate;

mod fallback_tests;
mod month_tests;

/// Text cell helper
pub fn text(value: &str) -> RawCell {
    RawCell::Text(value.to_string())
}

/// Date cell at midnight
pub fn date(year: i32, month: u32, day: u32) -> RawCell {
    RawCell::Date(
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
    )
}
