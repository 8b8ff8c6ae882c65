//! Tests for month normalization

use super::super::month::{normalize_month, serial_to_datetime, translate_month_names};
use super::super::{FailureKind, RawCell};
use super::{date, text};
use chrono::NaiveDate;

fn month_of(value: &str) -> Option<String> {
    normalize_month(&text(value)).unwrap()
}

#[test]
fn test_day_month_year_indonesian() {
    assert_eq!(month_of("17 Januari 2024").as_deref(), Some("2024-01"));
    assert_eq!(month_of("  3 Desember 2023 ").as_deref(), Some("2023-12"));
}

#[test]
fn test_month_year_defaults_to_first_day() {
    assert_eq!(
        normalize_month(&text("Maret 2025")).unwrap().as_deref(),
        Some("2025-03")
    );
    assert_eq!(
        normalize_month(&text("Agustus  2026")).unwrap().as_deref(),
        Some("2026-08")
    );
}

#[test]
fn test_english_names_accepted() {
    assert_eq!(
        normalize_month(&text("1 May 2024")).unwrap().as_deref(),
        Some("2024-05")
    );
}

#[test]
fn test_date_serials() {
    let serial = RawCell::Number(45000.0);
    assert_eq!(
        normalize_month(&serial).unwrap().as_deref(),
        Some("2023-03")
    );
    assert_eq!(
        normalize_month(&text("45292")).unwrap().as_deref(),
        Some("2024-01")
    );
    assert_eq!(
        serial_to_datetime(45000.0).unwrap().date(),
        NaiveDate::from_ymd_opt(2023, 3, 15).unwrap()
    );
}

#[test]
fn test_serial_out_of_range_fails() {
    let failure = normalize_month(&RawCell::Number(-4.0)).unwrap_err();
    assert_eq!(failure.kind, FailureKind::Month);
    assert!(serial_to_datetime(3_000_000.0).is_none());
}

#[test]
fn test_structured_and_canonical_dates() {
    assert_eq!(
        normalize_month(&date(2024, 6, 30)).unwrap().as_deref(),
        Some("2024-06")
    );
    assert_eq!(
        normalize_month(&text("2024-07")).unwrap().as_deref(),
        Some("2024-07")
    );
    assert_eq!(
        normalize_month(&text("2024-07-15")).unwrap().as_deref(),
        Some("2024-07")
    );
}

#[test]
fn test_empty_cells_are_absent() {
    assert_eq!(normalize_month(&RawCell::Empty).unwrap(), None);
    assert_eq!(normalize_month(&text("   ")).unwrap(), None);
}

#[test]
fn test_unparseable_text_is_failure() {
    let failure = normalize_month(&text("sampai habis")).unwrap_err();
    assert_eq!(failure.raw, "sampai habis");
    assert!(normalize_month(&text("2024-13")).is_err());
    assert!(normalize_month(&RawCell::Boolean(true)).is_err());
}

#[test]
fn test_translate_month_names() {
    assert_eq!(translate_month_names("Mei Juni Juli"), "May June July");
    assert_eq!(translate_month_names("Oktober"), "October");
}
