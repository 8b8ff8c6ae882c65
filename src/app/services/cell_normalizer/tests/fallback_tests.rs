//! Tests for fallback policy resolution

use super::super::{FallbackPolicy, RawCell};
use super::text;
use crate::app::models::MoneyValue;

#[test]
fn test_null_policy_discards_value_and_reports() {
    let (month, failure) = FallbackPolicy::Null.resolve_month(&text("tidak ada"));
    assert_eq!(month, None);
    assert!(failure.unwrap().to_string().contains("tidak ada"));
}

#[test]
fn test_original_policy_keeps_raw_text() {
    let (month, failure) = FallbackPolicy::Original.resolve_month(&text("tidak ada"));
    assert_eq!(month.as_deref(), Some("tidak ada"));
    assert!(failure.is_some());

    let (money, failure) = FallbackPolicy::Original.resolve_currency(&text("Rp 5 juta"));
    assert_eq!(money, Some(MoneyValue::Text("Rp 5 juta".to_string())));
    assert!(failure.is_some());
}

#[test]
fn test_successful_normalization_has_no_failure() {
    let (money, failure) = FallbackPolicy::Null.resolve_currency(&RawCell::Number(10.0));
    assert_eq!(money, Some(MoneyValue::Amount(10.0)));
    assert!(failure.is_none());
}

#[test]
fn test_default_policy_is_null() {
    assert_eq!(FallbackPolicy::default(), FallbackPolicy::Null);
}
