//! Tests for parsing statistics functionality

use super::super::stats::ParseStats;

#[test]
fn test_parse_stats_calculation() {
    let stats = ParseStats {
        total_rows: 12,
        blank_rows: 2,
        records_parsed: 9,
        rows_dropped: 1,
        cells_filled: 4,
        warnings: vec![],
    };

    assert_eq!(stats.data_rows(), 10);
    assert_eq!(stats.success_rate(), 90.0);
    assert!(!stats.has_warnings());
}

#[test]
fn test_parse_stats_empty() {
    let empty_stats = ParseStats::new();

    assert_eq!(empty_stats.total_rows, 0);
    assert_eq!(empty_stats.records_parsed, 0);
    assert_eq!(empty_stats.success_rate(), 0.0);
}

#[test]
fn test_parse_stats_serialization() {
    let stats = ParseStats {
        total_rows: 3,
        records_parsed: 3,
        ..ParseStats::default()
    };

    let json = serde_json::to_string(&stats).unwrap();
    let restored: ParseStats = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.total_rows, 3);
    assert_eq!(restored.records_parsed, 3);
}
