//! Tests for workbook parsing

use super::super::{SpreadsheetParser, read_grid};
use super::{LEGACY_HEADERS, contract_cells, e, legacy_grid, n, t, xlsx_bytes};
use crate::Error;
use crate::app::models::{MoneyValue, RecordField};
use crate::app::services::cell_normalizer::{FallbackPolicy, RawCell};
use crate::config::{HeaderPolicy, ParserConfig};

#[test]
fn test_parse_legacy_workbook() {
    let mut second = contract_cells("T002", "Mall Taman Anggrek");
    second[2] = e(); // kc_supervisi merged with the row above
    let grid = legacy_grid(vec![contract_cells("T001", "Plaza Senayan"), second]);

    let result = SpreadsheetParser::default()
        .parse_bytes(&xlsx_bytes(&grid))
        .unwrap();

    assert_eq!(result.rows.len(), 2);
    assert_eq!(result.stats.total_rows, 2);
    assert_eq!(result.stats.records_parsed, 2);
    assert_eq!(result.stats.cells_filled, 1);

    let first = &result.rows[0];
    assert_eq!(first.tid, "T001");
    assert_eq!(
        first.harga_sewa_tahun,
        Some(MoneyValue::Amount(1_250_000.0))
    );
    assert_eq!(first.periode_awal.as_deref(), Some("2024-01"));
    assert_eq!(first.periode_akhir.as_deref(), Some("2026-12"));
    assert_eq!(first.nomor_hp, "08123456789");

    assert_eq!(result.rows[1].kc_supervisi, "KC Jakarta Kota");
}

#[test]
fn test_merged_cell_fill_can_be_disabled() {
    let mut second = contract_cells("T002", "Mall Taman Anggrek");
    second[2] = e();
    let grid = legacy_grid(vec![contract_cells("T001", "Plaza Senayan"), second]);

    let config = ParserConfig::default().without_merged_cell_fill();
    let result = SpreadsheetParser::new(config).parse_grid(grid).unwrap();

    assert_eq!(result.stats.cells_filled, 0);
    assert_eq!(result.stats.records_parsed, 1);
    assert_eq!(result.stats.rows_dropped, 1);
    assert_eq!(result.rows[0].tid, "T001");
}

#[test]
fn test_numeric_cells_from_workbook() {
    let mut cells = contract_cells("placeholder", "Bandara");
    cells[1] = n(100234.0);
    cells[5] = n(1_500_000.0);
    cells[9] = n(45292.0);
    let grid = legacy_grid(vec![cells]);

    let result = SpreadsheetParser::default()
        .parse_bytes(&xlsx_bytes(&grid))
        .unwrap();

    let row = &result.rows[0];
    assert_eq!(row.tid, "100234");
    assert_eq!(row.harga_sewa_tahun, Some(MoneyValue::Amount(1_500_000.0)));
    assert_eq!(row.periode_akhir.as_deref(), Some("2024-01"));
}

#[test]
fn test_trailing_blank_rows_do_not_duplicate() {
    let mut grid = legacy_grid(vec![contract_cells("T001", "Plaza Senayan")]);
    grid.push(vec![n(2.0)]);
    grid.push(Vec::new());

    let result = SpreadsheetParser::default().parse_grid(grid).unwrap();

    assert_eq!(result.rows.len(), 1);
    assert_eq!(result.stats.total_rows, 3);
    assert_eq!(result.stats.blank_rows, 2);
}

#[test]
fn test_nan_markers_become_null() {
    let mut cells = contract_cells("T001", "Plaza Senayan");
    cells[4] = t("nan");
    cells[14] = t("NaN");
    let grid = legacy_grid(vec![cells]);

    let result = SpreadsheetParser::default().parse_grid(grid).unwrap();

    assert_eq!(result.rows[0].vendor_cro, None);
    assert_eq!(result.rows[0].nomor_hp, "");
}

#[test]
fn test_rows_missing_required_fields_dropped() {
    let mut orphan = contract_cells("T000", "Gudang");
    orphan[3] = e();
    let grid = legacy_grid(vec![orphan, contract_cells("T001", "Plaza Senayan")]);

    let result = SpreadsheetParser::default().parse_grid(grid).unwrap();

    assert_eq!(result.rows.len(), 1);
    assert_eq!(result.rows[0].tid, "T001");
    assert_eq!(result.stats.rows_dropped, 1);
    assert!(result.stats.warnings.is_empty());
}

#[test]
fn test_wrong_column_count_is_parse_error() {
    let grid = vec![
        vec![t("No"), t("Jenis Mesin"), t("TID")],
        vec![n(1.0), t("ATM"), t("T001")],
    ];
    let config = ParserConfig::default().with_header(HeaderPolicy::FirstRowHeader);
    let parser = SpreadsheetParser::new(config);

    let err = parser.parse_grid(grid).unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
}

#[test]
fn test_extra_data_column_is_parse_error() {
    let mut cells = contract_cells("T001", "Plaza Senayan");
    cells.push(t("unexpected"));
    let grid = legacy_grid(vec![cells]);

    let err = SpreadsheetParser::default().parse_grid(grid).unwrap_err();
    assert!(err.to_string().contains("column 17"));
}

#[test]
fn test_first_row_header_without_row_numbers() {
    let mut grid: Vec<Vec<RawCell>> =
        vec![LEGACY_HEADERS[1..].iter().map(|label| t(label)).collect()];
    grid.push(contract_cells("T010", "Stasiun Gambir"));

    let config = ParserConfig::default()
        .with_header(HeaderPolicy::FirstRowHeader)
        .without_row_number_column();
    let result = SpreadsheetParser::new(config)
        .parse_bytes(&xlsx_bytes(&grid))
        .unwrap();

    assert_eq!(result.rows.len(), 1);
    assert_eq!(result.rows[0].lokasi, "Stasiun Gambir");
}

#[test]
fn test_normalization_failures_surface_as_warnings() {
    let mut cells = contract_cells("T001", "Plaza Senayan");
    cells[9] = t("sampai selesai");
    let grid = legacy_grid(vec![cells]);

    let result = SpreadsheetParser::default()
        .parse_grid(grid.clone())
        .unwrap();
    assert_eq!(result.rows[0].periode_akhir, None);
    assert_eq!(result.stats.warnings.len(), 1);
    assert_eq!(result.stats.warnings[0].row, 6);
    assert_eq!(result.stats.warnings[0].field, RecordField::PeriodeAkhir);

    let keep = ParserConfig::default().with_fallback(FallbackPolicy::Original);
    let result = SpreadsheetParser::new(keep).parse_grid(grid).unwrap();
    assert_eq!(
        result.rows[0].periode_akhir.as_deref(),
        Some("sampai selesai")
    );
}

#[test]
fn test_unreadable_bytes_are_parse_error() {
    let err = read_grid(b"definitely not a workbook").unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
}

#[test]
fn test_read_grid_keeps_absolute_positions() {
    let grid = vec![Vec::new(), vec![e(), e(), t("C2")]];
    let read = read_grid(&xlsx_bytes(&grid)).unwrap();

    assert_eq!(read.len(), 2);
    assert_eq!(read[1][2], t("C2"));
}
