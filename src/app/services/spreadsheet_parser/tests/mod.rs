//! Test utilities for spreadsheet parser testing
//!
//! Workbooks are generated in memory with `rust_xlsxwriter` so the tests
//! exercise the same reader path as real uploads.

use crate::app::services::cell_normalizer::RawCell;
use rust_xlsxwriter::Workbook;

// Test modules
mod forward_fill_tests;
mod parser_tests;
mod stats_tests;

/// Header labels of the legacy export, including the row-number column
pub const LEGACY_HEADERS: [&str; 16] = [
    "No",
    "Jenis Mesin",
    "TID",
    "KC Supervisi",
    "Lokasi",
    "Vendor / CRO",
    "Harga Sewa / Tahun",
    "Total Harga Sewa Periode",
    "Lama Sewa (Tahun)",
    "Periode Awal",
    "Periode Akhir",
    "Nomor Polis Asuransi",
    "Perjanjian Sewa (PKS)",
    "Persetujuan Sewa / Kode / Remarks",
    "PIC",
    "Nomor HP",
];

/// Text cell helper
pub fn t(value: &str) -> RawCell {
    RawCell::Text(value.to_string())
}

/// Number cell helper
pub fn n(value: f64) -> RawCell {
    RawCell::Number(value)
}

/// Empty cell helper
pub fn e() -> RawCell {
    RawCell::Empty
}

/// Fifteen data cells for a complete contract row
pub fn contract_cells(tid: &str, lokasi: &str) -> Vec<RawCell> {
    vec![
        t("ATM"),
        t(tid),
        t("KC Jakarta Kota"),
        t(lokasi),
        t("PT Sinar Vendor"),
        t("Rp 1.250.000"),
        t("Rp 3.750.000"),
        t("3 Tahun"),
        t("17 Januari 2024"),
        t("Desember 2026"),
        t("POL-001"),
        t("PKS/2024/01"),
        t("KODE-9"),
        t("Budi"),
        t("08123456789"),
    ]
}

/// Legacy layout grid: five title rows, then a numbered row per entry
pub fn legacy_grid(data_rows: Vec<Vec<RawCell>>) -> Vec<Vec<RawCell>> {
    let mut grid = vec![
        vec![t("DAFTAR SEWA MESIN")],
        vec![t("Periode 2024")],
        Vec::new(),
        Vec::new(),
        LEGACY_HEADERS.iter().map(|label| t(label)).collect(),
    ];
    for (index, cells) in data_rows.into_iter().enumerate() {
        let mut row = vec![n((index + 1) as f64)];
        row.extend(cells);
        grid.push(row);
    }
    grid
}

/// Write a grid to an in-memory xlsx workbook
pub fn xlsx_bytes(grid: &[Vec<RawCell>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (row_index, row) in grid.iter().enumerate() {
        for (column_index, cell) in row.iter().enumerate() {
            let (row_index, column_index) = (row_index as u32, column_index as u16);
            match cell {
                RawCell::Empty => {}
                RawCell::Text(text) => {
                    worksheet
                        .write_string(row_index, column_index, text)
                        .unwrap();
                }
                RawCell::Number(value) => {
                    worksheet
                        .write_number(row_index, column_index, *value)
                        .unwrap();
                }
                RawCell::Boolean(value) => {
                    worksheet
                        .write_boolean(row_index, column_index, *value)
                        .unwrap();
                }
                RawCell::Date(value) => {
                    worksheet
                        .write_string(row_index, column_index, value.to_string())
                        .unwrap();
                }
            }
        }
    }

    workbook.save_to_buffer().unwrap()
}
