//! Excel export of stored records

use crate::app::models::{AttachmentKind, MoneyValue, RentalRecord};
use crate::constants::{EXPORT_COLUMN_WIDTHS, EXPORT_HEADERS, EXPORT_SHEET_NAME};
use crate::{Error, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::Path;
use tracing::debug;

/// Write `records` to an xlsx file at `path`
pub fn write_workbook(records: &[RentalRecord], path: &Path) -> Result<()> {
    let mut workbook = build_workbook(records)?;
    workbook
        .save(path)
        .map_err(|e| Error::export(format!("Failed to save {}", path.display()), e))
}

/// Render `records` to xlsx bytes
pub fn export_to_buffer(records: &[RentalRecord]) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(records)?;
    workbook
        .save_to_buffer()
        .map_err(|e| Error::export("Failed to render workbook", e))
}

fn build_workbook(records: &[RentalRecord]) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    fill_sheet(worksheet, records).map_err(|e| Error::export("Failed to write rows", e))?;
    debug!("Rendered {} records for export", records.len());
    Ok(workbook)
}

fn fill_sheet(ws: &mut Worksheet, records: &[RentalRecord]) -> std::result::Result<(), XlsxError> {
    ws.set_name(EXPORT_SHEET_NAME)?;

    let header = Format::new().set_bold();
    for (col, (title, width)) in EXPORT_HEADERS.iter().zip(EXPORT_COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        ws.write_string_with_format(0, col, *title, &header)?;
        ws.set_column_width(col, width)?;
    }
    ws.set_freeze_panes(1, 0)?;

    for (index, record) in records.iter().enumerate() {
        let row = (index + 1) as u32;
        let data = &record.data;

        ws.write_number(row, 0, record.id as f64)?;
        ws.write_string(row, 1, &data.jenis_mesin)?;
        ws.write_string(row, 2, &data.tid)?;
        ws.write_string(row, 3, &data.kc_supervisi)?;
        ws.write_string(row, 4, &data.lokasi)?;
        write_optional(ws, row, 5, data.vendor_cro.as_deref())?;
        let harga = data.harga_sewa_tahun.as_ref().map(format_money);
        write_optional(ws, row, 6, harga.as_deref())?;
        let total = data.total_harga_sewa_periode.as_ref().map(format_money);
        write_optional(ws, row, 7, total.as_deref())?;
        write_optional(ws, row, 8, data.lama_sewa_tahun.as_deref())?;
        write_optional(ws, row, 9, data.periode_awal.as_deref())?;
        write_optional(ws, row, 10, data.periode_akhir.as_deref())?;
        write_optional(ws, row, 11, data.nomor_polis_asuransi.as_deref())?;
        write_optional(ws, row, 12, data.perjanjian_sewa_pks.as_deref())?;
        write_optional(ws, row, 13, data.persetujuan_sewa_kode_remarks.as_deref())?;
        write_optional(ws, row, 14, data.pic.as_deref())?;
        write_optional(ws, row, 15, Some(data.nomor_hp.as_str()))?;
        ws.write_string(row, 16, record.state.as_str())?;
        ws.write_string(row, 17, if record.notification { "Yes" } else { "No" })?;

        for (offset, kind) in AttachmentKind::ALL.iter().enumerate() {
            let name = record.attachments.get(*kind).name.as_deref();
            write_optional(ws, row, 18 + offset as u16, name)?;
        }
    }

    Ok(())
}

fn write_optional(
    ws: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<&str>,
) -> std::result::Result<(), XlsxError> {
    if let Some(text) = value.filter(|text| !text.is_empty()) {
        ws.write_string(row, col, text)?;
    }
    Ok(())
}

/// Money as shown in the export: `Rp. 1.250.000` or `Rp. 1.250.000,50`
pub fn format_money(value: &MoneyValue) -> String {
    match value {
        MoneyValue::Amount(amount) => format_rupiah(*amount),
        MoneyValue::Text(text) => text.clone(),
    }
}

/// Format an amount with `.` thousands and `,` decimal separators
pub fn format_rupiah(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let (whole, fraction) = (cents / 100, cents % 100);

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    if fraction == 0 {
        format!("{}Rp. {}", sign, grouped)
    } else {
        format!("{}Rp. {},{:02}", sign, grouped, fraction)
    }
}
