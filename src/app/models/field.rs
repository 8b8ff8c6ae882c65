//! Record field table
//!
//! Every spreadsheet column of a [`RentalRow`] is named by a [`RecordField`]
//! variant. Edits, diffs and SQL bindings dispatch through this table instead
//! of matching on column name strings.

use super::{MoneyValue, RentalRow};
use crate::app::services::cell_normalizer::{FallbackPolicy, NormalizationFailure, RawCell};
use crate::constants::{COLUMN_NAMES, REQUIRED_COLUMNS};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Loosely typed value used for edits and field comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Boolean(bool),
    Decimal(f64),
    Text(String),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    fn into_cell(self) -> RawCell {
        match self {
            FieldValue::Null => RawCell::Empty,
            FieldValue::Boolean(value) => RawCell::Boolean(value),
            FieldValue::Decimal(value) => RawCell::Number(value),
            FieldValue::Text(value) => RawCell::Text(value),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("null"),
            FieldValue::Boolean(value) => write!(f, "{}", value),
            FieldValue::Decimal(value) => write!(f, "{}", value),
            FieldValue::Text(value) => write!(f, "\"{}\"", value),
        }
    }
}

/// How a column's cells are converted into the typed row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Trimmed text that may never be null
    RequiredText,
    /// Trimmed text or null
    Text,
    /// Currency amount through the currency normalizer
    Money,
    /// Calendar month through the month normalizer
    Month,
    /// Trimmed text, empty string when absent
    Phone,
}

/// The fifteen spreadsheet columns, in layout order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    JenisMesin,
    Tid,
    KcSupervisi,
    Lokasi,
    VendorCro,
    HargaSewaTahun,
    TotalHargaSewaPeriode,
    LamaSewaTahun,
    PeriodeAwal,
    PeriodeAkhir,
    NomorPolisAsuransi,
    PerjanjianSewaPks,
    PersetujuanSewaKodeRemarks,
    Pic,
    NomorHp,
}

impl RecordField {
    pub const ALL: [RecordField; 15] = [
        RecordField::JenisMesin,
        RecordField::Tid,
        RecordField::KcSupervisi,
        RecordField::Lokasi,
        RecordField::VendorCro,
        RecordField::HargaSewaTahun,
        RecordField::TotalHargaSewaPeriode,
        RecordField::LamaSewaTahun,
        RecordField::PeriodeAwal,
        RecordField::PeriodeAkhir,
        RecordField::NomorPolisAsuransi,
        RecordField::PerjanjianSewaPks,
        RecordField::PersetujuanSewaKodeRemarks,
        RecordField::Pic,
        RecordField::NomorHp,
    ];

    /// Zero-based column position in the spreadsheet layout
    pub fn position(&self) -> usize {
        *self as usize
    }

    /// Column name, also used as the database column
    pub fn name(&self) -> &'static str {
        COLUMN_NAMES[self.position()]
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            RecordField::JenisMesin
            | RecordField::Tid
            | RecordField::KcSupervisi
            | RecordField::Lokasi => FieldKind::RequiredText,
            RecordField::HargaSewaTahun | RecordField::TotalHargaSewaPeriode => FieldKind::Money,
            RecordField::PeriodeAwal | RecordField::PeriodeAkhir => FieldKind::Month,
            RecordField::NomorHp => FieldKind::Phone,
            _ => FieldKind::Text,
        }
    }

    pub fn is_required(&self) -> bool {
        REQUIRED_COLUMNS.contains(&self.name())
    }

    /// Part of the `(tid, lokasi)` natural key
    pub fn is_key(&self) -> bool {
        matches!(self, RecordField::Tid | RecordField::Lokasi)
    }

    /// Current value of this field in `row`
    pub fn value(&self, row: &RentalRow) -> FieldValue {
        match self {
            RecordField::JenisMesin => required_value(&row.jenis_mesin),
            RecordField::Tid => required_value(&row.tid),
            RecordField::KcSupervisi => required_value(&row.kc_supervisi),
            RecordField::Lokasi => required_value(&row.lokasi),
            RecordField::VendorCro => optional_value(&row.vendor_cro),
            RecordField::HargaSewaTahun => money_value(&row.harga_sewa_tahun),
            RecordField::TotalHargaSewaPeriode => money_value(&row.total_harga_sewa_periode),
            RecordField::LamaSewaTahun => optional_value(&row.lama_sewa_tahun),
            RecordField::PeriodeAwal => optional_value(&row.periode_awal),
            RecordField::PeriodeAkhir => optional_value(&row.periode_akhir),
            RecordField::NomorPolisAsuransi => optional_value(&row.nomor_polis_asuransi),
            RecordField::PerjanjianSewaPks => optional_value(&row.perjanjian_sewa_pks),
            RecordField::PersetujuanSewaKodeRemarks => {
                optional_value(&row.persetujuan_sewa_kode_remarks)
            }
            RecordField::Pic => optional_value(&row.pic),
            RecordField::NomorHp => FieldValue::Text(row.nomor_hp.clone()),
        }
    }

    /// Text bound to this field's database column
    pub fn column_text(&self, row: &RentalRow) -> Option<String> {
        match self.value(row) {
            FieldValue::Null => None,
            FieldValue::Boolean(value) => Some(value.to_string()),
            FieldValue::Decimal(value) => Some(MoneyValue::Amount(value).to_column_text()),
            FieldValue::Text(value) => Some(value),
        }
    }

    /// Set this field from its stored column text
    pub fn load_column_text(&self, row: &mut RentalRow, text: Option<String>) {
        match self.kind() {
            FieldKind::Money => {
                let money = text.map(|text| MoneyValue::from_column_text(&text));
                *self.money_slot(row) = money;
            }
            FieldKind::RequiredText => *self.required_slot(row) = text.unwrap_or_default(),
            FieldKind::Phone => row.nomor_hp = text.unwrap_or_default(),
            FieldKind::Text | FieldKind::Month => *self.optional_slot(row) = text,
        }
    }

    /// Convert `value` to this field's type and store it in `row`
    ///
    /// Money and month values go through the cell normalizer. A value that
    /// cannot be normalized is resolved by `fallback` and the failure is
    /// returned so callers can surface it.
    pub fn assign(
        &self,
        row: &mut RentalRow,
        value: FieldValue,
        fallback: FallbackPolicy,
    ) -> Result<Option<NormalizationFailure>> {
        if let FieldValue::Boolean(flag) = value {
            return Err(Error::invalid_field_value(
                self.name(),
                format!("boolean {} is not a {:?} value", flag, self.kind()),
            ));
        }
        self.assign_cell(row, &value.into_cell(), fallback)
    }

    /// Store a raw spreadsheet cell in `row`, converting it for this field
    pub fn assign_cell(
        &self,
        row: &mut RentalRow,
        cell: &RawCell,
        fallback: FallbackPolicy,
    ) -> Result<Option<NormalizationFailure>> {
        match self.kind() {
            FieldKind::RequiredText => {
                let text = cell
                    .cell_text()
                    .ok_or_else(|| Error::missing_required_field(self.name()))?;
                *self.required_slot(row) = text;
                Ok(None)
            }
            FieldKind::Text => {
                *self.optional_slot(row) = cell.cell_text();
                Ok(None)
            }
            FieldKind::Phone => {
                row.nomor_hp = cell.cell_text().unwrap_or_default();
                Ok(None)
            }
            FieldKind::Money => {
                let (money, failure) = fallback.resolve_currency(cell);
                *self.money_slot(row) = money;
                Ok(failure)
            }
            FieldKind::Month => {
                let (month, failure) = fallback.resolve_month(cell);
                *self.optional_slot(row) = month;
                Ok(failure)
            }
        }
    }

    fn required_slot<'a>(&self, row: &'a mut RentalRow) -> &'a mut String {
        match self {
            RecordField::JenisMesin => &mut row.jenis_mesin,
            RecordField::Tid => &mut row.tid,
            RecordField::KcSupervisi => &mut row.kc_supervisi,
            _ => &mut row.lokasi,
        }
    }

    fn money_slot<'a>(&self, row: &'a mut RentalRow) -> &'a mut Option<MoneyValue> {
        match self {
            RecordField::HargaSewaTahun => &mut row.harga_sewa_tahun,
            _ => &mut row.total_harga_sewa_periode,
        }
    }

    fn optional_slot<'a>(&self, row: &'a mut RentalRow) -> &'a mut Option<String> {
        match self {
            RecordField::VendorCro => &mut row.vendor_cro,
            RecordField::LamaSewaTahun => &mut row.lama_sewa_tahun,
            RecordField::PeriodeAwal => &mut row.periode_awal,
            RecordField::PeriodeAkhir => &mut row.periode_akhir,
            RecordField::NomorPolisAsuransi => &mut row.nomor_polis_asuransi,
            RecordField::PerjanjianSewaPks => &mut row.perjanjian_sewa_pks,
            RecordField::PersetujuanSewaKodeRemarks => &mut row.persetujuan_sewa_kode_remarks,
            _ => &mut row.pic,
        }
    }
}

fn required_value(text: &str) -> FieldValue {
    if text.trim().is_empty() {
        FieldValue::Null
    } else {
        FieldValue::Text(text.to_string())
    }
}

fn optional_value(text: &Option<String>) -> FieldValue {
    text.as_ref()
        .map_or(FieldValue::Null, |text| FieldValue::Text(text.clone()))
}

fn money_value(money: &Option<MoneyValue>) -> FieldValue {
    match money {
        None => FieldValue::Null,
        Some(MoneyValue::Amount(amount)) => FieldValue::Decimal(*amount),
        Some(MoneyValue::Text(text)) => FieldValue::Text(text.clone()),
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RecordField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        RecordField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| Error::invalid_field(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> RentalRow {
        RentalRow {
            jenis_mesin: "ATM".to_string(),
            tid: "T100".to_string(),
            kc_supervisi: "KC Jakarta".to_string(),
            lokasi: "Plaza Senayan".to_string(),
            harga_sewa_tahun: Some(MoneyValue::Amount(1_250_000.0)),
            ..Default::default()
        }
    }

    #[test]
    fn test_field_names_follow_layout() {
        for (index, field) in RecordField::ALL.iter().enumerate() {
            assert_eq!(field.position(), index);
            assert_eq!(field.name().parse::<RecordField>().unwrap(), *field);
        }
        assert_eq!(RecordField::PeriodeAkhir.name(), "periode_akhir");
    }

    #[test]
    fn test_unknown_and_derived_fields_are_rejected() {
        for name in ["state", "notification", "id", "file_pks_sewa_url", "TID"] {
            let err = name.parse::<RecordField>().unwrap_err();
            assert!(matches!(err, Error::InvalidField { .. }), "{}", name);
        }
    }

    #[test]
    fn test_assign_money_normalizes_text() {
        let mut row = sample_row();
        let failure = RecordField::TotalHargaSewaPeriode
            .assign(
                &mut row,
                FieldValue::Text("Rp 3.750.000".to_string()),
                FallbackPolicy::Null,
            )
            .unwrap();
        assert!(failure.is_none());
        assert_eq!(
            row.total_harga_sewa_periode,
            Some(MoneyValue::Amount(3_750_000.0))
        );
    }

    #[test]
    fn test_assign_month_uses_fallback() {
        let mut row = sample_row();
        let failure = RecordField::PeriodeAkhir
            .assign(
                &mut row,
                FieldValue::Text("akhir tahun".to_string()),
                FallbackPolicy::Original,
            )
            .unwrap();
        assert!(failure.is_some());
        assert_eq!(row.periode_akhir.as_deref(), Some("akhir tahun"));

        RecordField::PeriodeAkhir
            .assign(
                &mut row,
                FieldValue::Text("akhir tahun".to_string()),
                FallbackPolicy::Null,
            )
            .unwrap();
        assert_eq!(row.periode_akhir, None);
    }

    #[test]
    fn test_assign_null_to_required_field_fails() {
        let mut row = sample_row();
        let err = RecordField::Lokasi
            .assign(&mut row, FieldValue::Null, FallbackPolicy::Null)
            .unwrap_err();
        assert!(matches!(err, Error::MissingRequiredField { .. }));
        assert_eq!(row.lokasi, "Plaza Senayan");
    }

    #[test]
    fn test_assign_null_phone_stores_empty_string() {
        let mut row = sample_row();
        row.nomor_hp = "0812".to_string();
        RecordField::NomorHp
            .assign(&mut row, FieldValue::Null, FallbackPolicy::Null)
            .unwrap();
        assert_eq!(row.nomor_hp, "");

        let number = FieldValue::Decimal(81234567.0);
        RecordField::NomorHp
            .assign(&mut row, number, FallbackPolicy::Null)
            .unwrap();
        assert_eq!(row.nomor_hp, "81234567");
    }

    #[test]
    fn test_assign_boolean_is_invalid_value() {
        let mut row = sample_row();
        let err = RecordField::Pic
            .assign(&mut row, FieldValue::Boolean(true), FallbackPolicy::Null)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidFieldValue { .. }));
    }

    #[test]
    fn test_column_text_round_trip() {
        let row = sample_row();
        let mut loaded = RentalRow::default();
        for field in RecordField::ALL {
            field.load_column_text(&mut loaded, field.column_text(&row));
        }
        assert_eq!(loaded, row);
    }
}
