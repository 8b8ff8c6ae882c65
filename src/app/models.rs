//! Data models for rental contract processing
//!
//! This module contains the core data structures for representing leased-equipment
//! contract rows as they come out of a spreadsheet, and the stored records they
//! become once reconciled into the record store.

pub mod field;

pub use field::{FieldKind, FieldValue, RecordField};

use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Scalar Values
// =============================================================================

/// Monetary cell after normalization
///
/// Amounts that could be cleaned up are stored as numbers; placeholder text
/// without any digit (e.g. "N/A") is kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MoneyValue {
    Amount(f64),
    Text(String),
}

impl MoneyValue {
    /// Numeric amount, if this value is one
    pub fn as_amount(&self) -> Option<f64> {
        match self {
            MoneyValue::Amount(amount) => Some(*amount),
            MoneyValue::Text(_) => None,
        }
    }

    /// Text stored in the record table for this value
    pub fn to_column_text(&self) -> String {
        match self {
            MoneyValue::Amount(amount) => amount.to_string(),
            MoneyValue::Text(text) => text.clone(),
        }
    }

    /// Rebuild a value from its stored text
    ///
    /// Accepts the legacy `"1250000.0"` rendition as well as the shortest form.
    pub fn from_column_text(text: &str) -> Self {
        if text.chars().any(|c| c.is_ascii_digit()) {
            if let Ok(amount) = text.trim().parse::<f64>() {
                return MoneyValue::Amount(amount);
            }
        }
        MoneyValue::Text(text.to_string())
    }
}

impl fmt::Display for MoneyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyValue::Amount(amount) => write!(f, "{}", amount),
            MoneyValue::Text(text) => f.write_str(text),
        }
    }
}

/// Composite natural key identifying a rental record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NaturalKey {
    /// Terminal identifier
    pub tid: String,

    /// Deployment site label
    pub lokasi: String,
}

impl NaturalKey {
    pub fn new(tid: impl Into<String>, lokasi: impl Into<String>) -> Self {
        Self {
            tid: tid.into(),
            lokasi: lokasi.into(),
        }
    }
}

impl fmt::Display for NaturalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(tid '{}', lokasi '{}')", self.tid, self.lokasi)
    }
}

// =============================================================================
// Canonical Row
// =============================================================================

/// Canonical contract row produced by the spreadsheet parser
///
/// Carries every spreadsheet column in typed form. Lifecycle state and
/// attachment slots are not part of the row; they belong to the stored record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RentalRow {
    /// Machine type (required)
    pub jenis_mesin: String,

    /// Terminal identifier (required, key)
    pub tid: String,

    /// Supervising branch office (required)
    pub kc_supervisi: String,

    /// Deployment site (required, key)
    pub lokasi: String,

    #[serde(default)]
    pub vendor_cro: Option<String>,

    /// Annual rent
    #[serde(default)]
    pub harga_sewa_tahun: Option<MoneyValue>,

    /// Total rent over the lease period
    #[serde(default)]
    pub total_harga_sewa_periode: Option<MoneyValue>,

    /// Lease duration, free text
    #[serde(default)]
    pub lama_sewa_tahun: Option<String>,

    /// First lease month, canonical `YYYY-MM`
    #[serde(default)]
    pub periode_awal: Option<String>,

    /// Last lease month, canonical `YYYY-MM`
    #[serde(default)]
    pub periode_akhir: Option<String>,

    #[serde(default)]
    pub nomor_polis_asuransi: Option<String>,

    #[serde(default)]
    pub perjanjian_sewa_pks: Option<String>,

    #[serde(default)]
    pub persetujuan_sewa_kode_remarks: Option<String>,

    /// Point of contact
    #[serde(default)]
    pub pic: Option<String>,

    /// Contact phone number, empty when unknown
    #[serde(default, deserialize_with = "null_as_empty")]
    pub nomor_hp: String,
}

impl RentalRow {
    /// Natural key of this row
    pub fn key(&self) -> NaturalKey {
        NaturalKey::new(self.tid.clone(), self.lokasi.clone())
    }

    /// First required field that is blank, if any
    pub fn missing_required(&self) -> Option<RecordField> {
        RecordField::ALL
            .iter()
            .copied()
            .filter(|field| field.is_required())
            .find(|field| matches!(field.value(self), FieldValue::Null))
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Lifecycle State
// =============================================================================

/// Safety classification derived from the contract end month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    #[default]
    Safe,
    Warning,
}

impl LifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Safe => "safe",
            LifecycleState::Warning => "warning",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "safe" => Ok(LifecycleState::Safe),
            "warning" => Ok(LifecycleState::Warning),
            other => Err(Error::invalid_field_value(
                "state",
                format!("unknown lifecycle state '{}'", other),
            )),
        }
    }
}

// =============================================================================
// Attachments
// =============================================================================

/// Document slot an uploaded file is linked to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    /// Insurance policy document
    PolisAsuransi,
    /// Lease agreement
    PksSewa,
    /// Approval code document
    SewaKode,
}

impl AttachmentKind {
    pub const ALL: [AttachmentKind; 3] = [
        AttachmentKind::PolisAsuransi,
        AttachmentKind::PksSewa,
        AttachmentKind::SewaKode,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttachmentKind::PolisAsuransi => "polis_asuransi",
            AttachmentKind::PksSewa => "pks_sewa",
            AttachmentKind::SewaKode => "sewa_kode",
        }
    }

    /// Column prefix of this slot in the record table
    pub fn column_prefix(&self) -> &'static str {
        match self {
            AttachmentKind::PolisAsuransi => "file_polis_asuransi",
            AttachmentKind::PksSewa => "file_pks_sewa",
            AttachmentKind::SewaKode => "file_sewa_kode",
        }
    }
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttachmentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        AttachmentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s.trim())
            .ok_or_else(|| Error::invalid_attachment_kind(s))
    }
}

/// One attachment slot: where the file lives, its original name and upload time
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Attachment {
    pub url: Option<String>,
    pub name: Option<String>,
    pub uploaded_at: Option<String>,
}

impl Attachment {
    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.name.is_none() && self.uploaded_at.is_none()
    }
}

/// The three attachment slots of a record
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Attachments {
    pub polis_asuransi: Attachment,
    pub pks_sewa: Attachment,
    pub sewa_kode: Attachment,
}

impl Attachments {
    pub fn get(&self, kind: AttachmentKind) -> &Attachment {
        match kind {
            AttachmentKind::PolisAsuransi => &self.polis_asuransi,
            AttachmentKind::PksSewa => &self.pks_sewa,
            AttachmentKind::SewaKode => &self.sewa_kode,
        }
    }

    pub fn set(&mut self, kind: AttachmentKind, attachment: Attachment) {
        match kind {
            AttachmentKind::PolisAsuransi => self.polis_asuransi = attachment,
            AttachmentKind::PksSewa => self.pks_sewa = attachment,
            AttachmentKind::SewaKode => self.sewa_kode = attachment,
        }
    }

    /// URLs of every occupied slot
    pub fn urls(&self) -> Vec<String> {
        AttachmentKind::ALL
            .iter()
            .filter_map(|kind| self.get(*kind).url.clone())
            .collect()
    }
}

// =============================================================================
// Stored Record
// =============================================================================

/// Record as held by the record store
#[derive(Debug, Clone, PartialEq)]
pub struct RentalRecord {
    /// Surrogate identifier assigned by the store
    pub id: i64,

    /// Spreadsheet columns
    pub data: RentalRow,

    pub state: LifecycleState,
    pub notification: bool,
    pub attachments: Attachments,
}

impl RentalRecord {
    pub fn key(&self) -> NaturalKey {
        self.data.key()
    }
}

/// Flat transfer shape used at the listing boundary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordTransfer {
    pub id: i64,
    #[serde(flatten)]
    pub data: RentalRow,
    pub state: LifecycleState,
    pub notification: bool,
    pub file_polis_asuransi_url: Option<String>,
    pub file_polis_asuransi_name: Option<String>,
    pub file_polis_asuransi_uploaded_at: Option<String>,
    pub file_pks_sewa_url: Option<String>,
    pub file_pks_sewa_name: Option<String>,
    pub file_pks_sewa_uploaded_at: Option<String>,
    pub file_sewa_kode_url: Option<String>,
    pub file_sewa_kode_name: Option<String>,
    pub file_sewa_kode_uploaded_at: Option<String>,
}

impl From<&RentalRecord> for RecordTransfer {
    fn from(record: &RentalRecord) -> Self {
        let slots = &record.attachments;
        Self {
            id: record.id,
            data: record.data.clone(),
            state: record.state,
            notification: record.notification,
            file_polis_asuransi_url: slots.polis_asuransi.url.clone(),
            file_polis_asuransi_name: slots.polis_asuransi.name.clone(),
            file_polis_asuransi_uploaded_at: slots.polis_asuransi.uploaded_at.clone(),
            file_pks_sewa_url: slots.pks_sewa.url.clone(),
            file_pks_sewa_name: slots.pks_sewa.name.clone(),
            file_pks_sewa_uploaded_at: slots.pks_sewa.uploaded_at.clone(),
            file_sewa_kode_url: slots.sewa_kode.url.clone(),
            file_sewa_kode_name: slots.sewa_kode.name.clone(),
            file_sewa_kode_uploaded_at: slots.sewa_kode.uploaded_at.clone(),
        }
    }
}
