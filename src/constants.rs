//! Application constants for the rental processor
//!
//! This module contains the spreadsheet layout, locale tables, default values
//! and storage names used throughout the rental processor application.

// =============================================================================
// Spreadsheet Layout
// =============================================================================

/// Canonical column names in the order they appear in the export
pub const COLUMN_NAMES: &[&str] = &[
    "jenis_mesin",
    "tid",
    "kc_supervisi",
    "lokasi",
    "vendor_cro",
    "harga_sewa_tahun",
    "total_harga_sewa_periode",
    "lama_sewa_tahun",
    "periode_awal",
    "periode_akhir",
    "nomor_polis_asuransi",
    "perjanjian_sewa_pks",
    "persetujuan_sewa_kode_remarks",
    "pic",
    "nomor_hp",
];

/// Columns that must be present for a row to become a record
pub const REQUIRED_COLUMNS: &[&str] = &["jenis_mesin", "tid", "kc_supervisi", "lokasi"];

/// Title/header rows preceding the data in the legacy export layout
pub const DEFAULT_SKIP_ROWS: usize = 5;

/// Literal cell values left behind by the previous export path, read as null
pub const NULL_MARKERS: &[&str] = &["nan", "NaN"];

// =============================================================================
// Cell Normalization
// =============================================================================

/// Indonesian month names and their English equivalents
pub const INDONESIAN_MONTHS: [(&str, &str); 12] = [
    ("Januari", "January"),
    ("Februari", "February"),
    ("Maret", "March"),
    ("April", "April"),
    ("Mei", "May"),
    ("Juni", "June"),
    ("Juli", "July"),
    ("Agustus", "August"),
    ("September", "September"),
    ("Oktober", "October"),
    ("November", "November"),
    ("Desember", "December"),
];

/// Epoch of the spreadsheet date-serial convention (year, month, day)
pub const DATE_SERIAL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Largest date serial accepted (9999-12-31)
pub const MAX_DATE_SERIAL: f64 = 2_958_465.0;

/// Canonical month format stored in `periode_awal` / `periode_akhir`
pub const MONTH_FORMAT: &str = "%Y-%m";

/// Currency tokens stripped before parsing an amount
pub const CURRENCY_TOKEN_PATTERN: &str = r"(?i)rp|idr";

// =============================================================================
// Lifecycle
// =============================================================================

/// Days before the end month at which a contract enters the warning state
pub const WARNING_WINDOW_DAYS: i64 = 90;

// =============================================================================
// Storage
// =============================================================================

/// Default SQLite database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite://rental.db";

/// Default connection pool size
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Record table name
pub const RENTAL_TABLE: &str = "rental_data";

/// Default attachment directory
pub const DEFAULT_FILES_DIR: &str = "files";

/// Default prefix for attachment URLs
pub const DEFAULT_URL_PREFIX: &str = "files";

/// Timestamp format recorded for uploaded attachments
pub const UPLOAD_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// Environment and Configuration
// =============================================================================

/// Environment variable overriding the database URL
pub const ENV_DATABASE_URL: &str = "RENTAL_DATABASE_URL";

/// Environment variable overriding the attachment directory
pub const ENV_FILES_DIR: &str = "RENTAL_FILES_DIR";

/// Environment variable overriding the warning window
pub const ENV_WARNING_DAYS: &str = "RENTAL_WARNING_DAYS";

/// Application directory name under the user config dir
pub const APP_CONFIG_DIR: &str = "rental-processor";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// Export
// =============================================================================

/// Worksheet name used for exports
pub const EXPORT_SHEET_NAME: &str = "Rental Data";

/// Export column headers
pub const EXPORT_HEADERS: [&str; 21] = [
    "ID",
    "Jenis Mesin",
    "TID",
    "KC Supervisi",
    "Lokasi",
    "Vendor CRO",
    "Harga Sewa/Tahun",
    "Total Harga Sewa Periode",
    "Lama Sewa (Tahun)",
    "Periode Awal",
    "Periode Akhir",
    "Nomor Polis Asuransi",
    "Perjanjian Sewa PKS",
    "Persetujuan Sewa Kode Remarks",
    "PIC",
    "Nomor HP",
    "State",
    "Notification",
    "File Polis Asuransi",
    "File PKS Sewa",
    "File Sewa Kode",
];

/// Export column widths in characters
pub const EXPORT_COLUMN_WIDTHS: [f64; 21] = [
    5.0, 15.0, 10.0, 15.0, 20.0, 15.0, 18.0, 20.0, 15.0, 12.0, 12.0, 20.0, 20.0, 25.0, 15.0, 15.0,
    10.0, 12.0, 20.0, 20.0, 20.0,
];
