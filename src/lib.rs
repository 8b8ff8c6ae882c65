//! Rental Processor Library
//!
//! A Rust library for importing leased-equipment contract spreadsheets into a
//! SQLite record store and tracking how close each contract is to expiry.
//!
//! This library provides tools for:
//! - Normalizing locale-specific spreadsheet cells (Indonesian month names,
//!   date serials, `Rp` currency strings) into canonical values
//! - Parsing workbook exports with a fixed column layout and merged-cell repair
//! - Reconciling parsed rows against stored records by `(tid, lokasi)`
//! - Classifying records as safe or warning based on their end-of-lease month
//! - Storing document attachments and exporting the record set to Excel

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod attachment_store;
        pub mod cell_normalizer;
        pub mod lifecycle;
        pub mod reconciler;
        pub mod record_store;
        pub mod rental_service;
        pub mod spreadsheet_parser;
        pub mod workbook_export;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    AttachmentKind, FieldValue, LifecycleState, MoneyValue, NaturalKey, RecordField, RentalRecord,
    RentalRow,
};
pub use app::services::rental_service::RentalService;
pub use config::Config;

/// Result type alias for the rental processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for rental processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Spreadsheet is structurally unreadable
    #[error("Spreadsheet parse error: {message}")]
    Parse {
        message: String,
        #[source]
        source: Option<calamine::Error>,
    },

    /// A record with the same natural key already exists
    #[error("Record already exists for tid '{tid}' at lokasi '{lokasi}'")]
    DuplicateKey { tid: String, lokasi: String },

    /// Referenced record does not exist
    #[error("Record not found: {target}")]
    NotFound { target: String },

    /// Field name is not part of the editable record schema
    #[error("Invalid field name '{field}'")]
    InvalidField { field: String },

    /// Value cannot be stored in the named field
    #[error("Invalid value for field '{field}': {message}")]
    InvalidFieldValue { field: String, message: String },

    /// Required field is null or blank
    #[error("Required field '{field}' is missing")]
    MissingRequiredField { field: String },

    /// Attachment kind outside the recognized document slots
    #[error("Invalid attachment kind '{kind}' (expected one of: {expected})")]
    InvalidAttachmentKind { kind: String, expected: String },

    /// Record store operation failed
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: sqlx::Error,
    },

    /// Workbook export failed
    #[error("Export error: {message}")]
    Export {
        message: String,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// JSON (de)serialization failed
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a structural parse error without an underlying workbook error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            source: None,
        }
    }

    /// Create a parse error wrapping a workbook reader failure
    pub fn workbook(message: impl Into<String>, source: calamine::Error) -> Self {
        Self::Parse {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create a duplicate key conflict
    pub fn duplicate_key(key: &NaturalKey) -> Self {
        Self::DuplicateKey {
            tid: key.tid.clone(),
            lokasi: key.lokasi.clone(),
        }
    }

    /// Create a not found error
    pub fn not_found(target: impl Into<String>) -> Self {
        Self::NotFound {
            target: target.into(),
        }
    }

    /// Create an invalid field error
    pub fn invalid_field(field: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
        }
    }

    /// Create an invalid field value error
    pub fn invalid_field_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidFieldValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a missing required field error
    pub fn missing_required_field(field: impl Into<String>) -> Self {
        Self::MissingRequiredField {
            field: field.into(),
        }
    }

    /// Create an invalid attachment kind error
    pub fn invalid_attachment_kind(kind: impl Into<String>) -> Self {
        Self::InvalidAttachmentKind {
            kind: kind.into(),
            expected: AttachmentKind::ALL
                .iter()
                .map(|kind| kind.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Create a database error with context
    pub fn database(message: impl Into<String>, source: sqlx::Error) -> Self {
        Self::Database {
            message: message.into(),
            source,
        }
    }

    /// Create an export error with context
    pub fn export(message: impl Into<String>, source: rust_xlsxwriter::XlsxError) -> Self {
        Self::Export {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// Map a failed insert or key update, turning UNIQUE violations into conflicts
    pub fn from_write(error: sqlx::Error, key: &NaturalKey) -> Self {
        match &error {
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                Self::duplicate_key(key)
            }
            _ => Self::database(format!("Failed to write record {}", key), error),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(error: sqlx::Error) -> Self {
        Self::Database {
            message: "Record store operation failed".to_string(),
            source: error,
        }
    }
}

impl From<calamine::Error> for Error {
    fn from(error: calamine::Error) -> Self {
        Self::Parse {
            message: "Workbook could not be read".to_string(),
            source: Some(error),
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(error: rust_xlsxwriter::XlsxError) -> Self {
        Self::Export {
            message: "Workbook could not be written".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON conversion failed".to_string(),
            source: error,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::Configuration {
            message: format!("Invalid config file: {}", error),
        }
    }
}
