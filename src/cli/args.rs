//! Command-line argument definitions for the rental processor
//!
//! This module defines the complete CLI interface using clap derive API.

use crate::app::models::{FieldValue, NaturalKey};
use crate::app::services::cell_normalizer::FallbackPolicy;
use crate::app::services::reconciler::ReconcileMode;
use crate::config::{HeaderPolicy, ParserConfig};
use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the rental contract processor
///
/// Imports leased-equipment contract spreadsheets into a SQLite record store,
/// edits individual records, links documents and exports the record set.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "rental-processor",
    version,
    about = "Import rental contract spreadsheets and track contract expiry",
    long_about = "Reads leased-equipment contract workbooks (Indonesian month names, date \
                  serials and Rp amounts), reconciles them by TID and location against a SQLite \
                  record store, and flags contracts that end within the warning window."
)]
pub struct Args {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options shared by every subcommand
#[derive(Debug, Clone, ClapArgs)]
pub struct GlobalArgs {
    /// Path to configuration file
    ///
    /// TOML configuration file for parser and storage settings. If not
    /// specified, looks for ~/.config/rental-processor/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Database URL, e.g. sqlite://rental.db
    #[arg(long = "database", value_name = "URL", global = true)]
    pub database_url: Option<String>,

    /// Directory attachments are stored in
    #[arg(long = "files-dir", value_name = "DIR", global = true)]
    pub files_dir: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Import a contract workbook
    Import(ImportArgs),
    /// List every record, refreshing lifecycle state
    List(ListArgs),
    /// Add one record from a JSON object of field values
    Add(AddArgs),
    /// Set one field of a record
    Edit(EditArgs),
    /// Delete one record by TID and location
    Delete(KeyArgs),
    /// Delete records by id
    BatchDelete(BatchDeleteArgs),
    /// Store a document and link it to a record
    Attach(AttachArgs),
    /// Export every record to an xlsx workbook
    Export(ExportArgs),
    /// List the editable field names
    Fields,
}

/// Import mode as given on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ImportMode {
    /// Create records for new keys, skip existing ones
    Create,
    /// Update existing records, skip new keys
    Update,
    /// Create new keys and update existing ones
    Upsert,
}

impl From<ImportMode> for ReconcileMode {
    fn from(mode: ImportMode) -> Self {
        match mode {
            ImportMode::Create => ReconcileMode::Create,
            ImportMode::Update => ReconcileMode::Update,
            ImportMode::Upsert => ReconcileMode::Upsert,
        }
    }
}

/// Fallback policy as given on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FallbackArg {
    /// Store nothing for an unreadable cell
    Null,
    /// Keep the cell text as it was
    Original,
}

impl From<FallbackArg> for FallbackPolicy {
    fn from(arg: FallbackArg) -> Self {
        match arg {
            FallbackArg::Null => FallbackPolicy::Null,
            FallbackArg::Original => FallbackPolicy::Original,
        }
    }
}

/// Arguments for the import command
#[derive(Debug, Clone, ClapArgs)]
pub struct ImportArgs {
    /// How rows are matched against stored records
    #[arg(value_enum)]
    pub mode: ImportMode,

    /// Workbook to import (xlsx, xls or ods)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Rows above the data, including the header row
    #[arg(
        long = "skip-rows",
        value_name = "N",
        conflicts_with = "first_row_header"
    )]
    pub skip_rows: Option<usize>,

    /// The sheet has a single header row
    #[arg(long = "first-row-header")]
    pub first_row_header: bool,

    /// What to store for cells that cannot be normalized
    #[arg(long = "fallback", value_enum)]
    pub fallback: Option<FallbackArg>,

    /// The sheet has no leading row-number column
    #[arg(long = "no-row-number-column")]
    pub no_row_number_column: bool,
}

impl ImportArgs {
    /// Apply the layout flags to the configured parser settings
    pub fn parser_config(&self, base: ParserConfig) -> ParserConfig {
        let mut config = base;
        if let Some(rows) = self.skip_rows {
            config = config.with_header(HeaderPolicy::SkipRows(rows));
        }
        if self.first_row_header {
            config = config.with_header(HeaderPolicy::FirstRowHeader);
        }
        if let Some(fallback) = self.fallback {
            config = config.with_fallback(fallback.into());
        }
        if self.no_row_number_column {
            config = config.without_row_number_column();
        }
        config
    }
}

/// Output format for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON array for scripting
    Json,
}

/// Arguments for the list command
#[derive(Debug, Clone, ClapArgs)]
pub struct ListArgs {
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the add command
#[derive(Debug, Clone, ClapArgs)]
pub struct AddArgs {
    /// JSON object mapping field names to values
    #[arg(long = "file", value_name = "JSON")]
    pub file: PathBuf,
}

/// Natural key of a record
#[derive(Debug, Clone, ClapArgs)]
pub struct KeyArgs {
    /// Terminal identifier
    #[arg(long = "tid")]
    pub tid: String,

    /// Deployment location
    #[arg(long = "lokasi")]
    pub lokasi: String,
}

impl KeyArgs {
    pub fn natural_key(&self) -> NaturalKey {
        NaturalKey::new(self.tid.trim(), self.lokasi.trim())
    }
}

/// Arguments for the edit command
#[derive(Debug, Clone, ClapArgs)]
pub struct EditArgs {
    #[command(flatten)]
    pub key: KeyArgs,

    /// Field to change (see `fields`)
    #[arg(long = "field")]
    pub field: String,

    /// New value
    #[arg(
        long = "value",
        required_unless_present = "null",
        conflicts_with = "null"
    )]
    pub value: Option<String>,

    /// Clear the field
    #[arg(long = "null")]
    pub null: bool,
}

impl EditArgs {
    /// Value to write, as given on the command line
    pub fn field_value(&self) -> Result<FieldValue> {
        match (&self.value, self.null) {
            (_, true) => Ok(FieldValue::Null),
            (Some(value), false) => Ok(FieldValue::Text(value.clone())),
            (None, false) => Err(Error::configuration("Either --value or --null is required")),
        }
    }
}

/// Arguments for the batch-delete command
#[derive(Debug, Clone, ClapArgs)]
pub struct BatchDeleteArgs {
    /// Record ids to delete
    #[arg(value_name = "ID", required = true, num_args = 1..)]
    pub ids: Vec<i64>,
}

/// Arguments for the attach command
#[derive(Debug, Clone, ClapArgs)]
pub struct AttachArgs {
    #[command(flatten)]
    pub key: KeyArgs,

    /// Slot to fill: polis_asuransi, pks_sewa or sewa_kode
    #[arg(long = "kind")]
    pub kind: String,

    /// Document to upload
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Arguments for the export command
#[derive(Debug, Clone, ClapArgs)]
pub struct ExportArgs {
    /// Workbook to write
    #[arg(value_name = "OUT")]
    pub output: PathBuf,
}

impl GlobalArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress spinners (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("rental-processor").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_command_definition() {
        use clap::CommandFactory;

        Args::command().debug_assert();
        let help = Args::command().render_help().to_string();
        for name in ["import", "batch-delete", "attach", "fields"] {
            assert!(help.contains(name), "help is missing {}", name);
        }
    }

    #[test]
    fn test_import_arguments() {
        let args = parse(&[
            "import",
            "update",
            "kontrak.xlsx",
            "--first-row-header",
            "--fallback",
            "original",
            "--no-row-number-column",
            "--database",
            "sqlite::memory:",
        ]);
        assert_eq!(args.global.database_url.as_deref(), Some("sqlite::memory:"));

        let Some(Commands::Import(import)) = args.command else {
            panic!("expected import command");
        };
        assert_eq!(ReconcileMode::from(import.mode), ReconcileMode::Update);

        let config = import.parser_config(ParserConfig::default());
        assert_eq!(config.header, HeaderPolicy::FirstRowHeader);
        assert_eq!(config.fallback, FallbackPolicy::Original);
        assert!(!config.row_number_column);
    }

    #[test]
    fn test_import_keeps_configured_layout_without_flags() {
        let args = parse(&["import", "create", "kontrak.xlsx"]);
        let Some(Commands::Import(import)) = args.command else {
            panic!("expected import command");
        };
        let base = ParserConfig::default().with_header(HeaderPolicy::SkipRows(3));
        assert_eq!(import.parser_config(base).header, HeaderPolicy::SkipRows(3));
    }

    #[test]
    fn test_edit_value_or_null() {
        let args = parse(&["edit", "--tid", "T1", "--lokasi", "Mall", "--field", "pic", "--null"]);
        let Some(Commands::Edit(edit)) = args.command else {
            panic!("expected edit command");
        };
        assert_eq!(edit.field_value().unwrap(), FieldValue::Null);

        let result = Args::try_parse_from([
            "rental-processor", "edit", "--tid", "T1", "--lokasi", "Mall", "--field", "pic",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_batch_delete_requires_ids() {
        let args = parse(&["batch-delete", "3", "5"]);
        let Some(Commands::BatchDelete(batch)) = args.command else {
            panic!("expected batch-delete command");
        };
        assert_eq!(batch.ids, vec![3, 5]);

        assert!(Args::try_parse_from(["rental-processor", "batch-delete"]).is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = parse(&["fields"]);
        assert_eq!(args.global.get_log_level(), "warn");
        args.global.verbose = 2;
        assert_eq!(args.global.get_log_level(), "debug");
        args.global.quiet = true;
        assert_eq!(args.global.get_log_level(), "error");
        assert!(!args.global.show_progress());
    }
}
