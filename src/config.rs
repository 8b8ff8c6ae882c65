//! Configuration management and validation.
//!
//! Provides configuration structures for the record store, the spreadsheet
//! layout, attachment storage and the lifecycle warning window, together with
//! layered loading (defaults, TOML file, environment).

use crate::app::services::cell_normalizer::FallbackPolicy;
use crate::constants::{
    APP_CONFIG_DIR, CONFIG_FILE_NAME, DEFAULT_DATABASE_URL, DEFAULT_FILES_DIR,
    DEFAULT_MAX_CONNECTIONS, DEFAULT_SKIP_ROWS, DEFAULT_URL_PREFIX, ENV_DATABASE_URL,
    ENV_FILES_DIR, ENV_WARNING_DAYS, WARNING_WINDOW_DAYS,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Record store connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// sqlx connection URL, e.g. `sqlite://rental.db`
    pub url: String,

    /// Connection pool size
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

/// Where the data rows of a sheet begin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderPolicy {
    /// Fixed number of title/header rows precede the data
    SkipRows(usize),
    /// The first row is the header, data starts on the second
    FirstRowHeader,
}

impl HeaderPolicy {
    /// Number of leading rows that are not data
    pub fn rows_to_skip(&self) -> usize {
        match self {
            HeaderPolicy::SkipRows(rows) => *rows,
            HeaderPolicy::FirstRowHeader => 1,
        }
    }
}

impl Default for HeaderPolicy {
    fn default() -> Self {
        HeaderPolicy::SkipRows(DEFAULT_SKIP_ROWS)
    }
}

/// Spreadsheet layout and normalization settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub header: HeaderPolicy,

    /// Sheet carries a leading row-number ("No") column before the data columns
    pub row_number_column: bool,

    /// Value stored when a month or amount cannot be normalized
    pub fallback: FallbackPolicy,

    /// Repair vertically merged cells by filling values downward
    pub fill_merged_cells: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            header: HeaderPolicy::default(),
            row_number_column: true,
            fallback: FallbackPolicy::default(),
            fill_merged_cells: true,
        }
    }
}

impl ParserConfig {
    pub fn with_header(mut self, header: HeaderPolicy) -> Self {
        self.header = header;
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Sheet has no leading row-number column
    pub fn without_row_number_column(mut self) -> Self {
        self.row_number_column = false;
        self
    }

    /// Leave empty cells empty instead of filling from above
    pub fn without_merged_cell_fill(mut self) -> Self {
        self.fill_merged_cells = false;
        self
    }
}

/// Attachment storage settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachmentConfig {
    /// Directory uploaded files are written to
    pub root_dir: PathBuf,

    /// Prefix of the URL recorded for each stored file
    pub url_prefix: String,
}

impl Default for AttachmentConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from(DEFAULT_FILES_DIR),
            url_prefix: DEFAULT_URL_PREFIX.to_string(),
        }
    }
}

/// Lifecycle evaluation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Days before the end month at which a record becomes a warning
    pub warning_window_days: i64,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            warning_window_days: WARNING_WINDOW_DAYS,
        }
    }
}

/// Main configuration for the rental processor
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub parser: ParserConfig,
    pub attachments: AttachmentConfig,
    pub lifecycle: LifecycleConfig,
}

impl Config {
    /// Default config file location under the user config directory
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_CONFIG_DIR).join(CONFIG_FILE_NAME))
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read config file {}", path.display()), e))?;
        let config: Config = toml::from_str(&content)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration in layers: defaults, then file, then environment
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_with(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_DATABASE_URL) {
            debug!("Database URL overridden by {}", ENV_DATABASE_URL);
            self.database.url = url;
        }
        if let Some(dir) = lookup(ENV_FILES_DIR) {
            debug!("Attachment directory overridden by {}", ENV_FILES_DIR);
            self.attachments.root_dir = PathBuf::from(dir);
        }
        if let Some(days) = lookup(ENV_WARNING_DAYS) {
            self.lifecycle.warning_window_days = days.trim().parse().map_err(|_| {
                Error::configuration(format!(
                    "{} must be a whole number of days, got '{}'",
                    ENV_WARNING_DAYS, days
                ))
            })?;
        }
        Ok(())
    }

    /// Check settings for consistency
    pub fn validate(&self) -> Result<()> {
        if self.database.url.trim().is_empty() {
            return Err(Error::configuration("Database URL must not be empty"));
        }
        if self.database.max_connections == 0 {
            return Err(Error::configuration("Database max_connections must be greater than 0"));
        }
        if self.lifecycle.warning_window_days < 0 {
            return Err(Error::configuration("Lifecycle warning window cannot be negative"));
        }
        if self.attachments.url_prefix.trim().is_empty() {
            return Err(Error::configuration("Attachment URL prefix must not be empty"));
        }
        Ok(())
    }

    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database.url = url.into();
        self
    }

    pub fn with_files_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.attachments.root_dir = dir.into();
        self
    }

    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_warning_window_days(mut self, days: i64) -> Self {
        self.lifecycle.warning_window_days = days;
        self
    }
}
