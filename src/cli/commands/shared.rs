//! Shared components for CLI commands

use crate::cli::args::GlobalArgs;
use crate::config::Config;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::{debug, info};

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence over the verbosity flags.
pub fn setup_logging(args: &GlobalArgs) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("rental_processor={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}

/// Load configuration using layered approach (file -> env -> args)
pub fn load_configuration(args: &GlobalArgs) -> Result<Config> {
    let default_config_path = if args.config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &args.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| path.as_path()),
    };

    if let Some(config_path) = config_file {
        info!("Using config file: {}", config_path.display());
    } else {
        debug!("No config file found, using defaults and environment variables");
    }

    let mut config = Config::load_layered(config_file).with_context(|| match config_file {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Failed to load configuration from the environment".to_string(),
    })?;

    apply_cli_overrides(&mut config, args);
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut Config, args: &GlobalArgs) {
    if let Some(url) = &args.database_url {
        config.database.url = url.clone();
    }
    if let Some(dir) = &args.files_dir {
        config.attachments.root_dir = dir.clone();
    }
}

/// Spinner shown while a long operation runs, unless in quiet mode
pub fn spinner(show: bool, message: impl Into<String>) -> Option<ProgressBar> {
    if !show {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_cli_overrides_take_precedence() {
        let args = crate::cli::args::Args::parse_from([
            "rental-processor",
            "--database",
            "sqlite::memory:",
            "--files-dir",
            "/tmp/lampiran",
            "fields",
        ]);
        let mut config = Config::default().with_database_url("sqlite://other.db");
        apply_cli_overrides(&mut config, &args.global);

        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.attachments.root_dir, PathBuf::from("/tmp/lampiran"));
    }

    #[test]
    fn test_explicit_config_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[lifecycle]\nwarning_window_days = 45\n").unwrap();

        let args = crate::cli::args::Args::parse_from([
            "rental-processor",
            "--config",
            path.to_str().unwrap(),
            "fields",
        ]);
        let config = load_configuration(&args.global).unwrap();
        assert_eq!(config.lifecycle.warning_window_days, 45);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args = crate::cli::args::Args::parse_from([
            "rental-processor",
            "--config",
            "/nonexistent/rental.toml",
            "fields",
        ]);
        let err = load_configuration(&args.global).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/rental.toml"));
    }
}
