//! Workbook import command

use super::shared::spinner;
use crate::app::services::rental_service::{ImportReport, RentalService};
use crate::cli::args::{GlobalArgs, ImportArgs};
use crate::config::Config;
use anyhow::{Context, Result};
use colored::*;
use tracing::info;

/// Import one workbook in the requested mode
pub async fn run_import(global: &GlobalArgs, config: Config, args: &ImportArgs) -> Result<()> {
    let parser = args.parser_config(config.parser.clone());
    let config = config.with_parser(parser);

    let bytes = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("Failed to read workbook {}", args.file.display()))?;

    let service = RentalService::connect(&config)
        .await
        .with_context(|| format!("Failed to open record store at {}", config.database.url))?;

    let progress = spinner(
        global.show_progress(),
        format!("Importing {}", args.file.display()),
    );
    let result = service.import(&bytes, args.mode.into()).await;
    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }
    service.store().close().await;

    let report = result.with_context(|| format!("Import of {} failed", args.file.display()))?;
    info!("Imported {}", args.file.display());
    print_import_report(&report);
    Ok(())
}

/// Print a human-readable import summary
pub fn print_import_report(report: &ImportReport) {
    let parse = &report.parse;
    let summary = &report.summary;

    let title = format!("Import Summary ({})", report.mode);
    println!("\n{}", title.bright_green().bold());
    println!("  Sheet rows:     {}", parse.total_rows);
    println!("  Blank rows:     {}", parse.blank_rows);
    println!(
        "  Parsed rows:    {}",
        parse.records_parsed.to_string().bright_white().bold()
    );
    if parse.rows_dropped > 0 {
        println!(
            "  Dropped rows:   {} (missing required fields)",
            parse.rows_dropped.to_string().yellow()
        );
    }
    println!("  Merged cells:   {}", parse.cells_filled);
    println!(
        "  Created:        {}",
        summary.created.to_string().bright_white().bold()
    );
    println!(
        "  Updated:        {} ({} fields)",
        summary.updated.to_string().bright_white().bold(),
        summary.field_writes
    );
    println!(
        "  Skipped:        {} (existing {}, unknown {}, unchanged {})",
        summary.skipped, summary.already_existing, summary.not_found, summary.unchanged
    );

    if parse.has_warnings() {
        println!("\n{}", "Normalization warnings".yellow().bold());
        for warning in &parse.warnings {
            println!(
                "  row {} {}: {}",
                warning.row, warning.field, warning.failure
            );
        }
    }
}
