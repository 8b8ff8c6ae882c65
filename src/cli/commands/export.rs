//! Workbook export command

use super::shared::spinner;
use crate::app::services::rental_service::RentalService;
use crate::cli::args::{ExportArgs, GlobalArgs};
use anyhow::{Context, Result};
use colored::*;

/// Export every record to an xlsx workbook
pub async fn run_export(
    global: &GlobalArgs,
    service: &RentalService,
    args: &ExportArgs,
) -> Result<()> {
    let progress = spinner(
        global.show_progress(),
        format!("Exporting to {}", args.output.display()),
    );
    let result = service.export_workbook(&args.output).await;
    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    let count = result.with_context(|| format!("Export to {} failed", args.output.display()))?;
    println!(
        "{} {} records to {}",
        "Exported".bright_green().bold(),
        count,
        args.output.display()
    );
    Ok(())
}
