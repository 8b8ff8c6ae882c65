//! Attachment upload command

use crate::app::services::rental_service::RentalService;
use crate::cli::args::AttachArgs;
use anyhow::{Context, Result};
use colored::*;

/// Upload a document into one attachment slot of a record
pub async fn run_attach(service: &RentalService, args: &AttachArgs) -> Result<()> {
    let filename = args
        .file
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("{} has no usable file name", args.file.display()))?;
    let bytes = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let stored = service
        .upload_attachment(&args.key.natural_key(), &args.kind, filename, &bytes)
        .await?;

    println!(
        "{} {} as {}",
        "Attached".bright_green().bold(),
        filename,
        stored.url
    );
    Ok(())
}
