//! Record listing and single-record commands

use crate::app::models::{FieldValue, LifecycleState, RecordField, RecordTransfer};
use crate::app::services::rental_service::RentalService;
use crate::cli::args::{AddArgs, BatchDeleteArgs, EditArgs, KeyArgs, ListArgs, OutputFormat};
use anyhow::{Context, Result};
use colored::*;
use std::collections::{BTreeMap, BTreeSet};

/// List every record
pub async fn run_list(service: &RentalService, args: &ListArgs) -> Result<()> {
    let listing = service.list_all().await.context("Failed to list records")?;

    match args.format {
        OutputFormat::Json => {
            let transfer: Vec<RecordTransfer> =
                listing.records.iter().map(RecordTransfer::from).collect();
            println!("{}", serde_json::to_string_pretty(&transfer)?);
        }
        OutputFormat::Table => {
            println!(
                "{:>5}  {:<12} {:<28} {:<8} {:<8}",
                "ID".bold(),
                "TID".bold(),
                "LOKASI".bold(),
                "AKHIR".bold(),
                "STATE".bold()
            );
            for record in &listing.records {
                let state = match record.state {
                    LifecycleState::Warning => record.state.as_str().bright_red().bold(),
                    LifecycleState::Safe => record.state.as_str().green(),
                };
                println!(
                    "{:>5}  {:<12} {:<28} {:<8} {}",
                    record.id,
                    record.data.tid,
                    record.data.lokasi,
                    record.data.periode_akhir.as_deref().unwrap_or("-"),
                    state
                );
            }
            println!(
                "\n{} records, {} in warning",
                listing.records.len(),
                listing
                    .records
                    .iter()
                    .filter(|record| record.notification)
                    .count()
            );
            if listing.malformed > 0 {
                println!(
                    "{}",
                    format!("{} records have an unreadable end month", listing.malformed).yellow()
                );
            }
        }
    }
    Ok(())
}

/// Add one record from a JSON object of field values
pub async fn run_add(service: &RentalService, args: &AddArgs) -> Result<()> {
    let content = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let values: BTreeMap<String, FieldValue> = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON object", args.file.display()))?;

    let outcome = service.add_row(&values).await?;
    for (field, failure) in &outcome.warnings {
        println!("{} {}: {}", "warning".yellow(), field, failure);
    }
    println!("{} record {}", "Added".bright_green().bold(), outcome.id);
    Ok(())
}

/// Set one field of a record
pub async fn run_edit(service: &RentalService, args: &EditArgs) -> Result<()> {
    let value = args.field_value()?;
    let outcome = service
        .edit_field(&args.key.natural_key(), &args.field, value)
        .await?;

    if let Some(failure) = &outcome.warning {
        println!("{} {}: {}", "warning".yellow(), outcome.field, failure);
    }
    if outcome.changed {
        println!(
            "{} {} of record {}",
            "Updated".bright_green().bold(),
            outcome.field,
            outcome.id
        );
    } else {
        println!("Record {} already has that {}", outcome.id, outcome.field);
    }
    Ok(())
}

/// Delete one record by key
pub async fn run_delete(service: &RentalService, args: &KeyArgs) -> Result<()> {
    let key = args.natural_key();
    service.delete_row(&key).await?;
    println!("{} {}", "Deleted".bright_green().bold(), key);
    Ok(())
}

/// Delete records by id
pub async fn run_batch_delete(service: &RentalService, args: &BatchDeleteArgs) -> Result<()> {
    let ids: BTreeSet<i64> = args.ids.iter().copied().collect();
    let deleted = service.batch_delete(&ids).await?;
    println!(
        "{} {} of {} records",
        "Deleted".bright_green().bold(),
        deleted,
        ids.len()
    );
    Ok(())
}

/// Print the editable field names
pub fn run_fields() {
    for field in RecordField::ALL {
        let mut notes = Vec::new();
        if field.is_key() {
            notes.push("key");
        }
        if field.is_required() {
            notes.push("required");
        }
        if notes.is_empty() {
            println!("{}", field.name());
        } else {
            println!("{} ({})", field.name(), notes.join(", "));
        }
    }
}
