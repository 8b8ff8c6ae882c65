//! Command implementations for the rental processor CLI
//!
//! Each subcommand lives in its own module. Commands report results on
//! stdout and return `anyhow` errors with file and configuration context.

pub mod attach;
pub mod export;
pub mod import;
pub mod records;
pub mod shared;

use crate::app::services::rental_service::RentalService;
use crate::cli::args::{Commands, GlobalArgs};
use anyhow::{Context, Result};
use tracing::debug;

/// Main command runner
///
/// Sets up logging and configuration, opens the record store and dispatches
/// to the subcommand handler.
pub async fn run(global: GlobalArgs, command: Commands) -> Result<()> {
    shared::setup_logging(&global);
    debug!("Command: {:?}", command);

    if let Commands::Fields = command {
        records::run_fields();
        return Ok(());
    }

    let config = shared::load_configuration(&global)?;

    if let Commands::Import(args) = command {
        return import::run_import(&global, config, &args).await;
    }

    let service = RentalService::connect(&config)
        .await
        .with_context(|| format!("Failed to open record store at {}", config.database.url))?;

    let result = match command {
        Commands::List(args) => records::run_list(&service, &args).await,
        Commands::Add(args) => records::run_add(&service, &args).await,
        Commands::Edit(args) => records::run_edit(&service, &args).await,
        Commands::Delete(args) => records::run_delete(&service, &args).await,
        Commands::BatchDelete(args) => records::run_batch_delete(&service, &args).await,
        Commands::Attach(args) => attach::run_attach(&service, &args).await,
        Commands::Export(args) => export::run_export(&global, &service, &args).await,
        Commands::Import(_) | Commands::Fields => Ok(()),
    };

    service.store().close().await;
    result
}
