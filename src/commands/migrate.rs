//! Database migration management commands.

use clap::{Args, Subcommand};

use crate::output;
use orghub_core::config::{AppConfig, StoreBackend};
use orghub_core::error::AppError;
use orghub_database::DatabasePool;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    if config.database.backend != StoreBackend::Postgres {
        output::print_warning("The in-memory store has no schema; nothing to migrate.");
        return Ok(());
    }

    match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            let db = DatabasePool::connect(&config.database).await?;
            let known = orghub_database::migration::run_migrations(&db).await;
            db.close().await;
            output::print_success(&format!("{} migration(s) applied or up to date.", known?));
        }
    }

    Ok(())
}
