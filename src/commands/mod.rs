//! CLI command definitions and dispatch.

pub mod bootstrap;
pub mod folder;
pub mod health;
pub mod migrate;
pub mod org;

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::output::OutputFormat;
use orghub_core::config::{AppConfig, StoreBackend};
use orghub_core::error::AppError;
use orghub_service::{RequestContext, Services};

/// OrgHub: organization hierarchy and knowledge-base administration
#[derive(Debug, Parser)]
#[command(name = "orghub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Check that the document store is reachable
    Health,
    /// Create the first superadmin
    Bootstrap(bootstrap::BootstrapArgs),
    /// Holdings, companies, departments, and users
    Org(org::OrgArgs),
    /// Knowledge-base folders
    Folder(folder::FolderArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, config).await,
            Commands::Health => health::execute(config, self.format).await,
            Commands::Bootstrap(args) => bootstrap::execute(args, config, self.format).await,
            Commands::Org(args) => org::execute(args, config, self.format).await,
            Commands::Folder(args) => folder::execute(args, config, self.format).await,
        }
    }
}

/// Helper: open the configured store and wire the services over it
pub async fn open_services(config: &AppConfig) -> Result<Services, AppError> {
    if config.database.backend == StoreBackend::Memory {
        crate::output::print_warning(
            "Using the in-memory store; nothing persists after this command.",
        );
    }
    let store = orghub_database::open_store(&config.database).await?;
    Ok(Services::new(store, &config.tree))
}

/// Helper: load a user's record and resolve it into a request context
pub async fn acting_as(services: &Services, user_id: &str) -> Result<RequestContext, AppError> {
    let principal = services.users.load_principal(user_id).await?;
    let ctx = RequestContext::new(&principal);
    debug!(user_id = %user_id, role = ?ctx.scope.role(), "Acting as user");
    Ok(ctx)
}
