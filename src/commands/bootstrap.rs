//! First-superadmin bootstrap command.

use clap::Args;

use crate::output::{self, OutputFormat};
use orghub_core::config::AppConfig;
use orghub_core::error::AppError;

/// Arguments for the bootstrap command
#[derive(Debug, Args)]
pub struct BootstrapArgs {
    /// Email of the superadmin
    #[arg(short, long)]
    pub email: String,
    /// Display name
    #[arg(short = 'n', long)]
    pub full_name: Option<String>,
}

/// Execute the bootstrap command
pub async fn execute(
    args: &BootstrapArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let services = super::open_services(config).await?;
    let user = services
        .users
        .bootstrap_superadmin(&args.email, args.full_name.clone())
        .await?;

    match format {
        OutputFormat::Json => output::print_item(&user, format),
        OutputFormat::Table => {
            output::print_success(&format!("Superadmin '{}' created (id: {})", user.email, user.id));
        }
    }
    Ok(())
}
