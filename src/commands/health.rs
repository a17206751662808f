//! Store health check command.

use serde::Serialize;

use crate::output::{self, OutputFormat};
use orghub_core::config::AppConfig;
use orghub_core::error::AppError;
use orghub_core::traits::DocumentStore;

#[derive(Debug, Serialize)]
struct HealthReport {
    backend: String,
    healthy: bool,
}

/// Execute the health check
pub async fn execute(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let store = orghub_database::open_store(&config.database).await?;
    let report = HealthReport {
        backend: store.backend().to_string(),
        healthy: store.health_check().await?,
    };

    match format {
        OutputFormat::Json => output::print_item(&report, format),
        OutputFormat::Table => {
            output::print_kv("Backend", &report.backend);
            output::print_kv("Healthy", if report.healthy { "yes" } else { "no" });
        }
    }

    if report.healthy {
        Ok(())
    } else {
        Err(AppError::connectivity("Document store is not healthy"))
    }
}
