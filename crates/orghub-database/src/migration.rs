//! Schema migrations for the PostgreSQL document table.

use sqlx::migrate::Migrator;
use tracing::info;

use orghub_core::error::{AppError, ErrorKind};
use orghub_core::result::AppResult;

use crate::connection::DatabasePool;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Apply every pending migration. Returns the number of migrations known to
/// this build.
pub async fn run_migrations(db: &DatabasePool) -> AppResult<usize> {
    let known = MIGRATOR.iter().count();
    info!(known, "Applying document store migrations");

    MIGRATOR.run(db.pool()).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to apply migrations: {e}"),
            e,
        )
    })?;

    info!("Document store schema is up to date");
    Ok(known)
}
