//! Document store backends.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use tracing::info;

use orghub_core::config::{DatabaseConfig, StoreBackend};
use orghub_core::result::AppResult;
use orghub_core::traits::DocumentStore;

use crate::connection::DatabasePool;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// Open the store selected by `config`.
///
/// The PostgreSQL backend connects eagerly; an unreachable server surfaces
/// here as a connectivity error. Migrations are not applied.
pub async fn open_store(config: &DatabaseConfig) -> AppResult<Arc<dyn DocumentStore>> {
    let store: Arc<dyn DocumentStore> = match config.backend {
        StoreBackend::Memory => Arc::new(MemoryDocumentStore::new()),
        StoreBackend::Postgres => {
            let db = DatabasePool::connect(config).await?;
            Arc::new(PgDocumentStore::from_database(&db))
        }
    };
    info!(backend = store.backend(), "Document store ready");
    Ok(store)
}
