//! # orghub-database
//!
//! Document store implementations (in-memory and PostgreSQL), connection
//! management, migrations, and one typed repository per collection.
//!
//! Repositories are the only way services touch the store, so every read
//! path goes through the same predicate machinery the access layer builds.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{MemoryDocumentStore, PgDocumentStore, open_store};
