//! # orghub-core
//!
//! Core crate for OrgHub. Contains the unified error system, configuration
//! schemas, typed identifiers, resource kinds, query predicates, and the
//! [`DocumentStore`](traits::DocumentStore) trait every storage backend
//! implements.
//!
//! This crate has **no** internal dependencies on other OrgHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
