//! # orghub-entity
//!
//! Domain entity documents for OrgHub. Every struct in this crate is stored
//! as one JSON document in a store collection; field names follow the
//! persisted schema (`parentID`, `foldersids`, `fileIds`, ...), so they are
//! also the names predicates filter on.

pub mod context;
pub mod file;
pub mod folder;
pub mod org;
pub mod user;

use serde::Serialize;
use serde::de::DeserializeOwned;

use orghub_core::types::ResourceKind;

pub use context::OrgContext;

/// An entity persisted as a document in one store collection.
pub trait DocumentEntity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// The collection holding documents of this type.
    const KIND: ResourceKind;

    /// The document's identifier.
    fn document_id(&self) -> &str;
}
