//! Document store trait for pluggable persistence backends.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::{Document, Predicate, ResourceKind};

/// Primitive operations every backing store must provide.
///
/// The store offers no joins and no multi-document transactions; each
/// method is a single independent write or read. Implementations exist for
/// an in-process map and for PostgreSQL, both in `orghub-database`.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the backend name (e.g. `"memory"`, `"postgres"`).
    fn backend(&self) -> &str;

    /// Check whether the store is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Return all documents of `kind` matching `predicate`.
    ///
    /// The deny-all predicate yields an empty list without touching the
    /// backend.
    async fn find_many(
        &self,
        kind: ResourceKind,
        predicate: &Predicate,
    ) -> AppResult<Vec<Document>>;

    /// Fetch a single document by id.
    async fn find_one(&self, kind: ResourceKind, id: &str) -> AppResult<Option<Document>>;

    /// Insert a new document under `id`. Fails with a validation error when
    /// the id is already taken.
    async fn insert(&self, kind: ResourceKind, id: &str, doc: Document) -> AppResult<()>;

    /// Overwrite the given top-level fields. Returns `false` when the
    /// document does not exist.
    async fn update_fields(
        &self,
        kind: ResourceKind,
        id: &str,
        partial: Document,
    ) -> AppResult<bool>;

    /// Physically delete a document. Returns `false` when it did not exist.
    async fn delete_one(&self, kind: ResourceKind, id: &str) -> AppResult<bool>;

    /// Add `value` to the string-set stored in `field`, creating the set if
    /// needed. Adding an existing member is a no-op. Returns `false` when the
    /// document does not exist.
    async fn add_to_set(
        &self,
        kind: ResourceKind,
        id: &str,
        field: &str,
        value: &str,
    ) -> AppResult<bool>;

    /// Remove `value` from the string-set stored in `field`. Returns `false`
    /// when the document does not exist.
    async fn remove_from_set(
        &self,
        kind: ResourceKind,
        id: &str,
        field: &str,
        value: &str,
    ) -> AppResult<bool>;
}
