//! Typed repositories, one per collection, over the store primitives.
//!
//! [`DocumentRepository`] carries the operations every collection shares;
//! each entity module adds its own lookups as inherent methods on the
//! corresponding alias.

pub mod company;
pub mod department;
pub mod file;
pub mod folder;
pub mod holding;
pub mod user;

use std::marker::PhantomData;
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;

use orghub_core::error::AppError;
use orghub_core::result::AppResult;
use orghub_core::traits::DocumentStore;
use orghub_core::types::{Document, Predicate, document};
use orghub_entity::DocumentEntity;

pub use company::CompanyRepository;
pub use department::DepartmentRepository;
pub use file::FileRepository;
pub use folder::FolderRepository;
pub use holding::HoldingRepository;
pub use user::UserRepository;

/// Field stamped on every partial update.
const UPDATED_AT: &str = "updated_at";

/// Repository for documents of entity type `E`.
pub struct DocumentRepository<E> {
    store: Arc<dyn DocumentStore>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for DocumentRepository<E> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _entity: PhantomData,
        }
    }
}

impl<E> std::fmt::Debug for DocumentRepository<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentRepository")
            .field("store", &self.store.backend())
            .field("entity", &std::any::type_name::<E>())
            .finish()
    }
}

impl<E: DocumentEntity> DocumentRepository<E> {
    /// Create a repository over `store`.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    /// Find a document by id.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<E>> {
        self.store
            .find_one(E::KIND, id)
            .await?
            .map(document::from_document)
            .transpose()
    }

    /// Find every document matching `predicate`.
    pub async fn find_many(&self, predicate: &Predicate) -> AppResult<Vec<E>> {
        self.store
            .find_many(E::KIND, predicate)
            .await?
            .into_iter()
            .map(document::from_document)
            .collect()
    }

    /// Find the first document matching `predicate`, if any.
    pub async fn find_first(&self, predicate: &Predicate) -> AppResult<Option<E>> {
        Ok(self.find_many(predicate).await?.into_iter().next())
    }

    /// Whether a document with `id` exists.
    pub async fn exists(&self, id: &str) -> AppResult<bool> {
        Ok(self.store.find_one(E::KIND, id).await?.is_some())
    }

    /// Insert a new document.
    pub async fn create(&self, entity: &E) -> AppResult<()> {
        let doc = document::to_document(entity)?;
        self.store.insert(E::KIND, entity.document_id(), doc).await
    }

    /// Overwrite top-level fields and bump `updated_at`.
    ///
    /// Fails with a not-found error when the document does not exist.
    pub async fn patch(&self, id: &str, mut fields: Document) -> AppResult<()> {
        fields.insert(UPDATED_AT.to_string(), serde_json::to_value(Utc::now())?);
        if self.store.update_fields(E::KIND, id, fields).await? {
            Ok(())
        } else {
            Err(AppError::not_found(format!("{} {id} not found", E::KIND)))
        }
    }

    /// Physically delete a document. Returns `false` when it did not exist.
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        self.store.delete_one(E::KIND, id).await
    }

    /// Add `value` to the set in `field`. Returns `false` when the document
    /// does not exist.
    pub async fn add_to_set(&self, id: &str, field: &str, value: &str) -> AppResult<bool> {
        self.store.add_to_set(E::KIND, id, field, value).await
    }

    /// Remove `value` from the set in `field`. Returns `false` when the
    /// document does not exist.
    pub async fn remove_from_set(&self, id: &str, field: &str, value: &str) -> AppResult<bool> {
        self.store.remove_from_set(E::KIND, id, field, value).await
    }
}

/// Build a one-field patch document.
pub(crate) fn single_field(field: &str, value: Value) -> Document {
    let mut doc = Document::new();
    doc.insert(field.to_string(), value);
    doc
}
