//! In-memory document store using dashmap.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::Value;
use tracing::debug;

use orghub_core::error::AppError;
use orghub_core::result::AppResult;
use orghub_core::traits::DocumentStore;
use orghub_core::types::{Document, ID_FIELD, Predicate, ResourceKind};

/// Process-local document store.
///
/// Each document sits behind its dashmap shard lock, so set operations on a
/// single document are atomic. Nothing spans documents.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    documents: Arc<DashMap<(ResourceKind, String), Document>>,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents held for `kind`.
    pub fn count(&self, kind: ResourceKind) -> usize {
        self.documents.iter().filter(|e| e.key().0 == kind).count()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn backend(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn find_many(
        &self,
        kind: ResourceKind,
        predicate: &Predicate,
    ) -> AppResult<Vec<Document>> {
        if predicate.is_deny_all() {
            return Ok(Vec::new());
        }

        let docs: Vec<Document> = self
            .documents
            .iter()
            .filter(|entry| entry.key().0 == kind && predicate.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();

        debug!(collection = kind.collection(), matched = docs.len(), "find_many");
        Ok(docs)
    }

    async fn find_one(&self, kind: ResourceKind, id: &str) -> AppResult<Option<Document>> {
        Ok(self
            .documents
            .get(&(kind, id.to_string()))
            .map(|doc| doc.value().clone()))
    }

    async fn insert(&self, kind: ResourceKind, id: &str, mut doc: Document) -> AppResult<()> {
        match self.documents.entry((kind, id.to_string())) {
            Entry::Occupied(_) => Err(AppError::validation(format!(
                "A {kind} with id {id} already exists"
            ))),
            Entry::Vacant(slot) => {
                doc.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
                slot.insert(doc);
                Ok(())
            }
        }
    }

    async fn update_fields(
        &self,
        kind: ResourceKind,
        id: &str,
        partial: Document,
    ) -> AppResult<bool> {
        let Some(mut doc) = self.documents.get_mut(&(kind, id.to_string())) else {
            return Ok(false);
        };
        for (field, value) in partial {
            if field != ID_FIELD {
                doc.insert(field, value);
            }
        }
        Ok(true)
    }

    async fn delete_one(&self, kind: ResourceKind, id: &str) -> AppResult<bool> {
        Ok(self.documents.remove(&(kind, id.to_string())).is_some())
    }

    async fn add_to_set(
        &self,
        kind: ResourceKind,
        id: &str,
        field: &str,
        value: &str,
    ) -> AppResult<bool> {
        let Some(mut doc) = self.documents.get_mut(&(kind, id.to_string())) else {
            return Ok(false);
        };
        let slot = doc
            .entry(field.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if !slot.is_array() {
            *slot = Value::Array(Vec::new());
        }
        if let Value::Array(members) = slot {
            if !members.iter().any(|m| m.as_str() == Some(value)) {
                members.push(Value::String(value.to_string()));
            }
        }
        Ok(true)
    }

    async fn remove_from_set(
        &self,
        kind: ResourceKind,
        id: &str,
        field: &str,
        value: &str,
    ) -> AppResult<bool> {
        let Some(mut doc) = self.documents.get_mut(&(kind, id.to_string())) else {
            return Ok(false);
        };
        if let Some(Value::Array(members)) = doc.get_mut(field) {
            members.retain(|m| m.as_str() != Some(value));
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orghub_core::types::FilterField;
    use serde_json::json;

    const ID: &str = "507f1f77bcf86cd799439011";

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_insert_stamps_id_and_rejects_duplicates() {
        let store = MemoryDocumentStore::new();
        store
            .insert(ResourceKind::Folder, ID, doc(json!({"name": "a"})))
            .await
            .expect("insert");

        let found = store.find_one(ResourceKind::Folder, ID).await.unwrap().unwrap();
        assert_eq!(found["id"], ID);

        let err = store
            .insert(ResourceKind::Folder, ID, doc(json!({"name": "b"})))
            .await
            .expect_err("duplicate");
        assert_eq!(err.kind, orghub_core::error::ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = MemoryDocumentStore::new();
        store
            .insert(ResourceKind::Company, ID, doc(json!({"name": "acme"})))
            .await
            .unwrap();
        assert!(store.find_one(ResourceKind::Holding, ID).await.unwrap().is_none());
        assert_eq!(store.count(ResourceKind::Company), 1);
    }

    #[tokio::test]
    async fn test_set_semantics() {
        let store = MemoryDocumentStore::new();
        store
            .insert(ResourceKind::Folder, ID, doc(json!({"foldersids": []})))
            .await
            .unwrap();

        for _ in 0..2 {
            assert!(store.add_to_set(ResourceKind::Folder, ID, "foldersids", "x").await.unwrap());
        }
        store.add_to_set(ResourceKind::Folder, ID, "fileIds", "f").await.unwrap();

        let found = store.find_one(ResourceKind::Folder, ID).await.unwrap().unwrap();
        assert_eq!(found["foldersids"], json!(["x"]));
        assert_eq!(found["fileIds"], json!(["f"]));

        store.remove_from_set(ResourceKind::Folder, ID, "foldersids", "x").await.unwrap();
        let found = store.find_one(ResourceKind::Folder, ID).await.unwrap().unwrap();
        assert_eq!(found["foldersids"], json!([]));

        assert!(!store.add_to_set(ResourceKind::Folder, "missing", "foldersids", "x").await.unwrap());
    }

    #[tokio::test]
    async fn test_find_many_and_deny_all() {
        let store = MemoryDocumentStore::new();
        store
            .insert(ResourceKind::Department, ID, doc(json!({"company_id": "c1"})))
            .await
            .unwrap();

        let hit = Predicate::field(FilterField::eq("company_id", "c1"));
        assert_eq!(store.find_many(ResourceKind::Department, &hit).await.unwrap().len(), 1);
        assert!(store
            .find_many(ResourceKind::Department, &Predicate::deny_all())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_update_fields_keeps_id() {
        let store = MemoryDocumentStore::new();
        store
            .insert(ResourceKind::File, ID, doc(json!({"filename": "a.pdf"})))
            .await
            .unwrap();
        let updated = store
            .update_fields(ResourceKind::File, ID, doc(json!({"filename": "b.pdf", "id": "zzz"})))
            .await
            .unwrap();
        assert!(updated);
        let found = store.find_one(ResourceKind::File, ID).await.unwrap().unwrap();
        assert_eq!(found["filename"], "b.pdf");
        assert_eq!(found["id"], ID);
        assert!(!store.delete_one(ResourceKind::File, "nope").await.unwrap());
    }
}
