//! Raw document representation exchanged with the store.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// A schemaless document: a JSON object keyed by field name.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Field under which every document stores its own identifier.
pub const ID_FIELD: &str = "id";

/// Serialize an entity into a document.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, AppError> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(AppError::internal(format!(
            "Expected an object when serializing a document, got {other}"
        ))),
    }
}

/// Deserialize a document into an entity.
pub fn from_document<T: DeserializeOwned>(doc: Document) -> Result<T, AppError> {
    Ok(serde_json::from_value(serde_json::Value::Object(doc))?)
}

/// Read the identifier stored inside a document.
pub fn document_id(doc: &Document) -> Option<&str> {
    doc.get(ID_FIELD).and_then(|v| v.as_str())
}
