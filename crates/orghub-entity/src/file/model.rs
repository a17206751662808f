//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orghub_core::types::{FileId, FolderId, ResourceKind};

use crate::DocumentEntity;
use crate::context::OrgContext;

/// A file leaf in the knowledge-base tree. The bytes live in object
/// storage under `file_key`; only metadata is kept here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    /// Unique file identifier.
    pub id: FileId,
    /// The file name (including extension).
    pub filename: String,
    /// Object storage key.
    pub file_key: String,
    /// MIME type.
    pub file_type: String,
    /// File size in bytes.
    pub file_size: i64,
    /// The folder containing this file (null for root files).
    #[serde(default)]
    pub folder_id: Option<FolderId>,
    /// Organizational context inherited at creation time.
    #[serde(flatten)]
    pub context: OrgContext,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
    /// When the file was last updated.
    pub updated_at: DateTime<Utc>,
}

impl File {
    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.filename
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.filename)
            .map(|ext| ext.to_lowercase())
    }
}

impl DocumentEntity for File {
    const KIND: ResourceKind = ResourceKind::File;

    fn document_id(&self) -> &str {
        self.id.as_str()
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// The file name.
    pub filename: String,
    /// Object storage key.
    pub file_key: String,
    /// MIME type.
    pub file_type: String,
    /// File size in bytes.
    pub file_size: i64,
    /// The folder to place the file in.
    pub folder_id: Option<FolderId>,
    /// Context to stamp on the file.
    pub context: OrgContext,
    /// Free-text description.
    pub description: String,
    /// Free-form tags.
    pub tags: Vec<String>,
}

impl CreateFile {
    /// Build the document to insert.
    pub fn into_file(self) -> File {
        let now = Utc::now();
        File {
            id: FileId::new(),
            filename: self.filename,
            file_key: self.file_key,
            file_type: self.file_type,
            file_size: self.file_size,
            folder_id: self.folder_id,
            context: self.context,
            description: self.description,
            tags: self.tags,
            created_at: now,
            updated_at: now,
        }
    }
}
