//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orghub_core::types::{FileId, FolderId, ResourceKind};

use crate::DocumentEntity;
use crate::context::OrgContext;

/// Default folder type for knowledge-base folders.
pub const DEFAULT_FOLDER_TYPE: &str = "documents";

/// A folder in the knowledge-base tree.
///
/// `folder_ids` and `file_ids` mirror the children's back references and
/// must be kept in step with them by every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Folder type tag.
    #[serde(rename = "type", default = "default_folder_type")]
    pub folder_type: String,
    /// Parent folder ID (null for root folders).
    #[serde(rename = "parentID", default)]
    pub parent_id: Option<FolderId>,
    /// Files directly inside this folder.
    #[serde(rename = "fileIds", default)]
    pub file_ids: Vec<FileId>,
    /// Folders directly inside this folder.
    #[serde(rename = "foldersids", default)]
    pub folder_ids: Vec<FolderId>,
    /// Organizational context inherited at creation time.
    #[serde(flatten)]
    pub context: OrgContext,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is a root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

impl DocumentEntity for Folder {
    const KIND: ResourceKind = ResourceKind::Folder;

    fn document_id(&self) -> &str {
        self.id.as_str()
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Folder name.
    pub name: String,
    /// Folder type tag.
    pub folder_type: String,
    /// Parent folder (None for root).
    pub parent_id: Option<FolderId>,
    /// Context to stamp on the folder.
    pub context: OrgContext,
}

impl CreateFolder {
    /// Build the document to insert.
    pub fn into_folder(self) -> Folder {
        let now = Utc::now();
        Folder {
            id: FolderId::new(),
            name: self.name,
            folder_type: self.folder_type,
            parent_id: self.parent_id,
            file_ids: Vec::new(),
            folder_ids: Vec::new(),
            context: self.context,
            created_at: now,
            updated_at: now,
        }
    }
}

fn default_folder_type() -> String {
    DEFAULT_FOLDER_TYPE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use orghub_core::types::DepartmentId;

    #[test]
    fn test_persisted_field_names() {
        let folder = CreateFolder {
            name: "Reports".into(),
            folder_type: DEFAULT_FOLDER_TYPE.into(),
            parent_id: None,
            context: OrgContext::new(None, None, Some(DepartmentId::new())),
        }
        .into_folder();

        let json = serde_json::to_value(&folder).expect("serialize");
        assert!(json.get("parentID").expect("parentID present").is_null());
        assert!(json.get("foldersids").expect("foldersids").is_array());
        assert!(json.get("fileIds").expect("fileIds").is_array());
        assert_eq!(json["type"], "documents");
        assert!(json["holding_id"].is_null());
        assert!(json["department_id"].is_string());

        let back: Folder = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, folder);
    }
}
