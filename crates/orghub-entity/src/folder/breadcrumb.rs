//! Breadcrumb navigation items.

use serde::{Deserialize, Serialize};

use orghub_core::types::FolderId;

/// One step of a root-to-folder path. The synthetic root has no id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbItem {
    /// Folder id, `None` for the synthetic root.
    pub id: Option<FolderId>,
    /// Display name.
    pub name: String,
}

impl BreadcrumbItem {
    /// The synthetic root entry.
    pub fn root(label: impl Into<String>) -> Self {
        Self {
            id: None,
            name: label.into(),
        }
    }
}
