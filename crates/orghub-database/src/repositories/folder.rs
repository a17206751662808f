//! Folder repository.

use serde_json::{Value, json};

use orghub_core::result::AppResult;
use orghub_core::types::{FilterField, FolderId, ID_FIELD, Predicate};
use orghub_entity::OrgContext;
use orghub_entity::folder::Folder;
use orghub_entity::folder::fields;

use super::{DocumentRepository, single_field};

/// Repository for folder documents.
pub type FolderRepository = DocumentRepository<Folder>;

impl FolderRepository {
    /// Folders whose `parentID` is `parent_id` (roots when `None`).
    pub async fn find_children(&self, parent_id: Option<&FolderId>) -> AppResult<Vec<Folder>> {
        self.find_many(&Predicate::field(FilterField::eq_opt(
            fields::PARENT_ID,
            parent_id.map(FolderId::as_str),
        )))
        .await
    }

    /// A sibling named exactly `name` under the same parent and context,
    /// ignoring `exclude`.
    pub async fn find_sibling_by_name(
        &self,
        parent_id: Option<&FolderId>,
        context: &OrgContext,
        name: &str,
        exclude: Option<&FolderId>,
    ) -> AppResult<Option<Folder>> {
        let mut predicate = context
            .exact_match()
            .and(FilterField::eq_opt(
                fields::PARENT_ID,
                parent_id.map(FolderId::as_str),
            ))
            .and(FilterField::eq(fields::NAME, name));
        if let Some(exclude) = exclude {
            predicate = predicate.and(FilterField::ne(ID_FIELD, exclude.as_str()));
        }
        self.find_first(&predicate).await
    }

    /// Rename a folder.
    pub async fn rename(&self, id: &FolderId, name: &str) -> AppResult<()> {
        self.patch(id.as_str(), single_field(fields::NAME, json!(name)))
            .await
    }

    /// Point a folder at a new parent (root when `None`).
    pub async fn set_parent(&self, id: &FolderId, parent_id: Option<&FolderId>) -> AppResult<()> {
        let parent = parent_id.map_or(Value::Null, |p| json!(p.as_str()));
        self.patch(id.as_str(), single_field(fields::PARENT_ID, parent))
            .await
    }

    /// Register `child` in the parent's `foldersids` mirror set.
    pub async fn link_child(&self, parent_id: &FolderId, child: &FolderId) -> AppResult<bool> {
        self.add_to_set(parent_id.as_str(), fields::FOLDER_IDS, child.as_str())
            .await
    }

    /// Drop `child` from the parent's `foldersids` mirror set.
    pub async fn unlink_child(&self, parent_id: &FolderId, child: &FolderId) -> AppResult<bool> {
        self.remove_from_set(parent_id.as_str(), fields::FOLDER_IDS, child.as_str())
            .await
    }
}
