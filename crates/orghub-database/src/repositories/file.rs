//! File repository.

use serde_json::{Value, json};

use orghub_core::result::AppResult;
use orghub_core::types::{FileId, FilterField, FolderId, ID_FIELD, Predicate};
use orghub_entity::OrgContext;
use orghub_entity::file::File;
use orghub_entity::file::fields;
use orghub_entity::folder::fields as folder_fields;

use super::{DocumentRepository, FolderRepository, single_field};

/// Repository for file documents.
pub type FileRepository = DocumentRepository<File>;

impl FileRepository {
    /// Files directly inside `folder_id` (root files when `None`).
    pub async fn find_in_folder(&self, folder_id: Option<&FolderId>) -> AppResult<Vec<File>> {
        self.find_many(&Predicate::field(FilterField::eq_opt(
            fields::FOLDER_ID,
            folder_id.map(FolderId::as_str),
        )))
        .await
    }

    /// A file named exactly `filename` in the same folder and context,
    /// ignoring `exclude`.
    pub async fn find_sibling_by_name(
        &self,
        folder_id: Option<&FolderId>,
        context: &OrgContext,
        filename: &str,
        exclude: Option<&FileId>,
    ) -> AppResult<Option<File>> {
        let mut predicate = context
            .exact_match()
            .and(FilterField::eq_opt(
                fields::FOLDER_ID,
                folder_id.map(FolderId::as_str),
            ))
            .and(FilterField::eq(fields::FILENAME, filename));
        if let Some(exclude) = exclude {
            predicate = predicate.and(FilterField::ne(ID_FIELD, exclude.as_str()));
        }
        self.find_first(&predicate).await
    }

    /// Rename a file.
    pub async fn rename(&self, id: &FileId, filename: &str) -> AppResult<()> {
        self.patch(id.as_str(), single_field(fields::FILENAME, json!(filename)))
            .await
    }

    /// Point a file at a new folder (root when `None`).
    pub async fn set_folder(&self, id: &FileId, folder_id: Option<&FolderId>) -> AppResult<()> {
        let folder = folder_id.map_or(Value::Null, |f| json!(f.as_str()));
        self.patch(id.as_str(), single_field(fields::FOLDER_ID, folder))
            .await
    }
}

impl FolderRepository {
    /// Register `file` in the folder's `fileIds` mirror set.
    pub async fn link_file(&self, folder_id: &FolderId, file: &FileId) -> AppResult<bool> {
        self.add_to_set(folder_id.as_str(), folder_fields::FILE_IDS, file.as_str())
            .await
    }

    /// Drop `file` from the folder's `fileIds` mirror set.
    pub async fn unlink_file(&self, folder_id: &FolderId, file: &FileId) -> AppResult<bool> {
        self.remove_from_set(folder_id.as_str(), folder_fields::FILE_IDS, file.as_str())
            .await
    }
}
