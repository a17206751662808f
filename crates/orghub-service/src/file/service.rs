//! File metadata CRUD with scope enforcement.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::Validate;

use orghub_auth::{AccessFilterEngine, AccessHints};
use orghub_core::error::AppError;
use orghub_core::result::AppResult;
use orghub_core::traits::DocumentStore;
use orghub_core::types::{FileId, FilterField, FolderId, ID_FIELD, ResourceKind};
use orghub_database::repositories::{FileRepository, FolderRepository};
use orghub_entity::file::{CreateFile, File};
use orghub_entity::folder::Folder;

use crate::context::RequestContext;
use crate::folder::RenameRequest;
use crate::validation::{normalize_name, normalize_optional, parse_optional, validate_request};

/// Request to register an uploaded file.
///
/// The bytes already live in object storage under `file_key`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterFileRequest {
    /// File name, extension included.
    #[validate(length(min = 1, max = 255))]
    pub filename: String,
    /// Containing folder (None for root files).
    #[serde(default)]
    pub folder_id: Option<String>,
    /// Object storage key.
    #[validate(length(min = 1))]
    pub file_key: String,
    /// MIME type.
    pub file_type: String,
    /// Size in bytes.
    #[validate(range(min = 0))]
    pub file_size: i64,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request to move a file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoveFileRequest {
    /// Target folder ID (None moves the file to the root).
    #[serde(default)]
    pub folder_id: Option<String>,
}

/// Manages file leaves of the knowledge-base tree.
///
/// A file's `folder_id` and the folder's `fileIds` set are written
/// separately, like their folder counterparts.
#[derive(Debug, Clone)]
pub struct FileService {
    /// File repository.
    files: FileRepository,
    /// Folder repository (for parent lookups and the `fileIds` set).
    folders: FolderRepository,
    /// Access engine.
    access: Arc<AccessFilterEngine>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(store: Arc<dyn DocumentStore>, access: Arc<AccessFilterEngine>) -> Self {
        Self {
            files: FileRepository::new(Arc::clone(&store)),
            folders: FolderRepository::new(store),
            access,
        }
    }

    /// Gets a file, or `None` when it is missing or out of scope.
    pub async fn get_file(&self, ctx: &RequestContext, id: &str) -> AppResult<Option<File>> {
        let id = FileId::parse(id)?;
        let predicate = self
            .access
            .filter(&ctx.scope, ResourceKind::File)
            .and(FilterField::eq(ID_FIELD, id.as_str()));
        self.files.find_first(&predicate).await
    }

    /// Lists every file visible to the requester, newest first.
    pub async fn list_files(&self, ctx: &RequestContext) -> AppResult<Vec<File>> {
        let predicate = self.access.filter(&ctx.scope, ResourceKind::File);
        let mut files = self.files.find_many(&predicate).await?;
        files.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(files)
    }

    /// Records an uploaded file in a folder, or at the root.
    ///
    /// The file inherits the folder's org context, or the requester's at
    /// the root.
    pub async fn register_file(
        &self,
        ctx: &RequestContext,
        req: RegisterFileRequest,
    ) -> AppResult<File> {
        validate_request(&req)?;
        let filename = normalize_name(&req.filename, "File")?;
        let folder_id = parse_optional(req.folder_id.as_deref(), FolderId::parse)?;

        let context = match &folder_id {
            Some(folder_id) => self.require_folder(ctx, folder_id).await?.context,
            None => ctx.org_context()?,
        };

        if self
            .files
            .find_sibling_by_name(folder_id.as_ref(), &context, &filename, None)
            .await?
            .is_some()
        {
            return Err(AppError::validation(format!(
                "A file named '{filename}' already exists here"
            )));
        }

        let file = CreateFile {
            filename,
            file_key: req.file_key,
            file_type: req.file_type,
            file_size: req.file_size,
            folder_id: folder_id.clone(),
            context,
            description: normalize_optional(req.description).unwrap_or_default(),
            tags: req.tags,
        }
        .into_file();
        self.files.create(&file).await?;

        if let Some(folder_id) = &folder_id {
            self.folders.link_file(folder_id, &file.id).await?;
        }

        info!(
            user_id = %ctx.actor(),
            file_id = %file.id,
            folder_id = ?file.folder_id.as_ref().map(FolderId::as_str),
            size = file.file_size,
            "File registered"
        );
        Ok(file)
    }

    /// Renames a file. Uniqueness is checked within its current folder.
    pub async fn rename_file(
        &self,
        ctx: &RequestContext,
        id: &str,
        req: RenameRequest,
    ) -> AppResult<File> {
        validate_request(&req)?;
        let id = FileId::parse(id)?;
        let filename = normalize_name(&req.name, "File")?;
        let file = self.require_file(ctx, &id).await?;

        if self
            .files
            .find_sibling_by_name(file.folder_id.as_ref(), &file.context, &filename, Some(&id))
            .await?
            .is_some()
        {
            return Err(AppError::validation(format!(
                "A file named '{filename}' already exists here"
            )));
        }

        self.files.rename(&id, &filename).await?;
        info!(user_id = %ctx.actor(), file_id = %id, filename = %filename, "File renamed");
        self.reload(&id).await
    }

    /// Moves a file into another folder, or to the root. The file keeps its
    /// org context.
    pub async fn move_file(
        &self,
        ctx: &RequestContext,
        id: &str,
        req: MoveFileRequest,
    ) -> AppResult<File> {
        let id = FileId::parse(id)?;
        let target = parse_optional(req.folder_id.as_deref(), FolderId::parse)?;

        let file = self.require_file(ctx, &id).await?;
        if let Some(target) = &target {
            self.require_folder(ctx, target).await?;
        }

        if let Some(old_folder) = &file.folder_id {
            if !self.folders.unlink_file(old_folder, &id).await? {
                warn!(
                    file_id = %id,
                    folder_id = %old_folder,
                    "Previous folder is missing; nothing to unlink"
                );
            }
        }
        if let Some(target) = &target {
            self.folders.link_file(target, &id).await?;
        }
        self.files.set_folder(&id, target.as_ref()).await?;

        info!(
            user_id = %ctx.actor(),
            file_id = %id,
            from = ?file.folder_id.as_ref().map(FolderId::as_str),
            to = ?target.as_ref().map(FolderId::as_str),
            "File moved"
        );
        self.reload(&id).await
    }

    /// Deletes a file record and drops it from its folder's `fileIds`.
    pub async fn delete_file(&self, ctx: &RequestContext, id: &str) -> AppResult<()> {
        let id = FileId::parse(id)?;
        let file = self.require_file(ctx, &id).await?;

        if let Some(folder_id) = &file.folder_id {
            self.folders.unlink_file(folder_id, &id).await?;
        }
        self.files.delete(id.as_str()).await?;

        info!(
            user_id = %ctx.actor(),
            file_id = %id,
            file_key = %file.file_key,
            "File deleted"
        );
        Ok(())
    }

    async fn require_file(&self, ctx: &RequestContext, id: &FileId) -> AppResult<File> {
        self.access
            .validate_access(&ctx.scope, ResourceKind::File, id.as_str(), &AccessHints::none())
            .await?;
        self.reload(id).await
    }

    async fn require_folder(
        &self,
        ctx: &RequestContext,
        id: &FolderId,
    ) -> AppResult<Folder> {
        self.access
            .validate_access(&ctx.scope, ResourceKind::Folder, id.as_str(), &AccessHints::none())
            .await?;
        self.folders
            .find_by_id(id.as_str())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
    }

    async fn reload(&self, id: &FileId) -> AppResult<File> {
        self.files
            .find_by_id(id.as_str())
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }
}
