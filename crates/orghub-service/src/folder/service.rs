//! Folder CRUD, move, and cascading delete with scope enforcement.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::Validate;

use orghub_auth::{AccessFilterEngine, AccessHints};
use orghub_core::error::AppError;
use orghub_core::result::AppResult;
use orghub_core::traits::DocumentStore;
use orghub_core::types::{FilterField, FolderId, ID_FIELD, ResourceKind};
use orghub_database::repositories::{FileRepository, FolderRepository};
use orghub_entity::folder::model::DEFAULT_FOLDER_TYPE;
use orghub_entity::folder::{CreateFolder, Folder, fields};

use crate::context::RequestContext;
use crate::validation::{normalize_name, parse_optional, validate_request};

/// Request to create a folder.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Parent folder ID (None for root-level).
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Folder type tag (defaults to `documents`).
    #[serde(default)]
    pub folder_type: Option<String>,
}

/// Request to rename a folder or file.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameRequest {
    /// New name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

/// Request to move a folder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoveFolderRequest {
    /// New parent folder ID (None moves the folder to the root).
    #[serde(default)]
    pub new_parent_id: Option<String>,
}

/// Outcome of a cascading folder delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteReport {
    /// Folders removed, the target included.
    pub folders_deleted: u64,
    /// Files removed from those folders.
    pub files_deleted: u64,
}

/// Manages folder nodes of the knowledge-base tree.
///
/// Every mutation is a sequence of single-document writes; the parent's
/// `foldersids` set and the child's `parentID` are updated separately.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder repository.
    folders: FolderRepository,
    /// File repository.
    files: FileRepository,
    /// Access engine.
    access: Arc<AccessFilterEngine>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(store: Arc<dyn DocumentStore>, access: Arc<AccessFilterEngine>) -> Self {
        Self {
            folders: FolderRepository::new(Arc::clone(&store)),
            files: FileRepository::new(store),
            access,
        }
    }

    /// Gets a folder, or `None` when it is missing or out of scope.
    pub async fn get_folder(&self, ctx: &RequestContext, id: &str) -> AppResult<Option<Folder>> {
        let id = FolderId::parse(id)?;
        let predicate = self
            .access
            .filter(&ctx.scope, ResourceKind::Folder)
            .and(FilterField::eq(ID_FIELD, id.as_str()));
        self.folders.find_first(&predicate).await
    }

    /// Lists every folder visible to the requester, newest first.
    pub async fn list_folders(&self, ctx: &RequestContext) -> AppResult<Vec<Folder>> {
        let predicate = self.access.filter(&ctx.scope, ResourceKind::Folder);
        let mut folders = self.folders.find_many(&predicate).await?;
        newest_first(&mut folders);
        Ok(folders)
    }

    /// Lists the visible direct children of `parent_id` (root folders when
    /// `None`), newest first.
    pub async fn list_children(
        &self,
        ctx: &RequestContext,
        parent_id: Option<&str>,
    ) -> AppResult<Vec<Folder>> {
        let parent_id = parse_optional(parent_id, FolderId::parse)?;
        let predicate = self
            .access
            .filter(&ctx.scope, ResourceKind::Folder)
            .and(FilterField::eq_opt(
                fields::PARENT_ID,
                parent_id.as_ref().map(FolderId::as_str),
            ));
        let mut folders = self.folders.find_many(&predicate).await?;
        newest_first(&mut folders);
        Ok(folders)
    }

    /// Creates a folder.
    ///
    /// The folder inherits the parent's org context, or the requester's
    /// when created at the root.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        req: CreateFolderRequest,
    ) -> AppResult<Folder> {
        validate_request(&req)?;
        let name = normalize_name(&req.name, "Folder")?;
        let parent_id = parse_optional(req.parent_id.as_deref(), FolderId::parse)?;

        let context = match &parent_id {
            Some(parent_id) => self.require_folder(ctx, parent_id).await?.context,
            None => ctx.org_context()?,
        };

        if self
            .folders
            .find_sibling_by_name(parent_id.as_ref(), &context, &name, None)
            .await?
            .is_some()
        {
            return Err(AppError::validation(format!(
                "A folder named '{name}' already exists here"
            )));
        }

        let folder = CreateFolder {
            name,
            folder_type: req
                .folder_type
                .unwrap_or_else(|| DEFAULT_FOLDER_TYPE.to_string()),
            parent_id: parent_id.clone(),
            context,
        }
        .into_folder();
        self.folders.create(&folder).await?;

        if let Some(parent_id) = &parent_id {
            self.folders.link_child(parent_id, &folder.id).await?;
        }

        info!(
            user_id = %ctx.actor(),
            folder_id = %folder.id,
            parent_id = ?folder.parent_id.as_ref().map(FolderId::as_str),
            name = %folder.name,
            "Folder created"
        );
        Ok(folder)
    }

    /// Renames a folder. Uniqueness is checked among its current siblings.
    pub async fn rename_folder(
        &self,
        ctx: &RequestContext,
        id: &str,
        req: RenameRequest,
    ) -> AppResult<Folder> {
        validate_request(&req)?;
        let id = FolderId::parse(id)?;
        let name = normalize_name(&req.name, "Folder")?;
        let folder = self.require_folder(ctx, &id).await?;

        if self
            .folders
            .find_sibling_by_name(folder.parent_id.as_ref(), &folder.context, &name, Some(&id))
            .await?
            .is_some()
        {
            return Err(AppError::validation(format!(
                "A folder named '{name}' already exists here"
            )));
        }

        self.folders.rename(&id, &name).await?;
        info!(user_id = %ctx.actor(), folder_id = %id, name = %name, "Folder renamed");
        self.reload(&id).await
    }

    /// Moves a folder under a new parent, or to the root.
    ///
    /// The folder keeps its org context. Only direct self-parenting is
    /// rejected; moving a folder under one of its own descendants is
    /// accepted.
    pub async fn move_folder(
        &self,
        ctx: &RequestContext,
        id: &str,
        req: MoveFolderRequest,
    ) -> AppResult<Folder> {
        let id = FolderId::parse(id)?;
        let new_parent_id = parse_optional(req.new_parent_id.as_deref(), FolderId::parse)?;

        let folder = self.require_folder(ctx, &id).await?;
        if new_parent_id.as_ref() == Some(&id) {
            return Err(AppError::structural("Cannot move a folder into itself"));
        }
        if let Some(new_parent_id) = &new_parent_id {
            self.require_folder(ctx, new_parent_id).await?;
        }

        if let Some(old_parent_id) = &folder.parent_id {
            if !self.folders.unlink_child(old_parent_id, &id).await? {
                warn!(
                    folder_id = %id,
                    parent_id = %old_parent_id,
                    "Previous parent folder is missing; nothing to unlink"
                );
            }
        }
        if let Some(new_parent_id) = &new_parent_id {
            self.folders.link_child(new_parent_id, &id).await?;
        }
        self.folders.set_parent(&id, new_parent_id.as_ref()).await?;

        info!(
            user_id = %ctx.actor(),
            folder_id = %id,
            from = ?folder.parent_id.as_ref().map(FolderId::as_str),
            to = ?new_parent_id.as_ref().map(FolderId::as_str),
            "Folder moved"
        );
        self.reload(&id).await
    }

    /// Deletes a folder with all of its subfolders and their files.
    ///
    /// The subtree is walked with an explicit worklist. Descendants are
    /// removed before their ancestors and each folder's files before the
    /// folder itself. The writes are independent: a failure part way leaves
    /// the already-deleted part deleted.
    pub async fn delete_folder(&self, ctx: &RequestContext, id: &str) -> AppResult<DeleteReport> {
        let id = FolderId::parse(id)?;
        let root = self.require_folder(ctx, &id).await?;

        let order = self.collect_subtree(&root.id).await?;
        let mut report = DeleteReport::default();

        if let Err(e) = self.delete_in_order(&root, &order, &mut report).await {
            warn!(
                folder_id = %id,
                folders_deleted = report.folders_deleted,
                files_deleted = report.files_deleted,
                error = %e,
                "Folder delete aborted part way"
            );
            return Err(e);
        }

        info!(
            user_id = %ctx.actor(),
            folder_id = %id,
            folders_deleted = report.folders_deleted,
            files_deleted = report.files_deleted,
            "Folder deleted"
        );
        Ok(report)
    }

    /// Pre-order list of the subtree rooted at `root`, following `parentID`
    /// references. Each folder appears once even if the references loop.
    async fn collect_subtree(&self, root: &FolderId) -> AppResult<Vec<FolderId>> {
        let mut visited: HashSet<FolderId> = HashSet::new();
        let mut order = Vec::new();
        let mut worklist = vec![root.clone()];

        while let Some(current) = worklist.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }
            for child in self.folders.find_children(Some(&current)).await? {
                if !visited.contains(&child.id) {
                    worklist.push(child.id);
                }
            }
            order.push(current);
        }
        Ok(order)
    }

    async fn delete_in_order(
        &self,
        root: &Folder,
        order: &[FolderId],
        report: &mut DeleteReport,
    ) -> AppResult<()> {
        // Reverse pre-order puts every folder after its descendants.
        for folder_id in order.iter().rev() {
            for file in self.files.find_in_folder(Some(folder_id)).await? {
                if self.files.delete(file.id.as_str()).await? {
                    report.files_deleted += 1;
                }
            }

            if *folder_id == root.id {
                if let Some(parent_id) = &root.parent_id {
                    self.folders.unlink_child(parent_id, &root.id).await?;
                }
            }

            if self.folders.delete(folder_id.as_str()).await? {
                report.folders_deleted += 1;
            }
        }
        Ok(())
    }

    /// Authorize the requester for `id` and load the folder.
    async fn require_folder(&self, ctx: &RequestContext, id: &FolderId) -> AppResult<Folder> {
        self.access
            .validate_access(&ctx.scope, ResourceKind::Folder, id.as_str(), &AccessHints::none())
            .await?;
        self.reload(id).await
    }

    async fn reload(&self, id: &FolderId) -> AppResult<Folder> {
        self.folders
            .find_by_id(id.as_str())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
    }
}

fn newest_first(folders: &mut [Folder]) {
    folders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
