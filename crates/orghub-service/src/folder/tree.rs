//! Folder tree building and breadcrumb path resolution.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use tracing::debug;

use orghub_auth::AccessFilterEngine;
use orghub_core::config::TreeConfig;
use orghub_core::error::AppError;
use orghub_core::result::AppResult;
use orghub_core::traits::DocumentStore;
use orghub_core::types::{FilterField, FolderId, ID_FIELD, ResourceKind};
use orghub_database::repositories::{FileRepository, FolderRepository};
use orghub_entity::folder::{BreadcrumbItem, Folder, FolderNode, fields};

use crate::context::RequestContext;

/// Builds folder trees and resolves breadcrumb paths.
#[derive(Debug, Clone)]
pub struct TreeService {
    /// Folder repository.
    folders: FolderRepository,
    /// File repository.
    files: FileRepository,
    /// Access engine.
    access: Arc<AccessFilterEngine>,
    /// Traversal limits.
    config: TreeConfig,
}

impl TreeService {
    /// Creates a new tree service.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        access: Arc<AccessFilterEngine>,
        config: TreeConfig,
    ) -> Self {
        Self {
            folders: FolderRepository::new(Arc::clone(&store)),
            files: FileRepository::new(store),
            access,
            config,
        }
    }

    /// The root-to-folder breadcrumb trail, starting with the synthetic
    /// root entry.
    ///
    /// Returns `None` when the folder is missing or out of scope. Ancestors
    /// are followed without a scope check; the trail of a visible folder is
    /// always shown in full. A parent chain longer than `max_depth`, or one
    /// that revisits a folder, is a structural error.
    pub async fn get_path(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> AppResult<Option<Vec<BreadcrumbItem>>> {
        let Some(folder) = self.visible_folder(ctx, id).await? else {
            return Ok(None);
        };

        let mut seen: HashSet<FolderId> = HashSet::from([folder.id.clone()]);
        let mut trail = vec![BreadcrumbItem {
            id: Some(folder.id.clone()),
            name: folder.name.clone(),
        }];

        let mut next = folder.parent_id.clone();
        while let Some(parent_id) = next {
            if trail.len() > self.config.max_depth {
                return Err(AppError::structural(format!(
                    "Folder {} is nested deeper than {} levels",
                    folder.id, self.config.max_depth
                )));
            }
            if !seen.insert(parent_id.clone()) {
                return Err(AppError::structural(format!(
                    "Folder {} has a cyclic parent chain at {parent_id}",
                    folder.id
                )));
            }

            // A dangling parent reference ends the trail at the last live folder.
            let Some(parent) = self.folders.find_by_id(parent_id.as_str()).await? else {
                debug!(folder_id = %folder.id, parent_id = %parent_id, "Dangling parent reference");
                break;
            };
            trail.push(BreadcrumbItem {
                id: Some(parent.id),
                name: parent.name,
            });
            next = parent.parent_id;
        }

        trail.push(BreadcrumbItem::root(self.config.root_label.clone()));
        trail.reverse();
        Ok(Some(trail))
    }

    /// Builds the folder tree under `id` with per-folder file counts.
    ///
    /// Only descendants visible to the requester are included. Returns
    /// `None` when the root is missing or out of scope.
    pub async fn get_tree(&self, ctx: &RequestContext, id: &str) -> AppResult<Option<FolderNode>> {
        let Some(root) = self.visible_folder(ctx, id).await? else {
            return Ok(None);
        };
        let scope_filter = self.access.filter(&ctx.scope, ResourceKind::Folder);

        let mut visited: HashSet<FolderId> = HashSet::from([root.id.clone()]);
        let mut children: HashMap<FolderId, Vec<Folder>> = HashMap::new();
        let mut file_counts: HashMap<FolderId, u64> = HashMap::new();
        let mut queue = VecDeque::from([root.id.clone()]);

        while let Some(current) = queue.pop_front() {
            let count = self.files.find_in_folder(Some(&current)).await?.len();
            file_counts.insert(current.clone(), count as u64);

            let predicate = scope_filter
                .clone()
                .and(FilterField::eq(fields::PARENT_ID, current.as_str()));
            let mut level = self.folders.find_many(&predicate).await?;
            level.retain(|child| visited.insert(child.id.clone()));
            level.sort_by(|a, b| a.name.cmp(&b.name));

            queue.extend(level.iter().map(|child| child.id.clone()));
            children.insert(current, level);
        }

        debug!(
            folder_id = %root.id,
            folders = visited.len(),
            "Built folder tree"
        );
        Ok(Some(build_tree(root, &mut children, &file_counts)))
    }

    async fn visible_folder(&self, ctx: &RequestContext, id: &str) -> AppResult<Option<Folder>> {
        let id = FolderId::parse(id)?;
        let predicate = self
            .access
            .filter(&ctx.scope, ResourceKind::Folder)
            .and(FilterField::eq(ID_FIELD, id.as_str()));
        self.folders.find_first(&predicate).await
    }
}

/// Assembles the nested node for `folder` from the breadth-first levels.
///
/// Each folder appears under exactly one parent in `children`, so the
/// recursion is bounded by the number of collected folders.
fn build_tree(
    folder: Folder,
    children: &mut HashMap<FolderId, Vec<Folder>>,
    file_counts: &HashMap<FolderId, u64>,
) -> FolderNode {
    let nested = children
        .remove(&folder.id)
        .unwrap_or_default()
        .into_iter()
        .map(|child| build_tree(child, children, file_counts))
        .collect();

    FolderNode {
        file_count: file_counts.get(&folder.id).copied().unwrap_or(0),
        id: folder.id,
        name: folder.name,
        children: nested,
    }
}
