//! Service wiring shared by every entry point.

use std::sync::Arc;

use orghub_auth::AccessFilterEngine;
use orghub_core::config::TreeConfig;
use orghub_core::traits::DocumentStore;

use crate::file::FileService;
use crate::folder::{FolderService, TreeService};
use crate::org::OrgService;
use crate::user::UserService;

/// Every service, built over one store and one access engine.
///
/// Cloning is cheap; all fields are `Arc`-wrapped.
#[derive(Debug, Clone)]
pub struct Services {
    // ── Auth ─────────────────────────────────────────────────
    /// Scope predicates and point checks
    pub access: Arc<AccessFilterEngine>,

    // ── Org hierarchy ────────────────────────────────────────
    /// Holdings, companies, and departments
    pub org: Arc<OrgService>,
    /// Users
    pub users: Arc<UserService>,

    // ── Knowledge-base tree ──────────────────────────────────
    /// Folder CRUD, move, and delete
    pub folders: Arc<FolderService>,
    /// File metadata
    pub files: Arc<FileService>,
    /// Breadcrumbs and nested trees
    pub tree: Arc<TreeService>,
}

impl Services {
    /// Wire all services over `store`.
    pub fn new(store: Arc<dyn DocumentStore>, tree: &TreeConfig) -> Self {
        let access = Arc::new(AccessFilterEngine::new(Arc::clone(&store)));

        Self {
            org: Arc::new(OrgService::new(Arc::clone(&store), Arc::clone(&access))),
            users: Arc::new(UserService::new(Arc::clone(&store), Arc::clone(&access))),
            folders: Arc::new(FolderService::new(Arc::clone(&store), Arc::clone(&access))),
            files: Arc::new(FileService::new(Arc::clone(&store), Arc::clone(&access))),
            tree: Arc::new(TreeService::new(store, Arc::clone(&access), tree.clone())),
            access,
        }
    }
}
