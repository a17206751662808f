//! # orghub-service
//!
//! Business logic service layer for OrgHub. Services resolve nothing
//! themselves: every call receives a [`RequestContext`] carrying the scope
//! of the acting principal, lists through the scope's predicate, and
//! authorizes mutations through the access engine before the first write.
//!
//! Services follow constructor injection; all of them share one
//! `Arc<dyn DocumentStore>`.

pub mod context;
pub mod file;
pub mod folder;
pub mod org;
pub mod registry;
pub mod user;
pub mod validation;

pub use context::RequestContext;
pub use file::FileService;
pub use folder::{DeleteReport, FolderService, TreeService};
pub use org::{OrgHierarchyValidator, OrgService};
pub use registry::Services;
pub use user::UserService;
