//! Folder domain entities.

pub mod breadcrumb;
pub mod model;
pub mod tree;

pub use breadcrumb::BreadcrumbItem;
pub use model::{CreateFolder, Folder};
pub use tree::FolderNode;

/// Field names of folder documents.
pub mod fields {
    /// Folder name.
    pub const NAME: &str = "name";
    /// Parent folder reference (null for root folders).
    pub const PARENT_ID: &str = "parentID";
    /// Mirror set of child folder ids.
    pub const FOLDER_IDS: &str = "foldersids";
    /// Mirror set of contained file ids.
    pub const FILE_IDS: &str = "fileIds";
    /// Last modification time.
    pub const UPDATED_AT: &str = "updated_at";
}
