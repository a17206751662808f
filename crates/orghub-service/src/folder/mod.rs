//! Folder management and tree services.

pub mod service;
pub mod tree;

pub use service::{
    CreateFolderRequest, DeleteReport, FolderService, MoveFolderRequest, RenameRequest,
};
pub use tree::TreeService;
