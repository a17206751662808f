//! File domain entities.

pub mod model;

pub use model::{CreateFile, File};

/// Field names of file documents.
pub mod fields {
    /// File name.
    pub const FILENAME: &str = "filename";
    /// Owning folder (null for root files).
    pub const FOLDER_ID: &str = "folder_id";
    /// Last modification time.
    pub const UPDATED_AT: &str = "updated_at";
}
