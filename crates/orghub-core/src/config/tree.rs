//! Folder tree configuration.

use serde::{Deserialize, Serialize};

/// Limits and labels used when walking the folder tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Maximum number of ancestors followed when resolving a path.
    ///
    /// A parent chain longer than this is treated as corrupted (cyclic).
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Label of the synthetic root entry in breadcrumb paths.
    #[serde(default = "default_root_label")]
    pub root_label: String,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            root_label: default_root_label(),
        }
    }
}

fn default_max_depth() -> usize {
    256
}

fn default_root_label() -> String {
    "Home".to_string()
}
