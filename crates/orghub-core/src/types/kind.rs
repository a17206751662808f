//! Resource kinds and the store collections that hold them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The six logical collections of the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Top of the org hierarchy.
    Holding,
    /// Belongs to a holding.
    Company,
    /// Belongs to a company.
    Department,
    /// A principal, bound to org-hierarchy ids according to its role.
    User,
    /// A knowledge-base folder.
    Folder,
    /// A knowledge-base file.
    File,
}

impl ResourceKind {
    /// Every kind, in hierarchy order.
    pub const ALL: [ResourceKind; 6] = [
        Self::Holding,
        Self::Company,
        Self::Department,
        Self::User,
        Self::Folder,
        Self::File,
    ];

    /// Name of the backing collection.
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Holding => "holdings",
            Self::Company => "companies",
            Self::Department => "departments",
            Self::User => "users",
            Self::Folder => "folders",
            Self::File => "files",
        }
    }

    /// Whether documents of this kind carry an `is_deleted` flag that listing
    /// paths must honour.
    pub fn supports_soft_delete(&self) -> bool {
        matches!(self, Self::Holding | Self::Company | Self::Department)
    }

    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Holding => "holding",
            Self::Company => "company",
            Self::Department => "department",
            Self::User => "user",
            Self::Folder => "folder",
            Self::File => "file",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
