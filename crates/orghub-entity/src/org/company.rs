//! Company entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orghub_core::types::{CompanyId, HoldingId, ResourceKind, UserId};

use crate::DocumentEntity;

/// A company belonging to a holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    /// Unique company identifier.
    pub id: CompanyId,
    /// Company name, unique within its holding ignoring case.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// The owning holding.
    pub holding_id: HoldingId,
    /// The company's administrator, if assigned.
    #[serde(default)]
    pub admin_id: Option<UserId>,
    /// Soft-delete flag.
    #[serde(default)]
    pub is_deleted: bool,
    /// When the company was created.
    pub created_at: DateTime<Utc>,
    /// When the company was last updated.
    pub updated_at: DateTime<Utc>,
}

impl DocumentEntity for Company {
    const KIND: ResourceKind = ResourceKind::Company;

    fn document_id(&self) -> &str {
        self.id.as_str()
    }
}

/// Data required to create a new company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCompany {
    /// Company name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// The owning holding.
    pub holding_id: HoldingId,
    /// Optional administrator.
    pub admin_id: Option<UserId>,
}

impl CreateCompany {
    /// Build the document to insert.
    pub fn into_company(self) -> Company {
        let now = Utc::now();
        Company {
            id: CompanyId::new(),
            name: self.name,
            description: self.description,
            holding_id: self.holding_id,
            admin_id: self.admin_id,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}
