//! Holding entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orghub_core::types::{CompanyId, HoldingId, ResourceKind};

use crate::DocumentEntity;

/// The top level of the org hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Unique holding identifier.
    pub id: HoldingId,
    /// Holding name, unique ignoring case.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Companies registered under this holding.
    #[serde(default)]
    pub company_ids: Vec<CompanyId>,
    /// Soft-delete flag.
    #[serde(default)]
    pub is_deleted: bool,
    /// When the holding was created.
    pub created_at: DateTime<Utc>,
    /// When the holding was last updated.
    pub updated_at: DateTime<Utc>,
}

impl DocumentEntity for Holding {
    const KIND: ResourceKind = ResourceKind::Holding;

    fn document_id(&self) -> &str {
        self.id.as_str()
    }
}

/// Data required to create a new holding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHolding {
    /// Holding name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

impl CreateHolding {
    /// Build the document to insert.
    pub fn into_holding(self) -> Holding {
        let now = Utc::now();
        Holding {
            id: HoldingId::new(),
            name: self.name,
            description: self.description,
            company_ids: Vec::new(),
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}
