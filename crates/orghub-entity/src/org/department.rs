//! Department entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orghub_core::types::{CompanyId, DepartmentId, ResourceKind, UserId};

use crate::DocumentEntity;

/// A department belonging to a company.
///
/// Departments carry no holding reference; an admin's reach over a
/// department is established through `company_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    /// Unique department identifier.
    pub id: DepartmentId,
    /// Department name, unique within its company ignoring case.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// The owning company.
    pub company_id: CompanyId,
    /// The department manager, if assigned.
    #[serde(default)]
    pub manager_id: Option<UserId>,
    /// Soft-delete flag.
    #[serde(default)]
    pub is_deleted: bool,
    /// When the department was created.
    pub created_at: DateTime<Utc>,
    /// When the department was last updated.
    pub updated_at: DateTime<Utc>,
}

impl DocumentEntity for Department {
    const KIND: ResourceKind = ResourceKind::Department;

    fn document_id(&self) -> &str {
        self.id.as_str()
    }
}

/// Data required to create a new department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDepartment {
    /// Department name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// The owning company.
    pub company_id: CompanyId,
    /// Optional manager.
    pub manager_id: Option<UserId>,
}

impl CreateDepartment {
    /// Build the document to insert.
    pub fn into_department(self) -> Department {
        let now = Utc::now();
        Department {
            id: DepartmentId::new(),
            name: self.name,
            description: self.description,
            company_id: self.company_id,
            manager_id: self.manager_id,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}
