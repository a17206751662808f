//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orghub_core::types::{CompanyId, DepartmentId, HoldingId, ResourceKind, UserId};

use super::role::UserRole;
use crate::DocumentEntity;

/// A user record as held in the `users` collection.
///
/// The role is kept as the stored string: records written by other tools
/// may carry values this crate does not know, and those must resolve to a
/// no-access scope rather than fail to load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Login email.
    pub email: String,
    /// Display name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Stored role string.
    #[serde(default)]
    pub role: Option<String>,
    /// Assigned holding.
    #[serde(default)]
    pub holding_id: Option<HoldingId>,
    /// Assigned company.
    #[serde(default)]
    pub company_id: Option<CompanyId>,
    /// Assigned department.
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    /// Whether the account may act at all.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The parsed role, or `None` when missing or unknown.
    pub fn parsed_role(&self) -> Option<UserRole> {
        self.role.as_deref().and_then(|r| r.parse().ok())
    }
}

impl DocumentEntity for User {
    const KIND: ResourceKind = ResourceKind::User;

    fn document_id(&self) -> &str {
        self.id.as_str()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Login email.
    pub email: String,
    /// Display name.
    pub full_name: Option<String>,
    /// Assigned role.
    pub role: UserRole,
    /// Assigned holding.
    pub holding_id: Option<HoldingId>,
    /// Assigned company.
    pub company_id: Option<CompanyId>,
    /// Assigned department.
    pub department_id: Option<DepartmentId>,
}

impl CreateUser {
    /// Build the document to insert.
    pub fn into_user(self) -> User {
        let now = Utc::now();
        User {
            id: UserId::new(),
            email: self.email,
            full_name: self.full_name,
            role: Some(self.role.as_str().to_string()),
            holding_id: self.holding_id,
            company_id: self.company_id,
            department_id: self.department_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

fn default_true() -> bool {
    true
}
