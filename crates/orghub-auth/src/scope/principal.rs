//! Principal records and the scope value type.

use serde::{Deserialize, Serialize};

use orghub_core::types::{CompanyId, DepartmentId, HoldingId, UserId};
use orghub_entity::user::{User, UserRole};

/// An authenticated principal as supplied by the identity provider.
///
/// The role is kept as the raw stored string; it is only interpreted by
/// [`ScopeResolver`](super::ScopeResolver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// The user behind the request, when known.
    #[serde(default)]
    pub user_id: Option<UserId>,
    /// Raw role string.
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
    /// Whether the account is enabled.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Default for Principal {
    fn default() -> Self {
        Self {
            user_id: None,
            role: None,
            holding_id: None,
            company_id: None,
            department_id: None,
            is_active: true,
        }
    }
}

impl Principal {
    /// A principal with the given role and no org assignment.
    pub fn with_role(role: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
            ..Self::default()
        }
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            user_id: Some(user.id.clone()),
            role: user.role.clone(),
            holding_id: user.holding_id.clone(),
            company_id: user.company_id.clone(),
            department_id: user.department_id.clone(),
            is_active: user.is_active,
        }
    }
}

fn default_active() -> bool {
    true
}

/// The access scope of one request.
///
/// Built once per request by the resolver and never mutated. A scope without
/// a role is the no-access scope: every listing predicate derived from it is
/// deny-all and every point check fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Scope {
    role: Option<UserRole>,
    holding_id: Option<HoldingId>,
    company_id: Option<CompanyId>,
    department_id: Option<DepartmentId>,
}

impl Scope {
    /// Create a scope from its parts.
    pub fn new(
        role: UserRole,
        holding_id: Option<HoldingId>,
        company_id: Option<CompanyId>,
        department_id: Option<DepartmentId>,
    ) -> Self {
        Self {
            role: Some(role),
            holding_id,
            company_id,
            department_id,
        }
    }

    /// The scope that grants nothing.
    pub fn no_access() -> Self {
        Self::default()
    }

    /// The resolved role, `None` for the no-access scope.
    pub fn role(&self) -> Option<UserRole> {
        self.role
    }

    /// Holding the scope is bound to.
    pub fn holding_id(&self) -> Option<&HoldingId> {
        self.holding_id.as_ref()
    }

    /// Company the scope is bound to.
    pub fn company_id(&self) -> Option<&CompanyId> {
        self.company_id.as_ref()
    }

    /// Department the scope is bound to.
    pub fn department_id(&self) -> Option<&DepartmentId> {
        self.department_id.as_ref()
    }

    /// Whether this is the no-access scope.
    pub fn is_no_access(&self) -> bool {
        self.role.is_none()
    }

    /// Whether the scope is unrestricted.
    pub fn is_superadmin(&self) -> bool {
        self.role == Some(UserRole::Superadmin)
    }

    /// Whether the scope may modify resources (superadmin, admin, director).
    pub fn can_modify(&self) -> bool {
        self.role.is_some_and(|role| role.can_modify())
    }
}
