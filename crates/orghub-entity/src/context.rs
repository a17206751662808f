//! Organizational context carried by tree nodes.

use serde::{Deserialize, Serialize};

use orghub_core::types::{CompanyId, DepartmentId, FilterField, HoldingId, Predicate};

/// Field names of the context triple.
pub mod fields {
    /// Owning holding.
    pub const HOLDING_ID: &str = "holding_id";
    /// Owning company.
    pub const COMPANY_ID: &str = "company_id";
    /// Owning department.
    pub const DEPARTMENT_ID: &str = "department_id";
}

/// The `{holding_id?, company_id?, department_id?}` triple a folder or file
/// inherits from its parent when it is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgContext {
    /// Owning holding.
    #[serde(default)]
    pub holding_id: Option<HoldingId>,
    /// Owning company.
    #[serde(default)]
    pub company_id: Option<CompanyId>,
    /// Owning department.
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
}

impl OrgContext {
    /// Create a context from its three parts.
    pub fn new(
        holding_id: Option<HoldingId>,
        company_id: Option<CompanyId>,
        department_id: Option<DepartmentId>,
    ) -> Self {
        Self {
            holding_id,
            company_id,
            department_id,
        }
    }

    /// Predicate matching documents whose context equals this one exactly,
    /// absent parts included.
    pub fn exact_match(&self) -> Predicate {
        Predicate::all()
            .and(FilterField::eq_opt(
                fields::HOLDING_ID,
                self.holding_id.as_ref().map(|id| id.as_str()),
            ))
            .and(FilterField::eq_opt(
                fields::COMPANY_ID,
                self.company_id.as_ref().map(|id| id.as_str()),
            ))
            .and(FilterField::eq_opt(
                fields::DEPARTMENT_ID,
                self.department_id.as_ref().map(|id| id.as_str()),
            ))
    }
}
