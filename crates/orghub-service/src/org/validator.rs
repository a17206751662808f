//! Referential and naming checks for the org hierarchy.

use std::sync::Arc;

use tracing::debug;

use orghub_core::error::AppError;
use orghub_core::result::AppResult;
use orghub_core::traits::DocumentStore;
use orghub_core::types::{CompanyId, DepartmentId, HoldingId};
use orghub_database::repositories::{
    CompanyRepository, DepartmentRepository, HoldingRepository,
};
use orghub_entity::OrgContext;
use orghub_entity::org::{Company, Department, Holding};
use orghub_entity::user::UserRole;

use crate::validation::parse_optional;

/// Validates parent references and name uniqueness for holdings,
/// companies, departments, and user assignments.
///
/// Every check runs before the caller's first write. Ids are parsed before
/// any lookup, so malformed ids never reach the store.
#[derive(Debug, Clone)]
pub struct OrgHierarchyValidator {
    holdings: HoldingRepository,
    companies: CompanyRepository,
    departments: DepartmentRepository,
}

impl OrgHierarchyValidator {
    /// Create a validator over `store`.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            holdings: HoldingRepository::new(Arc::clone(&store)),
            companies: CompanyRepository::new(Arc::clone(&store)),
            departments: DepartmentRepository::new(store),
        }
    }

    /// Resolve a live parent holding.
    pub async fn require_holding(&self, raw_id: &str) -> AppResult<Holding> {
        let id = HoldingId::parse(raw_id)?;
        self.holdings.find_active(&id).await?.ok_or_else(|| {
            AppError::validation(format!("Holding {id} does not exist or has been deleted"))
        })
    }

    /// Resolve a live parent company.
    pub async fn require_company(&self, raw_id: &str) -> AppResult<Company> {
        let id = CompanyId::parse(raw_id)?;
        self.companies.find_active(&id).await?.ok_or_else(|| {
            AppError::validation(format!("Company {id} does not exist or has been deleted"))
        })
    }

    /// Resolve a live department.
    pub async fn require_department(&self, raw_id: &str) -> AppResult<Department> {
        let id = DepartmentId::parse(raw_id)?;
        self.departments.find_active(&id).await?.ok_or_else(|| {
            AppError::validation(format!(
                "Department {id} does not exist or has been deleted"
            ))
        })
    }

    /// Reject a holding name already used by another live holding.
    pub async fn ensure_unique_holding_name(
        &self,
        name: &str,
        exclude: Option<&HoldingId>,
    ) -> AppResult<()> {
        if self.holdings.find_by_name(name, exclude).await?.is_some() {
            return Err(AppError::validation(format!(
                "Holding with name '{name}' already exists"
            )));
        }
        Ok(())
    }

    /// Reject a company name already used under the same holding.
    pub async fn ensure_unique_company_name(
        &self,
        holding_id: &HoldingId,
        name: &str,
        exclude: Option<&CompanyId>,
    ) -> AppResult<()> {
        if self
            .companies
            .find_by_name(holding_id, name, exclude)
            .await?
            .is_some()
        {
            return Err(AppError::validation(format!(
                "Company with name '{name}' already exists in this holding"
            )));
        }
        Ok(())
    }

    /// Reject a department name already used under the same company.
    pub async fn ensure_unique_department_name(
        &self,
        company_id: &CompanyId,
        name: &str,
        exclude: Option<&DepartmentId>,
    ) -> AppResult<()> {
        if self
            .departments
            .find_by_name(company_id, name, exclude)
            .await?
            .is_some()
        {
            return Err(AppError::validation(format!(
                "Department with name '{name}' already exists in this company"
            )));
        }
        Ok(())
    }

    /// Validate the org assignment of a user with `role` and return the
    /// completed `{holding, company, department}` triple.
    ///
    /// Admins need a company and directors and users a department. A
    /// department must belong to the given company; missing company and
    /// holding ids are derived from the department and company.
    pub async fn validate_user_assignment(
        &self,
        role: UserRole,
        holding_id: Option<&str>,
        company_id: Option<&str>,
        department_id: Option<&str>,
    ) -> AppResult<OrgContext> {
        let holding_id = parse_optional(holding_id, HoldingId::parse)?;
        let mut company_id = parse_optional(company_id, CompanyId::parse)?;
        let department_id = parse_optional(department_id, DepartmentId::parse)?;

        match role {
            UserRole::Superadmin => {}
            UserRole::Admin => {
                if company_id.is_none() {
                    return Err(AppError::validation("An admin must be assigned a company"));
                }
            }
            UserRole::Director | UserRole::User => {
                if department_id.is_none() {
                    return Err(AppError::validation(format!(
                        "A {role} must be assigned a department"
                    )));
                }
            }
        }

        if let Some(department_id) = &department_id {
            let department = self.require_department(department_id.as_str()).await?;
            match &company_id {
                Some(company_id) if *company_id != department.company_id => {
                    return Err(AppError::validation(format!(
                        "Department {department_id} does not belong to company {company_id}"
                    )));
                }
                Some(_) => {}
                None => company_id = Some(department.company_id),
            }
        }

        let mut holding = holding_id;
        if let Some(company_id) = &company_id {
            let company = self.require_company(company_id.as_str()).await?;
            match &holding {
                Some(holding_id) if *holding_id != company.holding_id => {
                    return Err(AppError::validation(format!(
                        "Company {company_id} does not belong to holding {holding_id}"
                    )));
                }
                Some(_) => {}
                None => holding = Some(company.holding_id),
            }
        } else if let Some(holding_id) = &holding {
            self.require_holding(holding_id.as_str()).await?;
        }

        debug!(
            role = %role,
            holding_id = ?holding,
            company_id = ?company_id,
            department_id = ?department_id,
            "Validated user assignment"
        );
        Ok(OrgContext::new(holding, company_id, department_id))
    }
}
