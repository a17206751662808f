//! Holding, company, and department management.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{info, warn};
use validator::Validate;

use orghub_auth::{AccessFilterEngine, AccessHints, RoleEnforcer};
use orghub_core::error::AppError;
use orghub_core::result::AppResult;
use orghub_core::traits::DocumentStore;
use orghub_core::types::{
    CompanyId, DepartmentId, Document, FilterField, HoldingId, ID_FIELD, ResourceKind, UserId,
};
use orghub_database::repositories::{CompanyRepository, DepartmentRepository, HoldingRepository};
use orghub_entity::org::{
    Company, CreateCompany, CreateDepartment, CreateHolding, Department, Holding,
};
use orghub_entity::org::fields;
use orghub_entity::user::UserRole;

use super::validator::OrgHierarchyValidator;
use crate::context::RequestContext;
use crate::validation::{normalize_name, normalize_optional, parse_optional, validate_request};

/// Request to create a holding.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateHoldingRequest {
    /// Holding name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Request to create a company.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCompanyRequest {
    /// Company name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Parent holding.
    pub holding_id: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional company admin.
    #[serde(default)]
    pub admin_id: Option<String>,
}

/// Request to create a department.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDepartmentRequest {
    /// Department name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Parent company.
    pub company_id: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional department manager.
    #[serde(default)]
    pub manager_id: Option<String>,
}

/// Request to update a holding, company, or department.
///
/// The name is required; the description is replaced as given. `lead_id`
/// sets the company admin or department manager and is ignored for
/// holdings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateOrgNodeRequest {
    /// New name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New company admin or department manager.
    #[serde(default)]
    pub lead_id: Option<String>,
}

/// Manages the holding → company → department hierarchy.
#[derive(Debug, Clone)]
pub struct OrgService {
    /// Holding repository.
    holdings: HoldingRepository,
    /// Company repository.
    companies: CompanyRepository,
    /// Department repository.
    departments: DepartmentRepository,
    /// Referential checks.
    validator: OrgHierarchyValidator,
    /// Access engine.
    access: Arc<AccessFilterEngine>,
    /// Role gate.
    roles: RoleEnforcer,
}

impl OrgService {
    /// Creates a new org service.
    pub fn new(store: Arc<dyn DocumentStore>, access: Arc<AccessFilterEngine>) -> Self {
        Self {
            holdings: HoldingRepository::new(Arc::clone(&store)),
            companies: CompanyRepository::new(Arc::clone(&store)),
            departments: DepartmentRepository::new(Arc::clone(&store)),
            validator: OrgHierarchyValidator::new(store),
            access,
            roles: RoleEnforcer::new(),
        }
    }

    // ── Holdings ─────────────────────────────────────────────────────

    /// Lists the holdings visible to the requester, newest first.
    pub async fn list_holdings(&self, ctx: &RequestContext) -> AppResult<Vec<Holding>> {
        let predicate = self.access.filter(&ctx.scope, ResourceKind::Holding);
        let mut holdings = self.holdings.find_many(&predicate).await?;
        holdings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(holdings)
    }

    /// Gets a holding, or `None` when it is missing or out of scope.
    pub async fn get_holding(&self, ctx: &RequestContext, id: &str) -> AppResult<Option<Holding>> {
        let id = HoldingId::parse(id)?;
        let predicate = self
            .access
            .filter(&ctx.scope, ResourceKind::Holding)
            .and(FilterField::eq(ID_FIELD, id.as_str()));
        self.holdings.find_first(&predicate).await
    }

    /// Creates a holding. Superadmin only.
    pub async fn create_holding(
        &self,
        ctx: &RequestContext,
        req: CreateHoldingRequest,
    ) -> AppResult<Holding> {
        self.roles.require_superadmin(&ctx.scope)?;
        validate_request(&req)?;
        let name = normalize_name(&req.name, "Holding")?;
        self.validator.ensure_unique_holding_name(&name, None).await?;

        let holding = CreateHolding {
            name,
            description: normalize_optional(req.description),
        }
        .into_holding();
        self.holdings.create(&holding).await?;

        info!(
            user_id = %ctx.actor(),
            holding_id = %holding.id,
            name = %holding.name,
            "Holding created"
        );
        Ok(holding)
    }

    /// Renames / updates a holding. Superadmin only.
    pub async fn update_holding(
        &self,
        ctx: &RequestContext,
        id: &str,
        req: UpdateOrgNodeRequest,
    ) -> AppResult<Holding> {
        self.roles.require_superadmin(&ctx.scope)?;
        validate_request(&req)?;
        let id = HoldingId::parse(id)?;
        let name = normalize_name(&req.name, "Holding")?;

        self.holdings
            .find_active(&id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Holding {id} not found")))?;
        self.validator
            .ensure_unique_holding_name(&name, Some(&id))
            .await?;

        self.holdings
            .patch(id.as_str(), node_patch(&name, req.description, None))
            .await?;
        info!(user_id = %ctx.actor(), holding_id = %id, "Holding updated");

        self.holdings
            .find_by_id(id.as_str())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Holding {id} not found")))
    }

    /// Permanently deletes a holding. Superadmin only. Companies under it are
    /// left in place.
    pub async fn delete_holding(&self, ctx: &RequestContext, id: &str) -> AppResult<()> {
        self.roles.require_superadmin(&ctx.scope)?;
        let id = HoldingId::parse(id)?;
        let holding = self
            .holdings
            .find_active(&id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Holding {id} not found")))?;

        if !holding.company_ids.is_empty() {
            warn!(
                holding_id = %id,
                companies = holding.company_ids.len(),
                "Deleting holding that still has companies"
            );
        }
        self.holdings.delete(id.as_str()).await?;
        info!(user_id = %ctx.actor(), holding_id = %id, "Holding deleted");
        Ok(())
    }

    // ── Companies ────────────────────────────────────────────────────

    /// Lists the companies visible to the requester, newest first,
    /// optionally narrowed to one holding.
    pub async fn list_companies(
        &self,
        ctx: &RequestContext,
        holding_id: Option<&str>,
    ) -> AppResult<Vec<Company>> {
        let holding_id = parse_optional(holding_id, HoldingId::parse)?;
        let mut predicate = self.access.filter(&ctx.scope, ResourceKind::Company);
        if let Some(holding_id) = &holding_id {
            predicate = predicate.and(FilterField::eq(fields::HOLDING_ID, holding_id.as_str()));
        }
        let mut companies = self.companies.find_many(&predicate).await?;
        companies.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(companies)
    }

    /// Gets a company, or `None` when it is missing or out of scope.
    pub async fn get_company(&self, ctx: &RequestContext, id: &str) -> AppResult<Option<Company>> {
        let id = CompanyId::parse(id)?;
        let predicate = self
            .access
            .filter(&ctx.scope, ResourceKind::Company)
            .and(FilterField::eq(ID_FIELD, id.as_str()));
        self.companies.find_first(&predicate).await
    }

    /// Creates a company under an existing holding. Superadmin only.
    pub async fn create_company(
        &self,
        ctx: &RequestContext,
        req: CreateCompanyRequest,
    ) -> AppResult<Company> {
        self.roles.require_superadmin(&ctx.scope)?;
        validate_request(&req)?;
        let name = normalize_name(&req.name, "Company")?;
        let admin_id = parse_optional(req.admin_id.as_deref(), UserId::parse)?;
        let holding = self.validator.require_holding(&req.holding_id).await?;
        self.validator
            .ensure_unique_company_name(&holding.id, &name, None)
            .await?;

        let company = CreateCompany {
            name,
            description: normalize_optional(req.description),
            holding_id: holding.id.clone(),
            admin_id,
        }
        .into_company();
        self.companies.create(&company).await?;

        if !self.holdings.link_company(&holding.id, &company.id).await? {
            warn!(
                holding_id = %holding.id,
                company_id = %company.id,
                "Holding vanished before the company could be linked"
            );
        }

        info!(
            user_id = %ctx.actor(),
            company_id = %company.id,
            holding_id = %company.holding_id,
            name = %company.name,
            "Company created"
        );
        Ok(company)
    }

    /// Renames / updates a company. Requires admin or above with access to
    /// the company.
    pub async fn update_company(
        &self,
        ctx: &RequestContext,
        id: &str,
        req: UpdateOrgNodeRequest,
    ) -> AppResult<Company> {
        self.roles.require_minimum_role(&ctx.scope, UserRole::Admin)?;
        validate_request(&req)?;
        let id = CompanyId::parse(id)?;
        let name = normalize_name(&req.name, "Company")?;
        let admin_id = parse_optional(req.lead_id.as_deref(), UserId::parse)?;

        self.access
            .validate_access(&ctx.scope, ResourceKind::Company, id.as_str(), &AccessHints::none())
            .await?;
        let existing = self
            .companies
            .find_active(&id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Company {id} not found")))?;
        self.validator
            .ensure_unique_company_name(&existing.holding_id, &name, Some(&id))
            .await?;

        let lead = admin_id.map_or(Value::Null, |a| json!(a.as_str()));
        self.companies
            .patch(id.as_str(), node_patch(&name, req.description, Some(("admin_id", lead))))
            .await?;
        info!(user_id = %ctx.actor(), company_id = %id, "Company updated");

        self.companies
            .find_by_id(id.as_str())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Company {id} not found")))
    }

    /// Permanently deletes a company. Superadmin only.
    pub async fn delete_company(&self, ctx: &RequestContext, id: &str) -> AppResult<()> {
        self.roles.require_superadmin(&ctx.scope)?;
        let id = CompanyId::parse(id)?;
        let company = self
            .companies
            .find_active(&id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Company {id} not found")))?;

        self.holdings
            .unlink_company(&company.holding_id, &company.id)
            .await?;
        self.companies.delete(id.as_str()).await?;
        info!(user_id = %ctx.actor(), company_id = %id, "Company deleted");
        Ok(())
    }

    // ── Departments ──────────────────────────────────────────────────

    /// Lists the departments visible to the requester, newest first,
    /// optionally narrowed to one company.
    pub async fn list_departments(
        &self,
        ctx: &RequestContext,
        company_id: Option<&str>,
    ) -> AppResult<Vec<Department>> {
        let company_id = parse_optional(company_id, CompanyId::parse)?;
        let mut predicate = self.access.filter(&ctx.scope, ResourceKind::Department);
        if let Some(company_id) = &company_id {
            predicate = predicate.and(FilterField::eq(fields::COMPANY_ID, company_id.as_str()));
        }
        let mut departments = self.departments.find_many(&predicate).await?;
        departments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(departments)
    }

    /// Gets a department, or `None` when it is missing or out of scope.
    pub async fn get_department(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> AppResult<Option<Department>> {
        let id = DepartmentId::parse(id)?;
        let predicate = self
            .access
            .filter(&ctx.scope, ResourceKind::Department)
            .and(FilterField::eq(ID_FIELD, id.as_str()));
        self.departments.find_first(&predicate).await
    }

    /// Creates a department under an existing company. Requires admin or
    /// above with access to the company.
    pub async fn create_department(
        &self,
        ctx: &RequestContext,
        req: CreateDepartmentRequest,
    ) -> AppResult<Department> {
        self.roles.require_minimum_role(&ctx.scope, UserRole::Admin)?;
        validate_request(&req)?;
        let name = normalize_name(&req.name, "Department")?;
        let manager_id = parse_optional(req.manager_id.as_deref(), UserId::parse)?;
        let company = self.validator.require_company(&req.company_id).await?;

        self.access
            .validate_access(
                &ctx.scope,
                ResourceKind::Company,
                company.id.as_str(),
                &AccessHints::none(),
            )
            .await?;
        self.validator
            .ensure_unique_department_name(&company.id, &name, None)
            .await?;

        let department = CreateDepartment {
            name,
            description: normalize_optional(req.description),
            company_id: company.id,
            manager_id,
        }
        .into_department();
        self.departments.create(&department).await?;

        info!(
            user_id = %ctx.actor(),
            department_id = %department.id,
            company_id = %department.company_id,
            name = %department.name,
            "Department created"
        );
        Ok(department)
    }

    /// Renames / updates a department. Requires director or above with
    /// access to the department.
    pub async fn update_department(
        &self,
        ctx: &RequestContext,
        id: &str,
        req: UpdateOrgNodeRequest,
    ) -> AppResult<Department> {
        self.roles.require_modify(&ctx.scope)?;
        validate_request(&req)?;
        let id = DepartmentId::parse(id)?;
        let name = normalize_name(&req.name, "Department")?;
        let manager_id = parse_optional(req.lead_id.as_deref(), UserId::parse)?;

        self.access
            .validate_access(
                &ctx.scope,
                ResourceKind::Department,
                id.as_str(),
                &AccessHints::none(),
            )
            .await?;
        let existing = self
            .departments
            .find_active(&id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Department {id} not found")))?;
        self.validator
            .ensure_unique_department_name(&existing.company_id, &name, Some(&id))
            .await?;

        let lead = manager_id.map_or(Value::Null, |m| json!(m.as_str()));
        self.departments
            .patch(id.as_str(), node_patch(&name, req.description, Some(("manager_id", lead))))
            .await?;
        info!(user_id = %ctx.actor(), department_id = %id, "Department updated");

        self.departments
            .find_by_id(id.as_str())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Department {id} not found")))
    }

    /// Permanently deletes a department. Requires admin or above with access
    /// to the department.
    pub async fn delete_department(&self, ctx: &RequestContext, id: &str) -> AppResult<()> {
        self.roles.require_minimum_role(&ctx.scope, UserRole::Admin)?;
        let id = DepartmentId::parse(id)?;
        self.access
            .validate_access(
                &ctx.scope,
                ResourceKind::Department,
                id.as_str(),
                &AccessHints::none(),
            )
            .await?;

        self.departments.delete(id.as_str()).await?;
        info!(user_id = %ctx.actor(), department_id = %id, "Department deleted");
        Ok(())
    }
}

/// Build the patch for a name/description update, plus an optional lead
/// field.
fn node_patch(name: &str, description: Option<String>, lead: Option<(&str, Value)>) -> Document {
    let mut patch = Document::new();
    patch.insert(fields::NAME.to_string(), json!(name));
    patch.insert(
        "description".to_string(),
        normalize_optional(description).map_or(Value::Null, Value::String),
    );
    if let Some((field, value)) = lead {
        patch.insert(field.to_string(), value);
    }
    patch
}
