//! User management scoped by the requester's reach.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use orghub_auth::{AccessFilterEngine, AccessHints, Principal, RoleEnforcer};
use orghub_core::error::AppError;
use orghub_core::result::AppResult;
use orghub_core::traits::DocumentStore;
use orghub_core::types::{FilterField, ID_FIELD, Predicate, ResourceKind, UserId};
use orghub_database::repositories::UserRepository;
use orghub_entity::user::{CreateUser, User, UserRole, UserStatus, fields};

use crate::context::RequestContext;
use crate::org::OrgHierarchyValidator;
use crate::validation::{normalize_optional, validate_request};

/// Request to create a user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Login email.
    #[validate(email)]
    pub email: String,
    /// Display name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Role string (`superadmin`, `admin`, `director`, `user`).
    pub role: String,
    /// Assigned holding.
    #[serde(default)]
    pub holding_id: Option<String>,
    /// Assigned company.
    #[serde(default)]
    pub company_id: Option<String>,
    /// Assigned department.
    #[serde(default)]
    pub department_id: Option<String>,
}

/// Manages user records.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    users: UserRepository,
    /// Assignment checks.
    validator: OrgHierarchyValidator,
    /// Access engine.
    access: Arc<AccessFilterEngine>,
    /// Role gate.
    roles: RoleEnforcer,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(store: Arc<dyn DocumentStore>, access: Arc<AccessFilterEngine>) -> Self {
        Self {
            users: UserRepository::new(Arc::clone(&store)),
            validator: OrgHierarchyValidator::new(store),
            access,
            roles: RoleEnforcer::new(),
        }
    }

    /// Loads the principal record of a user for scope resolution.
    ///
    /// Unscoped: this is how a request's identity is established.
    pub async fn load_principal(&self, user_id: &str) -> AppResult<Principal> {
        let id = UserId::parse(user_id)?;
        let user = self
            .users
            .find_by_id(id.as_str())
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        Ok(Principal::from(&user))
    }

    /// Creates the first superadmin of an empty installation.
    ///
    /// Refused once any superadmin exists.
    pub async fn bootstrap_superadmin(
        &self,
        email: &str,
        full_name: Option<String>,
    ) -> AppResult<User> {
        let existing = self
            .users
            .find_first(&Predicate::field(FilterField::ieq(
                fields::ROLE,
                UserRole::Superadmin.as_str(),
            )))
            .await?;
        if existing.is_some() {
            return Err(AppError::validation("A superadmin already exists"));
        }

        let user = CreateUser {
            email: email.trim().to_lowercase(),
            full_name: normalize_optional(full_name),
            role: UserRole::Superadmin,
            holding_id: None,
            company_id: None,
            department_id: None,
        }
        .into_user();
        self.users.create(&user).await?;

        info!(user_id = %user.id, "Bootstrapped superadmin");
        Ok(user)
    }

    /// Lists the users visible to the requester, newest first, optionally
    /// narrowed to one account status.
    pub async fn list_users(
        &self,
        ctx: &RequestContext,
        status: Option<UserStatus>,
    ) -> AppResult<Vec<User>> {
        let mut predicate = self.access.filter(&ctx.scope, ResourceKind::User);
        if let Some(status) = status {
            predicate = predicate.and(status.condition());
        }
        let mut users = self.users.find_many(&predicate).await?;
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    /// Gets a user, or `None` when missing or out of scope.
    pub async fn get_user(&self, ctx: &RequestContext, id: &str) -> AppResult<Option<User>> {
        let id = UserId::parse(id)?;
        let predicate = self
            .access
            .filter(&ctx.scope, ResourceKind::User)
            .and(FilterField::eq(ID_FIELD, id.as_str()));
        self.users.find_first(&predicate).await
    }

    /// Creates a user.
    ///
    /// Requires admin or above. The new role may not outrank the requester,
    /// and an admin may only place users inside their own company.
    pub async fn create_user(&self, ctx: &RequestContext, req: CreateUserRequest) -> AppResult<User> {
        self.roles.require_minimum_role(&ctx.scope, UserRole::Admin)?;
        validate_request(&req)?;
        let role: UserRole = req.role.parse()?;
        self.roles.require_minimum_role(&ctx.scope, role)?;

        let email = req.email.trim().to_lowercase();
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::validation(format!(
                "A user with email '{email}' already exists"
            )));
        }

        let assignment = self
            .validator
            .validate_user_assignment(
                role,
                req.holding_id.as_deref(),
                req.company_id.as_deref(),
                req.department_id.as_deref(),
            )
            .await?;

        if !ctx.scope.is_superadmin() {
            let company = assignment.company_id.clone().ok_or_else(|| {
                AppError::authorization("Only a superadmin may create users outside a company")
            })?;
            self.access
                .validate_access(
                    &ctx.scope,
                    ResourceKind::Company,
                    company.as_str(),
                    &AccessHints::none(),
                )
                .await?;
        }

        let user = CreateUser {
            email,
            full_name: normalize_optional(req.full_name),
            role,
            holding_id: assignment.holding_id,
            company_id: assignment.company_id,
            department_id: assignment.department_id,
        }
        .into_user();
        self.users.create(&user).await?;

        info!(
            user_id = %ctx.actor(),
            new_user_id = %user.id,
            role = %role,
            "User created"
        );
        Ok(user)
    }
}
