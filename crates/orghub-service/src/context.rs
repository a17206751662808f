//! Request context carrying the acting principal and its resolved scope.

use orghub_auth::{Principal, Scope, ScopeResolver};
use orghub_core::error::AppError;
use orghub_core::result::AppResult;
use orghub_core::types::UserId;
use orghub_entity::OrgContext;
use orghub_entity::user::UserRole;

/// Context for the current request.
///
/// Built once per request so that every operation knows *who* is acting
/// and *what* they can reach.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The acting user, when known.
    pub user_id: Option<UserId>,
    /// The scope resolved from the principal.
    pub scope: Scope,
}

impl RequestContext {
    /// Resolve `principal` and build a context for it.
    pub fn new(principal: &Principal) -> Self {
        Self::with_scope(
            principal.user_id.clone(),
            ScopeResolver::new().resolve(principal),
        )
    }

    /// Build a context around an already resolved scope.
    pub fn with_scope(user_id: Option<UserId>, scope: Scope) -> Self {
        Self { user_id, scope }
    }

    /// The acting user's id for log fields.
    pub fn actor(&self) -> String {
        self.user_id
            .as_ref()
            .map_or_else(|| "anonymous".to_string(), |id| id.to_string())
    }

    /// The org context stamped on tree nodes created without a parent.
    ///
    /// Admins must carry a company and directors/users a department; a
    /// scope missing the id its role filters on owns nothing and cannot
    /// create root nodes.
    pub fn org_context(&self) -> AppResult<OrgContext> {
        let missing = match self.scope.role() {
            Some(UserRole::Superadmin) => None,
            Some(UserRole::Admin) => self.scope.company_id().is_none().then_some("company"),
            Some(UserRole::Director | UserRole::User) => {
                self.scope.department_id().is_none().then_some("department")
            }
            None => {
                return Err(AppError::authorization(
                    "Requester has no access scope and cannot create root nodes",
                ));
            }
        };
        if let Some(what) = missing {
            return Err(AppError::authorization(format!(
                "Requester scope has no {what} and cannot create root nodes"
            )));
        }
        Ok(OrgContext::new(
            self.scope.holding_id().cloned(),
            self.scope.company_id().cloned(),
            self.scope.department_id().cloned(),
        ))
    }
}
