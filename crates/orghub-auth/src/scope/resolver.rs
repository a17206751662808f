//! Principal to scope resolution.

use tracing::{debug, warn};

use orghub_entity::user::UserRole;

use super::principal::{Principal, Scope};

/// Turns principal records into scopes. Pure; performs no I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopeResolver;

impl ScopeResolver {
    /// Create a resolver.
    pub fn new() -> Self {
        Self
    }

    /// Resolve the scope of `principal`.
    ///
    /// Inactive principals and unknown or missing roles resolve to the
    /// no-access scope.
    pub fn resolve(&self, principal: &Principal) -> Scope {
        let user_id = principal
            .user_id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_default();

        if !principal.is_active {
            debug!(user_id = %user_id, "Inactive principal resolved to no-access scope");
            return Scope::no_access();
        }

        let Some(role) = principal
            .role
            .as_deref()
            .and_then(|raw| raw.parse::<UserRole>().ok())
        else {
            warn!(
                user_id = %user_id,
                role = principal.role.as_deref().unwrap_or("<none>"),
                "Unrecognized role resolved to no-access scope"
            );
            return Scope::no_access();
        };

        let missing = match role {
            UserRole::Superadmin => None,
            UserRole::Admin => principal.company_id.is_none().then_some("company_id"),
            UserRole::Director | UserRole::User => {
                principal.department_id.is_none().then_some("department_id")
            }
        };
        if let Some(field) = missing {
            warn!(user_id = %user_id, role = %role, field, "Principal is missing a required scope id");
        }

        debug!(
            user_id = %user_id,
            role = %role,
            holding_id = ?principal.holding_id,
            company_id = ?principal.company_id,
            department_id = ?principal.department_id,
            "Resolved scope"
        );

        Scope::new(
            role,
            principal.holding_id.clone(),
            principal.company_id.clone(),
            principal.department_id.clone(),
        )
    }
}
