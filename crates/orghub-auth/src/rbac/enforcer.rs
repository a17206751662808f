//! Minimum-role enforcement.

use orghub_core::error::AppError;
use orghub_entity::user::UserRole;

use crate::scope::Scope;

/// Checks a scope's role against the role an operation requires.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleEnforcer;

impl RoleEnforcer {
    /// Creates a new enforcer.
    pub fn new() -> Self {
        Self
    }

    /// Checks that `scope` holds at least `minimum`.
    ///
    /// Returns `Ok(())` if allowed, or an authorization error if denied. The
    /// no-access scope is always denied.
    pub fn require_minimum_role(&self, scope: &Scope, minimum: UserRole) -> Result<(), AppError> {
        match scope.role() {
            Some(role) if role.has_at_least(&minimum) => Ok(()),
            Some(role) => Err(AppError::authorization(format!(
                "Role '{role}' is insufficient; minimum required: '{minimum}'"
            ))),
            None => Err(AppError::authorization(format!(
                "No role assigned; minimum required: '{minimum}'"
            ))),
        }
    }

    /// Checks that `scope` may modify resources at all.
    pub fn require_modify(&self, scope: &Scope) -> Result<(), AppError> {
        self.require_minimum_role(scope, UserRole::Director)
    }

    /// Checks that `scope` is unrestricted.
    pub fn require_superadmin(&self, scope: &Scope) -> Result<(), AppError> {
        self.require_minimum_role(scope, UserRole::Superadmin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orghub_core::error::ErrorKind;
    use orghub_core::types::DepartmentId;

    #[test]
    fn test_minimum_role() {
        let enforcer = RoleEnforcer::new();
        let director = Scope::new(UserRole::Director, None, None, Some(DepartmentId::new()));
        assert!(enforcer.require_modify(&director).is_ok());
        assert!(enforcer.require_minimum_role(&director, UserRole::Admin).is_err());

        let user = Scope::new(UserRole::User, None, None, Some(DepartmentId::new()));
        let err = enforcer.require_modify(&user).expect_err("read-only role");
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[test]
    fn test_no_access_scope_is_denied() {
        let err = RoleEnforcer::new()
            .require_minimum_role(&Scope::no_access(), UserRole::User)
            .expect_err("no role");
        assert!(err.message.contains("No role"));
    }
}
