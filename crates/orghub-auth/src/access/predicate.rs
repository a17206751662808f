//! Listing predicates per role and resource kind.

use orghub_core::types::{FilterField, ID_FIELD, Predicate, ResourceKind};
use orghub_entity::context::fields;
use orghub_entity::org::fields::IS_DELETED;
use orghub_entity::user::UserRole;

use crate::scope::Scope;

/// Build the listing predicate of `scope` for documents of `kind`.
///
/// A scope missing the id its role requires yields deny-all.
pub fn scope_predicate(scope: &Scope, kind: ResourceKind) -> Predicate {
    let Some(role) = scope.role() else {
        return Predicate::deny_all();
    };

    let holding = scope.holding_id().map(|id| id.as_str());
    let company = scope.company_id().map(|id| id.as_str());
    let department = scope.department_id().map(|id| id.as_str());

    let predicate = match role {
        UserRole::Superadmin => Predicate::all(),
        UserRole::Admin => match kind {
            ResourceKind::Holding => eq_or_deny(ID_FIELD, holding),
            ResourceKind::Company => eq_or_deny(ID_FIELD, company),
            ResourceKind::Department
            | ResourceKind::User
            | ResourceKind::Folder
            | ResourceKind::File => eq_or_deny(fields::COMPANY_ID, company),
        },
        UserRole::Director | UserRole::User => match kind {
            ResourceKind::Holding => eq_or_deny(ID_FIELD, holding),
            ResourceKind::Company => eq_or_deny(ID_FIELD, company),
            ResourceKind::Department => eq_or_deny(ID_FIELD, department),
            ResourceKind::User | ResourceKind::Folder | ResourceKind::File => {
                eq_or_deny(fields::DEPARTMENT_ID, department)
            }
        },
    };

    if kind.supports_soft_delete() {
        predicate.and(FilterField::eq_bool(IS_DELETED, false))
    } else {
        predicate
    }
}

fn eq_or_deny(field: &str, value: Option<&str>) -> Predicate {
    match value {
        Some(value) => Predicate::field(FilterField::eq(field, value)),
        None => Predicate::deny_all(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orghub_core::types::{CompanyId, DepartmentId, HoldingId};

    fn admin(company: &CompanyId) -> Scope {
        Scope::new(UserRole::Admin, None, Some(company.clone()), None)
    }

    #[test]
    fn test_only_superadmin_is_unrestricted() {
        let superadmin = Scope::new(UserRole::Superadmin, None, None, None);
        for kind in [ResourceKind::User, ResourceKind::Folder, ResourceKind::File] {
            assert_eq!(scope_predicate(&superadmin, kind), Predicate::all());
        }

        let company = CompanyId::new();
        let department = DepartmentId::new();
        let others = [
            admin(&company),
            Scope::new(UserRole::Director, None, Some(company.clone()), Some(department.clone())),
            Scope::new(UserRole::User, None, None, Some(department)),
            Scope::no_access(),
        ];
        for scope in &others {
            for kind in ResourceKind::ALL {
                assert_ne!(scope_predicate(scope, kind), Predicate::all(), "{kind} {scope:?}");
            }
        }
    }

    #[test]
    fn test_superadmin_hides_soft_deleted_org_nodes() {
        let superadmin = Scope::new(UserRole::Superadmin, None, None, None);
        let predicate = scope_predicate(&superadmin, ResourceKind::Company);
        assert_eq!(
            predicate,
            Predicate::field(FilterField::eq_bool(IS_DELETED, false))
        );
    }

    #[test]
    fn test_admin_company_predicate_is_own_company() {
        let company = CompanyId::new();
        let predicate = scope_predicate(&admin(&company), ResourceKind::Company);
        assert_eq!(
            predicate,
            Predicate::field(FilterField::eq(ID_FIELD, company.as_str()))
                .and(FilterField::eq_bool(IS_DELETED, false))
        );
    }

    #[test]
    fn test_admin_lists_departments_by_company() {
        let company = CompanyId::new();
        let predicate = scope_predicate(&admin(&company), ResourceKind::Department);
        assert_eq!(
            predicate.conditions()[0],
            FilterField::eq(fields::COMPANY_ID, company.as_str())
        );
    }

    #[test]
    fn test_missing_scope_id_denies() {
        let admin_without_holding = admin(&CompanyId::new());
        assert!(scope_predicate(&admin_without_holding, ResourceKind::Holding).is_deny_all());

        let user_without_department = Scope::new(UserRole::User, None, Some(CompanyId::new()), None);
        assert!(scope_predicate(&user_without_department, ResourceKind::Folder).is_deny_all());
        assert!(!scope_predicate(&user_without_department, ResourceKind::Company).is_deny_all());

        assert!(scope_predicate(&Scope::no_access(), ResourceKind::File).is_deny_all());
    }

    #[test]
    fn test_director_holding_predicate() {
        let holding = HoldingId::new();
        let scope = Scope::new(UserRole::Director, Some(holding.clone()), None, None);
        let predicate = scope_predicate(&scope, ResourceKind::Holding);
        assert_eq!(
            predicate.conditions()[0],
            FilterField::eq(ID_FIELD, holding.as_str())
        );
    }
}
