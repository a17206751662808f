//! The access filter engine: listing predicates and point checks.

use std::sync::Arc;

use tracing::debug;

use orghub_core::error::{AppError, ErrorKind};
use orghub_core::result::AppResult;
use orghub_core::traits::DocumentStore;
use orghub_core::types::{
    CompanyId, DepartmentId, Predicate, ResourceKind, document, is_valid_id,
};
use orghub_database::repositories::{
    DepartmentRepository, FileRepository, FolderRepository, UserRepository,
};
use orghub_entity::DocumentEntity;
use orghub_entity::user::UserRole;

use super::predicate::scope_predicate;
use crate::scope::Scope;

/// Org ids a caller already knows about the resource being checked.
///
/// When any hint is present the point check trusts it and skips the
/// lookup of the resource's owning company or department.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessHints {
    /// Company owning the resource.
    pub company_id: Option<CompanyId>,
    /// Department owning the resource.
    pub department_id: Option<DepartmentId>,
}

impl AccessHints {
    /// No hints; the check looks the resource up.
    pub fn none() -> Self {
        Self::default()
    }

    /// Hint the owning company.
    pub fn company(company_id: CompanyId) -> Self {
        Self {
            company_id: Some(company_id),
            department_id: None,
        }
    }

    fn is_empty(&self) -> bool {
        self.company_id.is_none() && self.department_id.is_none()
    }
}

/// Company and department a department-scoped resource belongs to.
#[derive(Debug, Default)]
struct Owner {
    company_id: Option<CompanyId>,
    department_id: Option<DepartmentId>,
}

/// Derives listing predicates from scopes and authorizes single resources.
#[derive(Debug, Clone)]
pub struct AccessFilterEngine {
    departments: DepartmentRepository,
    users: UserRepository,
    folders: FolderRepository,
    files: FileRepository,
}

impl AccessFilterEngine {
    /// Create an engine reading ownership from `store`.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            departments: DepartmentRepository::new(Arc::clone(&store)),
            users: UserRepository::new(Arc::clone(&store)),
            folders: FolderRepository::new(Arc::clone(&store)),
            files: FileRepository::new(store),
        }
    }

    /// The listing predicate of `scope` for `kind`.
    pub fn filter(&self, scope: &Scope, kind: ResourceKind) -> Predicate {
        let predicate = scope_predicate(scope, kind);
        debug!(
            role = ?scope.role(),
            kind = %kind,
            deny_all = predicate.is_deny_all(),
            conditions = predicate.conditions().len(),
            "Built scope predicate"
        );
        predicate
    }

    /// Keep only the already-loaded `items` visible to `scope`.
    ///
    /// Secondary filter for callers that loaded documents without a scope
    /// predicate.
    pub fn filter_by_scope<E: DocumentEntity>(
        &self,
        scope: &Scope,
        items: Vec<E>,
    ) -> AppResult<Vec<E>> {
        let predicate = self.filter(scope, E::KIND);
        let mut visible = Vec::with_capacity(items.len());
        for item in items {
            if predicate.matches(&document::to_document(&item)?) {
                visible.push(item);
            }
        }
        Ok(visible)
    }

    /// Authorize `scope` to act on the resource `id` of `kind`.
    ///
    /// Fails with a validation error for a malformed id, with a not-found
    /// error when a department, user, folder, or file needs to be looked up
    /// and does not exist, and with an authorization error when the scope
    /// does not reach the resource.
    pub async fn validate_access(
        &self,
        scope: &Scope,
        kind: ResourceKind,
        id: &str,
        hints: &AccessHints,
    ) -> AppResult<()> {
        if !is_valid_id(id) {
            return Err(AppError::validation(format!("Invalid {kind} id: '{id}'")));
        }
        let owner = match kind {
            ResourceKind::Holding | ResourceKind::Company => Owner::default(),
            _ => self.owner_of(kind, id, hints).await?,
        };

        let Some(role) = scope.role() else {
            return Err(AppError::authorization(format!(
                "No access scope for {kind} {id}"
            )));
        };

        let allowed = match (role, kind) {
            (UserRole::Superadmin, _) => true,
            (_, ResourceKind::Holding) => same(scope.holding_id().map(|h| h.as_str()), Some(id)),
            (_, ResourceKind::Company) => same(scope.company_id().map(|c| c.as_str()), Some(id)),
            (UserRole::Admin, _) => same(
                scope.company_id().map(|c| c.as_str()),
                owner.company_id.as_ref().map(|c| c.as_str()),
            ),
            (UserRole::Director | UserRole::User, _) => same(
                scope.department_id().map(|d| d.as_str()),
                owner.department_id.as_ref().map(|d| d.as_str()),
            ),
        };

        if allowed {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Role '{role}' does not have access to {kind} {id}"
            )))
        }
    }

    /// Returns whether `scope` reaches the resource, mapping authorization
    /// failures to `false`.
    pub async fn can_access(
        &self,
        scope: &Scope,
        kind: ResourceKind,
        id: &str,
    ) -> AppResult<bool> {
        match self.validate_access(scope, kind, id, &AccessHints::none()).await {
            Ok(()) => Ok(true),
            Err(e) if e.is(ErrorKind::Authorization) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn owner_of(&self, kind: ResourceKind, id: &str, hints: &AccessHints) -> AppResult<Owner> {
        if kind == ResourceKind::Department {
            let company_id = match &hints.company_id {
                Some(company_id) => company_id.clone(),
                None => {
                    self.departments
                        .find_by_id(id)
                        .await?
                        .ok_or_else(|| not_found(kind, id))?
                        .company_id
                }
            };
            return Ok(Owner {
                company_id: Some(company_id),
                department_id: DepartmentId::parse(id).ok(),
            });
        }

        if !hints.is_empty() {
            return Ok(Owner {
                company_id: hints.company_id.clone(),
                department_id: hints.department_id.clone(),
            });
        }

        match kind {
            ResourceKind::User => {
                let user = self
                    .users
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| not_found(kind, id))?;
                Ok(Owner {
                    company_id: user.company_id,
                    department_id: user.department_id,
                })
            }
            ResourceKind::Folder => {
                let folder = self
                    .folders
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| not_found(kind, id))?;
                Ok(Owner {
                    company_id: folder.context.company_id,
                    department_id: folder.context.department_id,
                })
            }
            ResourceKind::File => {
                let file = self
                    .files
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| not_found(kind, id))?;
                Ok(Owner {
                    company_id: file.context.company_id,
                    department_id: file.context.department_id,
                })
            }
            ResourceKind::Holding | ResourceKind::Company | ResourceKind::Department => {
                Ok(Owner::default())
            }
        }
    }
}

fn same(expected: Option<&str>, actual: Option<&str>) -> bool {
    matches!((expected, actual), (Some(a), Some(b)) if a == b)
}

fn not_found(kind: ResourceKind, id: &str) -> AppError {
    AppError::not_found(format!("{kind} {id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use orghub_core::types::HoldingId;
    use orghub_database::MemoryDocumentStore;
    use orghub_entity::OrgContext;
    use orghub_entity::folder::{CreateFolder, Folder};
    use orghub_entity::org::{CreateDepartment, Department};

    struct Fixture {
        engine: AccessFilterEngine,
        company: CompanyId,
        department: Department,
        folder: Folder,
    }

    async fn fixture() -> Fixture {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let company = CompanyId::new();
        let department = CreateDepartment {
            name: "Finance".into(),
            description: None,
            company_id: company.clone(),
            manager_id: None,
        }
        .into_department();
        DepartmentRepository::new(Arc::clone(&store))
            .create(&department)
            .await
            .unwrap();

        let folder = CreateFolder {
            name: "Reports".into(),
            folder_type: "documents".into(),
            parent_id: None,
            context: OrgContext::new(None, Some(company.clone()), Some(department.id.clone())),
        }
        .into_folder();
        FolderRepository::new(Arc::clone(&store))
            .create(&folder)
            .await
            .unwrap();

        Fixture {
            engine: AccessFilterEngine::new(store),
            company,
            department,
            folder,
        }
    }

    #[tokio::test]
    async fn test_admin_department_check_uses_owning_company() {
        let fx = fixture().await;
        let own = Scope::new(UserRole::Admin, None, Some(fx.company.clone()), None);
        let other = Scope::new(UserRole::Admin, None, Some(CompanyId::new()), None);
        let dept = fx.department.id.as_str();

        fx.engine
            .validate_access(&own, ResourceKind::Department, dept, &AccessHints::none())
            .await
            .expect("own company");
        let err = fx
            .engine
            .validate_access(&other, ResourceKind::Department, dept, &AccessHints::none())
            .await
            .expect_err("other company");
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_missing_resource_is_not_found() {
        let fx = fixture().await;
        let superadmin = Scope::new(UserRole::Superadmin, None, None, None);
        let err = fx
            .engine
            .validate_access(
                &superadmin,
                ResourceKind::Folder,
                DepartmentId::new().as_str(),
                &AccessHints::none(),
            )
            .await
            .expect_err("missing folder");
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_malformed_id_is_rejected_before_lookup() {
        let fx = fixture().await;
        let own = Scope::new(UserRole::Admin, None, Some(fx.company.clone()), None);
        for kind in [ResourceKind::Department, ResourceKind::Folder, ResourceKind::Company] {
            let err = fx
                .engine
                .validate_access(&own, kind, "finance-dept", &AccessHints::none())
                .await
                .expect_err("malformed id");
            assert_eq!(err.kind, ErrorKind::Validation);
        }
        let err = fx
            .engine
            .can_access(&own, ResourceKind::Department, "0123")
            .await
            .expect_err("malformed id is not a plain denial");
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_folder_check_by_department() {
        let fx = fixture().await;
        let member = Scope::new(UserRole::User, None, None, Some(fx.department.id.clone()));
        let outsider = Scope::new(UserRole::Director, None, None, Some(DepartmentId::new()));
        let folder = fx.folder.id.as_str();

        assert!(fx.engine.can_access(&member, ResourceKind::Folder, folder).await.unwrap());
        assert!(!fx.engine.can_access(&outsider, ResourceKind::Folder, folder).await.unwrap());
        assert!(!fx
            .engine
            .can_access(&Scope::no_access(), ResourceKind::Folder, folder)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_holding_and_company_checks_compare_ids() {
        let fx = fixture().await;
        let holding = HoldingId::new();
        let director = Scope::new(
            UserRole::Director,
            Some(holding.clone()),
            Some(fx.company.clone()),
            Some(fx.department.id.clone()),
        );
        assert!(fx.engine.can_access(&director, ResourceKind::Holding, holding.as_str()).await.unwrap());
        assert!(fx.engine.can_access(&director, ResourceKind::Company, fx.company.as_str()).await.unwrap());
        assert!(!fx
            .engine
            .can_access(&director, ResourceKind::Company, CompanyId::new().as_str())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_hints_skip_lookup() {
        let fx = fixture().await;
        let admin = Scope::new(UserRole::Admin, None, Some(fx.company.clone()), None);
        let unknown_user = DepartmentId::new();
        fx.engine
            .validate_access(
                &admin,
                ResourceKind::User,
                unknown_user.as_str(),
                &AccessHints::company(fx.company.clone()),
            )
            .await
            .expect("hinted company grants access");
    }

    #[tokio::test]
    async fn test_filter_by_scope() {
        let fx = fixture().await;
        let member = Scope::new(UserRole::User, None, None, Some(fx.department.id.clone()));
        let outsider = Scope::new(UserRole::User, None, None, Some(DepartmentId::new()));

        let visible = fx
            .engine
            .filter_by_scope(&member, vec![fx.folder.clone()])
            .unwrap();
        assert_eq!(visible.len(), 1);
        assert!(fx
            .engine
            .filter_by_scope(&outsider, vec![fx.folder.clone()])
            .unwrap()
            .is_empty());
    }
}
