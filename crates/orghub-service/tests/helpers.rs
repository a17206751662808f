//! Shared test helpers for service integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use orghub_auth::{Principal, Scope};
use orghub_core::config::TreeConfig;
use orghub_core::error::AppError;
use orghub_core::result::AppResult;
use orghub_core::traits::DocumentStore;
use orghub_core::types::{Document, Predicate, ResourceKind};
use orghub_database::MemoryDocumentStore;
use orghub_entity::org::{Company, Department, Holding};
use orghub_entity::user::User;
use orghub_service::folder::CreateFolderRequest;
use orghub_service::org::{CreateCompanyRequest, CreateDepartmentRequest, CreateHoldingRequest};
use orghub_service::user::CreateUserRequest;
use orghub_service::{RequestContext, Services};

/// Test application over an in-memory store.
pub struct TestApp {
    /// Backing store for direct inspection
    pub store: Arc<MemoryDocumentStore>,
    /// All services
    pub services: Services,
    /// The bootstrapped superadmin
    pub root: RequestContext,
}

/// Holding H with companies C1 and C2, departments D1 under C1 and D2
/// under C2, and one user per role.
pub struct Org {
    pub holding: Holding,
    pub c1: Company,
    pub c2: Company,
    pub d1: Department,
    pub d2: Department,
    pub admin_c1: User,
    pub director_d1: User,
    pub user_d1: User,
    pub user_d2: User,
}

impl TestApp {
    /// Create a new test application with default tree settings.
    pub async fn new() -> Self {
        Self::with_tree_config(TreeConfig::default()).await
    }

    /// Create a new test application with custom tree settings.
    pub async fn with_tree_config(tree: TreeConfig) -> Self {
        let store = Arc::new(MemoryDocumentStore::new());
        let dyn_store: Arc<dyn DocumentStore> = store.clone();
        Self::over(store, dyn_store, tree).await
    }

    /// Create a test application whose services talk to `faulty`.
    pub async fn with_store(store: Arc<MemoryDocumentStore>, faulty: Arc<dyn DocumentStore>) -> Self {
        Self::over(store, faulty, TreeConfig::default()).await
    }

    async fn over(
        store: Arc<MemoryDocumentStore>,
        services_store: Arc<dyn DocumentStore>,
        tree: TreeConfig,
    ) -> Self {
        let services = Services::new(services_store, &tree);
        let superadmin = services
            .users
            .bootstrap_superadmin("root@example.com", Some("Root".into()))
            .await
            .expect("Failed to bootstrap superadmin");
        let root = context_for(&superadmin);

        Self {
            store,
            services,
            root,
        }
    }

    /// Seed the standard two-company hierarchy.
    pub async fn seed_org(&self) -> Org {
        let holding = self.create_holding("Acme Holding").await;
        let c1 = self.create_company(&holding, "Acme Retail").await;
        let c2 = self.create_company(&holding, "Acme Logistics").await;
        let d1 = self.create_department(&c1, "Finance").await;
        let d2 = self.create_department(&c2, "Fleet").await;

        let admin_c1 = self
            .create_user("admin@c1.example.com", "admin", None, Some(&c1), None)
            .await;
        let director_d1 = self
            .create_user("director@d1.example.com", "director", None, None, Some(&d1))
            .await;
        let user_d1 = self
            .create_user("user@d1.example.com", "user", None, None, Some(&d1))
            .await;
        let user_d2 = self
            .create_user("user@d2.example.com", "user", None, None, Some(&d2))
            .await;

        Org {
            holding,
            c1,
            c2,
            d1,
            d2,
            admin_c1,
            director_d1,
            user_d1,
            user_d2,
        }
    }

    pub async fn create_holding(&self, name: &str) -> Holding {
        self.services
            .org
            .create_holding(
                &self.root,
                CreateHoldingRequest {
                    name: name.into(),
                    description: None,
                },
            )
            .await
            .expect("Failed to create holding")
    }

    pub async fn create_company(&self, holding: &Holding, name: &str) -> Company {
        self.services
            .org
            .create_company(
                &self.root,
                CreateCompanyRequest {
                    name: name.into(),
                    holding_id: holding.id.to_string(),
                    description: None,
                    admin_id: None,
                },
            )
            .await
            .expect("Failed to create company")
    }

    pub async fn create_department(&self, company: &Company, name: &str) -> Department {
        self.services
            .org
            .create_department(
                &self.root,
                CreateDepartmentRequest {
                    name: name.into(),
                    company_id: company.id.to_string(),
                    description: None,
                    manager_id: None,
                },
            )
            .await
            .expect("Failed to create department")
    }

    pub async fn create_user(
        &self,
        email: &str,
        role: &str,
        holding: Option<&Holding>,
        company: Option<&Company>,
        department: Option<&Department>,
    ) -> User {
        self.services
            .users
            .create_user(
                &self.root,
                CreateUserRequest {
                    email: email.into(),
                    full_name: None,
                    role: role.into(),
                    holding_id: holding.map(|h| h.id.to_string()),
                    company_id: company.map(|c| c.id.to_string()),
                    department_id: department.map(|d| d.id.to_string()),
                },
            )
            .await
            .expect("Failed to create user")
    }
}

/// Build the request context of a stored user.
pub fn context_for(user: &User) -> RequestContext {
    RequestContext::new(&Principal::from(user))
}

/// A context with no role at all.
pub fn anonymous() -> RequestContext {
    RequestContext::with_scope(None, Scope::no_access())
}

/// Request for a folder named `name` under `parent`.
pub fn folder_request(name: &str, parent: Option<&str>) -> CreateFolderRequest {
    CreateFolderRequest {
        name: name.into(),
        parent_id: parent.map(str::to_string),
        folder_type: None,
    }
}

/// Store wrapper whose deletes start failing after a fixed number of
/// successful ones.
#[derive(Debug)]
pub struct FaultyStore {
    inner: Arc<MemoryDocumentStore>,
    deletes_left: AtomicUsize,
}

impl FaultyStore {
    /// Wrap `inner`, allowing `deletes` successful deletes.
    pub fn failing_after(inner: Arc<MemoryDocumentStore>, deletes: usize) -> Self {
        Self {
            inner,
            deletes_left: AtomicUsize::new(deletes),
        }
    }

    /// Allow `deletes` more successful deletes.
    pub fn reset(&self, deletes: usize) {
        self.deletes_left.store(deletes, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for FaultyStore {
    fn backend(&self) -> &str {
        "faulty"
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }

    async fn find_many(
        &self,
        kind: ResourceKind,
        predicate: &Predicate,
    ) -> AppResult<Vec<Document>> {
        self.inner.find_many(kind, predicate).await
    }

    async fn find_one(&self, kind: ResourceKind, id: &str) -> AppResult<Option<Document>> {
        self.inner.find_one(kind, id).await
    }

    async fn insert(&self, kind: ResourceKind, id: &str, doc: Document) -> AppResult<()> {
        self.inner.insert(kind, id, doc).await
    }

    async fn update_fields(
        &self,
        kind: ResourceKind,
        id: &str,
        partial: Document,
    ) -> AppResult<bool> {
        self.inner.update_fields(kind, id, partial).await
    }

    async fn delete_one(&self, kind: ResourceKind, id: &str) -> AppResult<bool> {
        let allowed = self
            .deletes_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if !allowed {
            return Err(AppError::connectivity("Store unavailable"));
        }
        self.inner.delete_one(kind, id).await
    }

    async fn add_to_set(
        &self,
        kind: ResourceKind,
        id: &str,
        field: &str,
        value: &str,
    ) -> AppResult<bool> {
        self.inner.add_to_set(kind, id, field, value).await
    }

    async fn remove_from_set(
        &self,
        kind: ResourceKind,
        id: &str,
        field: &str,
        value: &str,
    ) -> AppResult<bool> {
        self.inner.remove_from_set(kind, id, field, value).await
    }
}
