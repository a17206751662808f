//! Integration tests for user bootstrap, creation, and principal loading.

mod helpers;

use orghub_core::error::ErrorKind;
use orghub_core::types::UserId;
use orghub_entity::user::UserRole;
use orghub_service::RequestContext;
use orghub_service::user::CreateUserRequest;

use helpers::{TestApp, context_for};

fn request(email: &str, role: &str) -> CreateUserRequest {
    CreateUserRequest {
        email: email.into(),
        full_name: None,
        role: role.into(),
        holding_id: None,
        company_id: None,
        department_id: None,
    }
}

#[tokio::test]
async fn test_bootstrap_only_once() {
    let app = TestApp::new().await;

    let err = app
        .services
        .users
        .bootstrap_superadmin("second@example.com", None)
        .await
        .expect_err("already bootstrapped");
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_department_assignment_derives_company_and_holding() {
    let app = TestApp::new().await;
    let org = app.seed_org().await;

    assert_eq!(org.user_d1.company_id, Some(org.c1.id.clone()));
    assert_eq!(org.user_d1.holding_id, Some(org.holding.id.clone()));
    assert_eq!(org.admin_c1.holding_id, Some(org.holding.id.clone()));
    assert_eq!(org.admin_c1.department_id, None);
}

#[tokio::test]
async fn test_assignment_rules_per_role() {
    let app = TestApp::new().await;
    let org = app.seed_org().await;

    let err = app
        .services
        .users
        .create_user(&app.root, request("a@example.com", "admin"))
        .await
        .expect_err("admin without company");
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = app
        .services
        .users
        .create_user(
            &app.root,
            CreateUserRequest {
                company_id: Some(org.c2.id.to_string()),
                department_id: Some(org.d1.id.to_string()),
                ..request("b@example.com", "user")
            },
        )
        .await
        .expect_err("department outside company");
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = app
        .services
        .users
        .create_user(&app.root, request("c@example.com", "auditor"))
        .await
        .expect_err("unknown role");
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = app
        .services
        .users
        .create_user(
            &app.root,
            CreateUserRequest {
                department_id: Some(org.d1.id.to_string()),
                ..request("USER@d1.example.com", "user")
            },
        )
        .await
        .expect_err("email taken");
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_admin_creates_users_only_in_own_company() {
    let app = TestApp::new().await;
    let org = app.seed_org().await;
    let admin = context_for(&org.admin_c1);

    let created = app
        .services
        .users
        .create_user(
            &admin,
            CreateUserRequest {
                department_id: Some(org.d1.id.to_string()),
                ..request("new@d1.example.com", "director")
            },
        )
        .await
        .unwrap();
    assert_eq!(created.parsed_role(), Some(UserRole::Director));

    let err = app
        .services
        .users
        .create_user(
            &admin,
            CreateUserRequest {
                department_id: Some(org.d2.id.to_string()),
                ..request("new@d2.example.com", "user")
            },
        )
        .await
        .expect_err("foreign company");
    assert_eq!(err.kind, ErrorKind::Authorization);

    let err = app
        .services
        .users
        .create_user(&admin, request("boss@example.com", "superadmin"))
        .await
        .expect_err("role above requester");
    assert_eq!(err.kind, ErrorKind::Authorization);

    let err = app
        .services
        .users
        .create_user(
            &context_for(&org.director_d1),
            CreateUserRequest {
                department_id: Some(org.d1.id.to_string()),
                ..request("peer@d1.example.com", "user")
            },
        )
        .await
        .expect_err("directors cannot create users");
    assert_eq!(err.kind, ErrorKind::Authorization);
}

#[tokio::test]
async fn test_load_principal_builds_scope() {
    let app = TestApp::new().await;
    let org = app.seed_org().await;

    let principal = app
        .services
        .users
        .load_principal(org.director_d1.id.as_str())
        .await
        .unwrap();
    let ctx = RequestContext::new(&principal);
    assert_eq!(ctx.scope.role(), Some(UserRole::Director));
    assert_eq!(ctx.scope.department_id(), Some(&org.d1.id));
    assert_eq!(ctx.actor(), org.director_d1.id.to_string());

    let err = app
        .services
        .users
        .load_principal(UserId::new().as_str())
        .await
        .expect_err("unknown user");
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_get_user_hides_out_of_scope() {
    let app = TestApp::new().await;
    let org = app.seed_org().await;

    let director = context_for(&org.director_d1);
    assert!(app
        .services
        .users
        .get_user(&director, org.user_d1.id.as_str())
        .await
        .unwrap()
        .is_some());
    assert!(app
        .services
        .users
        .get_user(&director, org.user_d2.id.as_str())
        .await
        .unwrap()
        .is_none());
}
