//! Integration tests for scope-filtered listing across the org hierarchy.

mod helpers;

use serde_json::json;

use orghub_auth::{Principal, Scope};
use orghub_core::error::ErrorKind;
use orghub_core::traits::DocumentStore;
use orghub_core::types::ResourceKind;
use orghub_entity::user::{UserRole, UserStatus};
use orghub_service::RequestContext;

use helpers::{TestApp, anonymous, context_for};

#[tokio::test]
async fn test_only_superadmin_filter_is_unrestricted() {
    let app = TestApp::new().await;
    let org = app.seed_org().await;

    let scopes = [
        (context_for(&org.admin_c1).scope, false),
        (context_for(&org.director_d1).scope, false),
        (context_for(&org.user_d1).scope, false),
        (Scope::no_access(), false),
        (app.root.scope.clone(), true),
    ];

    for (scope, unrestricted) in scopes {
        for kind in ResourceKind::ALL {
            let predicate = app.services.access.filter(&scope, kind);
            let only_soft_delete = !predicate.is_deny_all()
                && predicate
                    .conditions()
                    .iter()
                    .all(|c| c.field == "is_deleted");
            assert_eq!(
                only_soft_delete,
                unrestricted,
                "role {:?} on {kind}",
                scope.role()
            );
        }
    }
}

#[tokio::test]
async fn test_admin_sees_exactly_own_company() {
    let app = TestApp::new().await;
    let org = app.seed_org().await;
    let admin = context_for(&org.admin_c1);

    let companies = app.services.org.list_companies(&admin, None).await.unwrap();
    let ids: Vec<_> = companies.iter().map(|c| c.id.clone()).collect();
    assert_eq!(ids, vec![org.c1.id.clone()]);

    assert!(app
        .services
        .org
        .get_company(&admin, org.c2.id.as_str())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_admin_lists_only_departments_of_own_company() {
    let app = TestApp::new().await;
    let org = app.seed_org().await;
    let admin = context_for(&org.admin_c1);

    let departments = app.services.org.list_departments(&admin, None).await.unwrap();
    let ids: Vec<_> = departments.iter().map(|d| d.id.clone()).collect();
    assert_eq!(ids, vec![org.d1.id.clone()]);
}

#[tokio::test]
async fn test_department_member_sees_own_department_and_company() {
    let app = TestApp::new().await;
    let org = app.seed_org().await;
    let user = context_for(&org.user_d1);

    let departments = app.services.org.list_departments(&user, None).await.unwrap();
    assert_eq!(departments.len(), 1);
    assert_eq!(departments[0].id, org.d1.id);

    let companies = app.services.org.list_companies(&user, None).await.unwrap();
    assert_eq!(companies.len(), 1);
    assert_eq!(companies[0].id, org.c1.id);

    let holdings = app.services.org.list_holdings(&user).await.unwrap();
    assert_eq!(holdings.len(), 1);
    assert_eq!(holdings[0].id, org.holding.id);
}

#[tokio::test]
async fn test_superadmin_sees_everything_live() {
    let app = TestApp::new().await;
    let org = app.seed_org().await;

    assert_eq!(app.services.org.list_companies(&app.root, None).await.unwrap().len(), 2);
    assert_eq!(app.services.org.list_departments(&app.root, None).await.unwrap().len(), 2);

    app.services
        .org
        .delete_department(&app.root, org.d2.id.as_str())
        .await
        .unwrap();
    let departments = app.services.org.list_departments(&app.root, None).await.unwrap();
    assert_eq!(departments.len(), 1);
    assert_eq!(departments[0].id, org.d1.id);
}

#[tokio::test]
async fn test_unknown_role_and_inactive_principal_see_nothing() {
    let app = TestApp::new().await;
    let org = app.seed_org().await;

    let unknown = RequestContext::new(&Principal {
        company_id: Some(org.c1.id.clone()),
        ..Principal::with_role("auditor")
    });
    let inactive = RequestContext::new(&Principal {
        is_active: false,
        ..Principal::from(&org.admin_c1)
    });

    for ctx in [unknown, inactive, anonymous()] {
        assert!(ctx.scope.is_no_access());
        assert!(app.services.org.list_companies(&ctx, None).await.unwrap().is_empty());
        assert!(app.services.org.list_departments(&ctx, None).await.unwrap().is_empty());
        assert!(app.services.users.list_users(&ctx, None).await.unwrap().is_empty());
        assert!(app.services.folders.list_folders(&ctx).await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_user_listing_follows_role() {
    let app = TestApp::new().await;
    let org = app.seed_org().await;

    let admin_view = app
        .services
        .users
        .list_users(&context_for(&org.admin_c1), None)
        .await
        .unwrap();
    let mut emails: Vec<_> = admin_view.iter().map(|u| u.email.as_str()).collect();
    emails.sort();
    assert_eq!(
        emails,
        vec![
            "admin@c1.example.com",
            "director@d1.example.com",
            "user@d1.example.com"
        ]
    );

    let director_view = app
        .services
        .users
        .list_users(&context_for(&org.director_d1), None)
        .await
        .unwrap();
    assert!(director_view
        .iter()
        .all(|u| u.department_id.as_ref() == Some(&org.d1.id)));
    assert_eq!(director_view.len(), 2);
}

#[tokio::test]
async fn test_role_strings_resolve_case_insensitively() {
    let app = TestApp::new().await;
    let org = app.seed_org().await;

    let ctx = RequestContext::new(&Principal {
        company_id: Some(org.c1.id.clone()),
        ..Principal::with_role("ADMIN")
    });
    assert_eq!(ctx.scope.role(), Some(UserRole::Admin));
    assert_eq!(app.services.org.list_departments(&ctx, None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_listings_narrow_by_parent() {
    let app = TestApp::new().await;
    let org = app.seed_org().await;
    let globex = app.create_holding("Globex").await;
    let labs = app.create_company(&globex, "Globex Labs").await;

    let acme = app
        .services
        .org
        .list_companies(&app.root, Some(org.holding.id.as_str()))
        .await
        .unwrap();
    assert_eq!(acme.len(), 2);
    let other = app
        .services
        .org
        .list_companies(&app.root, Some(globex.id.as_str()))
        .await
        .unwrap();
    assert_eq!(other.len(), 1);
    assert_eq!(other[0].id, labs.id);

    let admin = context_for(&org.admin_c1);
    assert!(app
        .services
        .org
        .list_companies(&admin, Some(globex.id.as_str()))
        .await
        .unwrap()
        .is_empty());

    let fleet = app
        .services
        .org
        .list_departments(&app.root, Some(org.c2.id.as_str()))
        .await
        .unwrap();
    assert_eq!(fleet.len(), 1);
    assert_eq!(fleet[0].id, org.d2.id);
    assert!(app
        .services
        .org
        .list_departments(&admin, Some(org.c2.id.as_str()))
        .await
        .unwrap()
        .is_empty());

    let err = app
        .services
        .org
        .list_departments(&app.root, Some("not-an-id"))
        .await
        .expect_err("malformed company id");
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_user_listing_by_status() {
    let app = TestApp::new().await;
    let org = app.seed_org().await;

    let blocked = json!({ "is_active": false });
    let updated = app
        .store
        .update_fields(
            ResourceKind::User,
            org.user_d1.id.as_str(),
            blocked.as_object().cloned().unwrap(),
        )
        .await
        .unwrap();
    assert!(updated);

    let admin = context_for(&org.admin_c1);
    let active = app
        .services
        .users
        .list_users(&admin, Some(UserStatus::Active))
        .await
        .unwrap();
    let mut emails: Vec<_> = active.iter().map(|u| u.email.as_str()).collect();
    emails.sort();
    assert_eq!(emails, vec!["admin@c1.example.com", "director@d1.example.com"]);

    let blocked = app
        .services
        .users
        .list_users(&admin, Some(UserStatus::Blocked))
        .await
        .unwrap();
    assert_eq!(blocked.len(), 1);
    assert_eq!(blocked[0].id, org.user_d1.id);
    assert_eq!(app.services.users.list_users(&admin, None).await.unwrap().len(), 3);
}
