//! Integration tests for breadcrumb paths and nested folder trees.

mod helpers;

use orghub_core::config::TreeConfig;
use orghub_core::error::ErrorKind;
use orghub_core::types::FolderId;
use orghub_entity::folder::Folder;
use orghub_service::RequestContext;
use orghub_service::file::RegisterFileRequest;
use orghub_service::folder::MoveFolderRequest;

use helpers::{TestApp, context_for, folder_request};

/// Create a chain of nested folders named after their depth.
async fn chain(app: &TestApp, ctx: &RequestContext, depth: usize) -> Vec<Folder> {
    let mut folders: Vec<Folder> = Vec::with_capacity(depth);
    for level in 1..=depth {
        let parent = folders.last().map(|f| f.id.to_string());
        let folder = app
            .services
            .folders
            .create_folder(ctx, folder_request(&format!("L{level}"), parent.as_deref()))
            .await
            .unwrap();
        folders.push(folder);
    }
    folders
}

#[tokio::test]
async fn test_path_has_one_entry_per_level_plus_home() {
    let app = TestApp::new().await;
    let org = app.seed_org().await;
    let u1 = context_for(&org.user_d1);
    let folders = chain(&app, &u1, 4).await;

    for (index, folder) in folders.iter().enumerate() {
        let depth = index + 1;
        let path = app
            .services
            .tree
            .get_path(&u1, folder.id.as_str())
            .await
            .unwrap()
            .expect("visible folder");
        assert_eq!(path.len(), depth + 1);
        assert_eq!(path[0].id, None);
        assert_eq!(path[0].name, "Home");
        assert_eq!(path.last().unwrap().id.as_ref(), Some(&folder.id));
    }

    let names: Vec<_> = app
        .services
        .tree
        .get_path(&u1, folders[3].id.as_str())
        .await
        .unwrap()
        .unwrap()
        .into_iter()
        .map(|item| item.name)
        .collect();
    assert_eq!(names, vec!["Home", "L1", "L2", "L3", "L4"]);
}

#[tokio::test]
async fn test_path_out_of_scope_or_missing_is_none() {
    let app = TestApp::new().await;
    let org = app.seed_org().await;
    let folders = chain(&app, &context_for(&org.user_d1), 2).await;

    let outsider = context_for(&org.user_d2);
    assert!(app
        .services
        .tree
        .get_path(&outsider, folders[1].id.as_str())
        .await
        .unwrap()
        .is_none());
    assert!(app
        .services
        .tree
        .get_path(&app.root, FolderId::new().as_str())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_path_custom_root_label_and_depth_limit() {
    let app = TestApp::with_tree_config(TreeConfig {
        max_depth: 3,
        root_label: "Knowledge Base".into(),
    })
    .await;
    let org = app.seed_org().await;
    let u1 = context_for(&org.user_d1);
    let folders = chain(&app, &u1, 5).await;

    let shallow = app
        .services
        .tree
        .get_path(&u1, folders[2].id.as_str())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(shallow[0].name, "Knowledge Base");
    assert_eq!(shallow.len(), 4);

    let err = app
        .services
        .tree
        .get_path(&u1, folders[4].id.as_str())
        .await
        .expect_err("too deep");
    assert_eq!(err.kind, ErrorKind::Structural);
}

#[tokio::test]
async fn test_path_through_parent_cycle_is_structural() {
    let app = TestApp::new().await;
    let org = app.seed_org().await;
    let u1 = context_for(&org.user_d1);
    let folders = chain(&app, &u1, 2).await;

    app.services
        .folders
        .move_folder(
            &u1,
            folders[0].id.as_str(),
            MoveFolderRequest {
                new_parent_id: Some(folders[1].id.to_string()),
            },
        )
        .await
        .unwrap();

    let err = app
        .services
        .tree
        .get_path(&u1, folders[0].id.as_str())
        .await
        .expect_err("cycle");
    assert_eq!(err.kind, ErrorKind::Structural);
}

#[tokio::test]
async fn test_tree_nests_children_with_file_counts() {
    let app = TestApp::new().await;
    let org = app.seed_org().await;
    let u1 = context_for(&org.user_d1);

    let root = app
        .services
        .folders
        .create_folder(&u1, folder_request("Root", None))
        .await
        .unwrap();
    let mut children = Vec::new();
    for name in ["Beta", "Alpha"] {
        children.push(
            app.services
                .folders
                .create_folder(&u1, folder_request(name, Some(root.id.as_str())))
                .await
                .unwrap(),
        );
    }
    let grandchild = app
        .services
        .folders
        .create_folder(&u1, folder_request("Deep", Some(children[0].id.as_str())))
        .await
        .unwrap();
    for name in ["x.txt", "y.txt"] {
        app.services
            .files
            .register_file(
                &u1,
                RegisterFileRequest {
                    filename: name.into(),
                    folder_id: Some(grandchild.id.to_string()),
                    file_key: format!("kb/{name}"),
                    file_type: "text/plain".into(),
                    file_size: 10,
                    description: None,
                    tags: Vec::new(),
                },
            )
            .await
            .unwrap();
    }

    let tree = app
        .services
        .tree
        .get_tree(&u1, root.id.as_str())
        .await
        .unwrap()
        .expect("visible root");
    assert_eq!(tree.id, root.id);
    assert_eq!(tree.total_folders(), 4);
    assert_eq!(tree.file_count, 0);

    let names: Vec<_> = tree.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Beta"]);
    let beta = &tree.children[1];
    assert_eq!(beta.children.len(), 1);
    assert_eq!(beta.children[0].id, grandchild.id);
    assert_eq!(beta.children[0].file_count, 2);

    assert!(app
        .services
        .tree
        .get_tree(&context_for(&org.user_d2), root.id.as_str())
        .await
        .unwrap()
        .is_none());
}
