//! Every failure class is a distinct, recognizable outcome

use crate::common::world;
use pantry::{
    AddItemRequest, CreateCategoryRequest, CreateProductRequest, Error, ListId,
    UpdateCategoryRequest, UpdateListRequest, Version,
};

#[test]
fn unauthenticated_is_distinct_from_denied() {
    let w = world();
    assert_eq!(
        w.pantry.authenticate("forged").unwrap_err(),
        Error::Unauthenticated
    );

    // A known identity without membership is AccessDenied, never
    // Unauthenticated.
    let (_, list) = w.workspace_with_list();
    assert!(matches!(
        w.pantry.list(&w.mallory, list.id).unwrap_err(),
        Error::AccessDenied { .. }
    ));
}

#[test]
fn not_found_is_checked_before_authorization() {
    let w = world();
    // Mallory has no access to anything, yet a dead id still reads as
    // NotFound so the implementer can tell the cases apart.
    assert!(matches!(
        w.pantry.list(&w.mallory, ListId::new()).unwrap_err(),
        Error::NotFound { .. }
    ));
}

#[test]
fn conflict_is_not_a_validation_error() {
    let w = world();
    let (_, list) = w.workspace_with_list();
    w.pantry
        .update_list(
            &w.alice,
            list.id,
            UpdateListRequest {
                name: Some("Bumped".into()),
                version: Some(Version::ZERO),
                ..Default::default()
            },
        )
        .unwrap();

    let err = w
        .pantry
        .update_list(
            &w.alice,
            list.id,
            UpdateListRequest {
                name: Some("Stale".into()),
                version: Some(Version::ZERO),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(err.is_conflict());
    assert!(!matches!(err, Error::InvalidRequest(_)));
}

#[test]
fn item_without_target_is_invalid() {
    let w = world();
    let (_, list) = w.workspace_with_list();

    let err = w
        .pantry
        .add_item(&w.alice, list.id, AddItemRequest::default())
        .unwrap_err();
    assert!(matches!(err, Error::InvalidRequest(_)));
}

#[test]
fn item_with_both_targets_is_invalid() {
    let w = world();
    let (workspace, list) = w.workspace_with_list();
    let (_, product) = w.category_with_product(&w.alice, workspace.id, "Dairy", "Milk");

    let err = w
        .pantry
        .add_item(
            &w.alice,
            list.id,
            AddItemRequest {
                product: Some(product.id),
                custom_name: Some("also milk".into()),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, Error::InvalidRequest(_)));
}

#[test]
fn duplicate_category_name_is_invalid() {
    let w = world();
    let workspace = w.workspace();
    w.pantry
        .create_category(
            &w.alice,
            CreateCategoryRequest {
                workspace: workspace.id,
                name: "Dairy".into(),
            },
        )
        .unwrap();

    // Case differences do not make it a different name.
    let err = w
        .pantry
        .create_category(
            &w.alice,
            CreateCategoryRequest {
                workspace: workspace.id,
                name: "dairy".into(),
            },
        )
        .unwrap_err();
    assert!(matches!(err, Error::InvalidRequest(_)));
}

#[test]
fn duplicate_product_name_is_scoped_to_the_category() {
    let w = world();
    let workspace = w.workspace();
    let (category, _) = w.category_with_product(&w.alice, workspace.id, "Dairy", "Milk");

    let err = w
        .pantry
        .create_product(
            &w.alice,
            CreateProductRequest {
                category: category.id,
                name: "Milk".into(),
                default_unit: None,
            },
        )
        .unwrap_err();
    assert!(matches!(err, Error::InvalidRequest(_)));

    // The same name is fine one category over.
    let (other_category, _) =
        w.category_with_product(&w.alice, workspace.id, "Plant-based", "Oat drink");
    w.pantry
        .create_product(
            &w.alice,
            CreateProductRequest {
                category: other_category.id,
                name: "Milk".into(),
                default_unit: None,
            },
        )
        .unwrap();
}

#[test]
fn blank_names_are_invalid() {
    let w = world();
    let workspace = w.workspace();

    let err = w
        .pantry
        .create_list(
            &w.alice,
            pantry::CreateListRequest {
                workspace: workspace.id,
                name: "   ".into(),
            },
        )
        .unwrap_err();
    assert!(matches!(err, Error::InvalidRequest(_)));
}

#[test]
fn category_rename_is_owner_gated() {
    let w = world();
    let workspace = w.workspace();
    let (category, _) = w.category_with_product(&w.alice, workspace.id, "Dairy", "Milk");
    w.pantry
        .add_member(&w.alice, pantry::ContainerId::Workspace(workspace.id), w.bob.user)
        .unwrap();

    // Bob's derived editor access cannot rename (uniqueness-affecting).
    let err = w
        .pantry
        .update_category(
            &w.bob,
            category.id,
            UpdateCategoryRequest {
                name: Some("Cheese".into()),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, Error::AccessDenied { .. }));

    // Non-name fields are open to editors.
    w.pantry
        .update_category(
            &w.bob,
            category.id,
            UpdateCategoryRequest {
                icon: Some("cheese-wedge".into()),
                ..Default::default()
            },
        )
        .unwrap();
}

#[test]
fn renaming_a_product_backed_item_is_invalid() {
    let w = world();
    let (workspace, list) = w.workspace_with_list();
    let (_, product) = w.category_with_product(&w.alice, workspace.id, "Dairy", "Milk");
    let item = w
        .pantry
        .add_item(
            &w.alice,
            list.id,
            AddItemRequest {
                product: Some(product.id),
                ..Default::default()
            },
        )
        .unwrap();

    let err = w
        .pantry
        .update_item(
            &w.alice,
            item.id,
            pantry::UpdateItemRequest {
                custom_name: Some("moo juice".into()),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, Error::InvalidRequest(_)));
}
