//! Deletions never leave dangling children behind

use crate::common::world;
use pantry::{AddItemRequest, Error};

#[test]
fn deleting_a_product_removes_items_referencing_it() {
    let w = world();
    let (workspace, list) = w.workspace_with_list();
    let (_, product) = w.category_with_product(&w.alice, workspace.id, "Dairy", "Milk");

    w.pantry
        .add_item(
            &w.alice,
            list.id,
            AddItemRequest {
                product: Some(product.id),
                ..Default::default()
            },
        )
        .unwrap();
    w.pantry
        .add_item(
            &w.alice,
            list.id,
            AddItemRequest {
                custom_name: Some("bread".into()),
                ..Default::default()
            },
        )
        .unwrap();

    w.pantry.delete_product(&w.alice, product.id, None).unwrap();

    // The product-backed row is gone; the custom row survives.
    let rows = w.pantry.items(&w.alice, list.id).unwrap();
    assert_eq!(rows.len(), 1);
    assert!(matches!(rows[0].target, pantry::ItemTarget::Named(_)));
}

#[test]
fn deleting_a_category_removes_products_and_their_items() {
    let w = world();
    let (workspace, list) = w.workspace_with_list();
    let (category, product) =
        w.category_with_product(&w.alice, workspace.id, "Dairy", "Milk");
    w.pantry
        .add_item(
            &w.alice,
            list.id,
            AddItemRequest {
                product: Some(product.id),
                ..Default::default()
            },
        )
        .unwrap();

    w.pantry
        .delete_category(&w.alice, category.id, None)
        .unwrap();

    assert!(matches!(
        w.pantry.category(&w.alice, category.id).unwrap_err(),
        Error::NotFound { .. }
    ));
    assert!(matches!(
        w.pantry.product(&w.alice, product.id).unwrap_err(),
        Error::NotFound { .. }
    ));
    assert!(w.pantry.items(&w.alice, list.id).unwrap().is_empty());
}

#[test]
fn deleting_a_list_removes_items_and_memberships() {
    let w = world();
    let (_, list) = w.workspace_with_list();
    let container = pantry::ContainerId::List(list.id);
    w.pantry.add_member(&w.alice, container, w.bob.user).unwrap();
    let item = w
        .pantry
        .add_item(
            &w.alice,
            list.id,
            AddItemRequest {
                custom_name: Some("bread".into()),
                ..Default::default()
            },
        )
        .unwrap();

    w.pantry.delete_list(&w.alice, list.id, None).unwrap();

    assert!(matches!(
        w.pantry.list(&w.alice, list.id).unwrap_err(),
        Error::NotFound { .. }
    ));
    assert!(matches!(
        w.pantry.item(&w.alice, item.id).unwrap_err(),
        Error::NotFound { .. }
    ));
    // Bob's direct membership went with the list.
    assert!(w.pantry.shared_lists(&w.bob).unwrap().is_empty());
}

#[test]
fn deleting_a_workspace_takes_everything_down() {
    let w = world();
    let (workspace, list) = w.workspace_with_list();
    let (category, product) =
        w.category_with_product(&w.alice, workspace.id, "Dairy", "Milk");
    w.pantry
        .add_item(
            &w.alice,
            list.id,
            AddItemRequest {
                product: Some(product.id),
                ..Default::default()
            },
        )
        .unwrap();

    w.pantry
        .delete_workspace(&w.alice, workspace.id, None)
        .unwrap();

    for err in [
        w.pantry.workspace(&w.alice, workspace.id).unwrap_err(),
        w.pantry.list(&w.alice, list.id).unwrap_err(),
        w.pantry.category(&w.alice, category.id).unwrap_err(),
        w.pantry.product(&w.alice, product.id).unwrap_err(),
    ] {
        assert!(matches!(err, Error::NotFound { .. }));
    }

    // Topics for dead containers reject subscriptions as NotFound.
    let session = w.pantry.connect("alice-token").unwrap();
    assert!(matches!(
        w.pantry
            .subscribe(&session, &format!("list/{}", list.id))
            .unwrap_err(),
        Error::NotFound { .. }
    ));
}

#[test]
fn cross_workspace_product_references_are_cleaned_up() {
    let w = world();

    // Mallory's catalog, shared with alice at the category level.
    let theirs = w
        .pantry
        .create_workspace(
            &w.mallory,
            pantry::CreateWorkspaceRequest {
                name: "Mallory's".into(),
                icon: None,
            },
        )
        .unwrap();
    let (their_category, their_product) =
        w.category_with_product(&w.mallory, theirs.id, "Spices", "Saffron");
    w.pantry
        .add_member(
            &w.mallory,
            pantry::ContainerId::Category(their_category.id),
            w.alice.user,
        )
        .unwrap();

    // Alice's list references it.
    let (_, list) = w.workspace_with_list();
    w.pantry
        .add_item(
            &w.alice,
            list.id,
            AddItemRequest {
                product: Some(their_product.id),
                ..Default::default()
            },
        )
        .unwrap();

    // Mallory tears their workspace down; alice's list must not keep a
    // row pointing at a product that no longer exists.
    w.pantry.delete_workspace(&w.mallory, theirs.id, None).unwrap();
    assert!(w.pantry.items(&w.alice, list.id).unwrap().is_empty());
}
