//! Inviting a user to a list auto-shares the inviter's own categories

use crate::common::world;
use pantry::{AddItemRequest, ContainerId, CreateWorkspaceRequest, InviteRequest, Role};

#[test]
fn list_invite_grants_editor_on_referenced_categories() {
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
        .invite(
            &w.alice,
            ContainerId::List(list.id),
            InviteRequest {
                handle: "bob@example.com".into(),
            },
        )
        .unwrap();

    // Bob can now see and edit the category the list draws from.
    let members = w
        .pantry
        .members(&w.alice, ContainerId::Category(category.id))
        .unwrap();
    assert!(members
        .iter()
        .any(|m| m.user == w.bob.user && m.role == Role::Editor));
    assert_eq!(w.pantry.category(&w.bob, category.id).unwrap().id, category.id);

    let shared = w.pantry.shared_categories(&w.bob).unwrap();
    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0].id, category.id);
}

#[test]
fn third_party_categories_are_never_touched() {
    let w = world();

    // Mallory owns a category and shares it (category only) with alice.
    let their_workspace = w
        .pantry
        .create_workspace(
            &w.mallory,
            CreateWorkspaceRequest {
                name: "Mallory's".into(),
                icon: None,
            },
        )
        .unwrap();
    let (their_category, their_product) =
        w.category_with_product(&w.mallory, their_workspace.id, "Spices", "Saffron");
    w.pantry
        .add_member(
            &w.mallory,
            ContainerId::Category(their_category.id),
            w.alice.user,
        )
        .unwrap();

    // Alice builds a list on top of mallory's catalog and invites bob.
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
    w.pantry
        .invite(
            &w.alice,
            ContainerId::List(list.id),
            InviteRequest {
                handle: "bob@example.com".into(),
            },
        )
        .unwrap();

    // Bob got the list, but mallory's category is not alice's to share.
    let members = w
        .pantry
        .members(&w.mallory, ContainerId::Category(their_category.id))
        .unwrap();
    assert!(!members.iter().any(|m| m.user == w.bob.user));
    assert!(w.pantry.shared_categories(&w.bob).unwrap().is_empty());
}

#[test]
fn cascade_is_one_shot() {
    let w = world();
    let (workspace, list) = w.workspace_with_list();
    let (first_category, first_product) =
        w.category_with_product(&w.alice, workspace.id, "Dairy", "Milk");
    w.pantry
        .add_item(
            &w.alice,
            list.id,
            AddItemRequest {
                product: Some(first_product.id),
                ..Default::default()
            },
        )
        .unwrap();
    w.pantry
        .invite(
            &w.alice,
            ContainerId::List(list.id),
            InviteRequest {
                handle: "bob@example.com".into(),
            },
        )
        .unwrap();

    // Items added after the grant do not re-trigger sharing.
    let (second_category, second_product) =
        w.category_with_product(&w.alice, workspace.id, "Bakery", "Rye bread");
    w.pantry
        .add_item(
            &w.alice,
            list.id,
            AddItemRequest {
                product: Some(second_product.id),
                ..Default::default()
            },
        )
        .unwrap();

    let members = w
        .pantry
        .members(&w.alice, ContainerId::Category(second_category.id))
        .unwrap();
    assert!(!members.iter().any(|m| m.user == w.bob.user));

    // And losing the list does not claw back what was granted.
    w.pantry
        .remove_member(&w.alice, ContainerId::List(list.id), w.bob.user)
        .unwrap();
    let members = w
        .pantry
        .members(&w.alice, ContainerId::Category(first_category.id))
        .unwrap();
    assert!(members.iter().any(|m| m.user == w.bob.user));
}

#[test]
fn existing_membership_is_left_alone() {
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

    // Bob already belongs to the category before the list invite.
    w.pantry
        .add_member(&w.alice, ContainerId::Category(category.id), w.bob.user)
        .unwrap();
    w.pantry
        .invite(
            &w.alice,
            ContainerId::List(list.id),
            InviteRequest {
                handle: "bob@example.com".into(),
            },
        )
        .unwrap();

    // Exactly one membership row for bob, not a duplicate or a demotion.
    let bobs: Vec<_> = w
        .pantry
        .members(&w.alice, ContainerId::Category(category.id))
        .unwrap()
        .into_iter()
        .filter(|m| m.user == w.bob.user)
        .collect();
    assert_eq!(bobs.len(), 1);
}

#[test]
fn custom_named_items_trigger_no_sharing() {
    let w = world();
    let (_, list) = w.workspace_with_list();
    w.pantry
        .add_item(
            &w.alice,
            list.id,
            AddItemRequest {
                custom_name: Some("mystery jar".into()),
                ..Default::default()
            },
        )
        .unwrap();

    w.pantry
        .invite(
            &w.alice,
            ContainerId::List(list.id),
            InviteRequest {
                handle: "bob@example.com".into(),
            },
        )
        .unwrap();
    assert!(w.pantry.shared_categories(&w.bob).unwrap().is_empty());
}
