//! N successful updates from version V end at exactly V + N

use crate::common::world;
use pantry::{UpdateItemRequest, UpdateListRequest, Version};

#[test]
fn each_update_advances_the_version_by_one() {
    let w = world();
    let (_, list) = w.workspace_with_list();
    assert_eq!(list.version, Version::ZERO);

    let mut version = list.version;
    for round in 0..5 {
        let updated = w
            .pantry
            .update_list(
                &w.alice,
                list.id,
                UpdateListRequest {
                    name: Some(format!("Groceries v{round}")),
                    version: Some(version),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.version, version.next());
        version = updated.version;
    }
    assert_eq!(version, Version::new(5));
}

#[test]
fn unconditional_writes_also_advance_by_one() {
    let w = world();
    let (_, list) = w.workspace_with_list();
    let item = w
        .pantry
        .add_item(
            &w.alice,
            list.id,
            pantry::AddItemRequest {
                custom_name: Some("flour".into()),
                ..Default::default()
            },
        )
        .unwrap();

    // No version supplied: version-unaware clients still move the counter.
    let updated = w
        .pantry
        .update_item(
            &w.alice,
            item.id,
            UpdateItemRequest {
                quantity: Some(2.0),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated.version, Version::new(1));
}

#[test]
fn update_that_changes_nothing_keeps_the_version() {
    let w = world();
    let (_, list) = w.workspace_with_list();

    let updated = w
        .pantry
        .update_list(
            &w.alice,
            list.id,
            UpdateListRequest {
                name: Some("Groceries".into()), // same name
                version: Some(list.version),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated.version, list.version);
}

#[test]
fn versions_are_per_entity_not_per_container() {
    let w = world();
    let (_, list) = w.workspace_with_list();
    let first = w
        .pantry
        .add_item(
            &w.alice,
            list.id,
            pantry::AddItemRequest {
                custom_name: Some("eggs".into()),
                ..Default::default()
            },
        )
        .unwrap();
    let second = w
        .pantry
        .add_item(
            &w.alice,
            list.id,
            pantry::AddItemRequest {
                custom_name: Some("butter".into()),
                ..Default::default()
            },
        )
        .unwrap();

    // Editing one item never moves its sibling's version.
    w.pantry
        .update_item(
            &w.alice,
            first.id,
            UpdateItemRequest {
                quantity: Some(12.0),
                version: Some(first.version),
                ..Default::default()
            },
        )
        .unwrap();

    let rows = w.pantry.items(&w.alice, list.id).unwrap();
    let second_now = rows.iter().find(|item| item.id == second.id).unwrap();
    assert_eq!(second_now.version, Version::ZERO);
}
