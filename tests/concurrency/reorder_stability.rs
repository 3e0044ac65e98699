//! Reordering bumps exactly the rows whose position changed

use crate::common::world;
use pantry::{AddItemRequest, ItemId, ListItem, Version};

fn seeded_items(w: &crate::common::World, list: pantry::ListId, names: &[&str]) -> Vec<ListItem> {
    names
        .iter()
        .map(|name| {
            w.pantry
                .add_item(
                    &w.alice,
                    list,
                    AddItemRequest {
                        custom_name: Some((*name).into()),
                        ..Default::default()
                    },
                )
                .unwrap()
        })
        .collect()
}

#[test]
fn reorder_to_identical_order_changes_nothing() {
    let w = world();
    let (_, list) = w.workspace_with_list();
    let items = seeded_items(&w, list.id, &["bread", "milk", "jam"]);

    let order: Vec<ItemId> = items.iter().map(|item| item.id).collect();
    w.pantry.reorder_items(&w.alice, list.id, &order).unwrap();

    for (before, after) in items.iter().zip(w.pantry.items(&w.alice, list.id).unwrap()) {
        assert_eq!(after.id, before.id);
        assert_eq!(after.version, Version::ZERO);
        assert_eq!(after.sort_order, before.sort_order);
    }
}

#[test]
fn genuine_reorder_moves_positions_and_nothing_else() {
    let w = world();
    let (_, list) = w.workspace_with_list();
    let items = seeded_items(&w, list.id, &["bread", "milk", "jam"]);

    // jam first; bread and milk slide down.
    let order = vec![items[2].id, items[0].id, items[1].id];
    w.pantry.reorder_items(&w.alice, list.id, &order).unwrap();

    let rows = w.pantry.items(&w.alice, list.id).unwrap();
    let names: Vec<_> = rows
        .iter()
        .map(|item| match &item.target {
            pantry::ItemTarget::Named(name) => name.clone(),
            pantry::ItemTarget::Product(_) => unreachable!(),
        })
        .collect();
    assert_eq!(names, ["jam", "bread", "milk"]);

    // Moved rows advanced by exactly one; no other field moved.
    for row in &rows {
        assert_eq!(row.version, Version::new(1));
        assert!(!row.crossed_off);
        assert_eq!(row.quantity, None);
    }
}

#[test]
fn swap_leaves_untouched_sibling_at_version_zero() {
    let w = world();
    let (_, list) = w.workspace_with_list();
    let items = seeded_items(&w, list.id, &["bread", "milk", "jam"]);

    // Swap the first two; jam keeps position 2 and version 0.
    let order = vec![items[1].id, items[0].id, items[2].id];
    w.pantry.reorder_items(&w.alice, list.id, &order).unwrap();

    let rows = w.pantry.items(&w.alice, list.id).unwrap();
    let jam = rows.iter().find(|item| item.id == items[2].id).unwrap();
    assert_eq!(jam.version, Version::ZERO);

    let bread = rows.iter().find(|item| item.id == items[0].id).unwrap();
    assert_eq!(bread.version, Version::new(1));
}

#[test]
fn lists_reorder_follows_the_same_rule() {
    let w = world();
    let workspace = w.workspace();
    let mut lists = Vec::new();
    for name in ["Groceries", "Hardware", "Pharmacy"] {
        lists.push(
            w.pantry
                .create_list(
                    &w.alice,
                    pantry::CreateListRequest {
                        workspace: workspace.id,
                        name: name.into(),
                    },
                )
                .unwrap(),
        );
    }

    let same: Vec<_> = lists.iter().map(|list| list.id).collect();
    w.pantry
        .reorder_lists(&w.alice, workspace.id, &same)
        .unwrap();
    for row in w.pantry.lists(&w.alice, workspace.id).unwrap() {
        assert_eq!(row.version, Version::ZERO);
    }

    let rotated = vec![lists[2].id, lists[0].id, lists[1].id];
    w.pantry
        .reorder_lists(&w.alice, workspace.id, &rotated)
        .unwrap();
    let rows = w.pantry.lists(&w.alice, workspace.id).unwrap();
    let names: Vec<_> = rows.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, ["Pharmacy", "Groceries", "Hardware"]);
}
