//! Two writers, one version token: exactly one winner

use crate::common::world;
use pantry::{Error, UpdateListRequest, Version};
use std::sync::Arc;
use std::thread;

#[test]
fn stale_writer_is_rejected_and_leaves_no_trace() {
    let w = world();
    let (_, list) = w.workspace_with_list();

    // Both writers read version 0. The first one in commits.
    let winner = w
        .pantry
        .update_list(
            &w.alice,
            list.id,
            UpdateListRequest {
                name: Some("Weekend shop".into()),
                version: Some(Version::ZERO),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(winner.version, Version::new(1));

    // The second one still holds version 0 and is turned away.
    let err = w
        .pantry
        .update_list(
            &w.alice,
            list.id,
            UpdateListRequest {
                name: Some("Weekday shop".into()),
                version: Some(Version::ZERO),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert_eq!(
        err,
        Error::StaleVersion {
            supplied: Version::ZERO,
            current: Version::new(1),
        }
    );

    // Persisted state reflects only the winner.
    let row = w.pantry.list(&w.alice, list.id).unwrap();
    assert_eq!(row.name, "Weekend shop");
    assert_eq!(row.version, Version::new(1));
}

#[test]
fn re_fetch_and_retry_recovers_from_conflict() {
    let w = world();
    let (_, list) = w.workspace_with_list();

    w.pantry
        .update_list(
            &w.alice,
            list.id,
            UpdateListRequest {
                name: Some("First".into()),
                version: Some(Version::ZERO),
                ..Default::default()
            },
        )
        .unwrap();

    let stale = w.pantry.update_list(
        &w.alice,
        list.id,
        UpdateListRequest {
            name: Some("Second".into()),
            version: Some(Version::ZERO),
            ..Default::default()
        },
    );
    assert!(stale.unwrap_err().is_conflict());

    // The documented client recovery: re-fetch, then resubmit.
    let current = w.pantry.list(&w.alice, list.id).unwrap();
    let retried = w
        .pantry
        .update_list(
            &w.alice,
            list.id,
            UpdateListRequest {
                name: Some("Second".into()),
                version: Some(current.version),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(retried.name, "Second");
    assert_eq!(retried.version, Version::new(2));
}

#[test]
fn concurrent_writers_with_the_same_token_produce_one_winner() {
    let w = world();
    let (_, list) = w.workspace_with_list();
    let pantry = Arc::new(w.pantry.clone());

    let mut handles = Vec::new();
    for i in 0..4 {
        let pantry = Arc::clone(&pantry);
        let alice = w.alice.clone();
        let list_id = list.id;
        handles.push(thread::spawn(move || {
            pantry.update_list(
                &alice,
                list_id,
                UpdateListRequest {
                    name: Some(format!("writer-{i}")),
                    version: Some(Version::ZERO),
                    ..Default::default()
                },
            )
        }));
    }

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winners = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(err) if err.is_conflict()))
        .count();
    assert_eq!(winners, 1);
    assert_eq!(conflicts, 3);

    let row = w.pantry.list(&w.alice, list.id).unwrap();
    assert_eq!(row.version, Version::new(1));
    assert!(row.name.starts_with("writer-"));
}

#[test]
fn delete_with_stale_version_is_rejected() {
    let w = world();
    let (_, list) = w.workspace_with_list();

    w.pantry
        .update_list(
            &w.alice,
            list.id,
            UpdateListRequest {
                name: Some("Renamed".into()),
                version: Some(Version::ZERO),
                ..Default::default()
            },
        )
        .unwrap();

    let err = w
        .pantry
        .delete_list(&w.alice, list.id, Some(Version::ZERO))
        .unwrap_err();
    assert!(err.is_conflict());
    assert!(w.pantry.list(&w.alice, list.id).is_ok());
}
