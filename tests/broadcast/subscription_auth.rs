//! Subscribe-time authorization: no identity, no access, no events

use crate::common::world;
use pantry::{ContainerId, Error, ListId};

#[test]
fn connect_requires_a_valid_credential() {
    let w = world();
    assert_eq!(
        w.pantry.connect("forged-token").unwrap_err(),
        Error::Unauthenticated
    );
    assert!(w.pantry.connect("alice-token").is_ok());
}

#[test]
fn member_subscription_is_admitted() {
    let w = world();
    let (_, list) = w.workspace_with_list();
    let session = w.pantry.connect("alice-token").unwrap();

    let sub = w
        .pantry
        .subscribe(&session, &format!("list/{}", list.id))
        .unwrap();
    assert_eq!(sub.topic().container(), ContainerId::List(list.id));
}

#[test]
fn non_member_subscription_is_rejected() {
    let w = world();
    let (workspace, list) = w.workspace_with_list();
    let session = w.pantry.connect("mallory-token").unwrap();

    // Knowing the id is not enough; the read check runs per subscribe.
    assert!(matches!(
        w.pantry
            .subscribe(&session, &format!("list/{}", list.id))
            .unwrap_err(),
        Error::AccessDenied { .. }
    ));
    assert!(matches!(
        w.pantry
            .subscribe(&session, &format!("workspace/{}", workspace.id))
            .unwrap_err(),
        Error::AccessDenied { .. }
    ));
}

#[test]
fn guessed_container_ids_leak_nothing() {
    let w = world();
    let session = w.pantry.connect("mallory-token").unwrap();

    // A non-existent id is NotFound, which is indistinguishable from an
    // id the transport chose to hide; either way, no subscription.
    let err = w
        .pantry
        .subscribe(&session, &format!("list/{}", ListId::new()))
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[test]
fn malformed_topic_names_are_invalid_requests() {
    let w = world();
    let session = w.pantry.connect("alice-token").unwrap();

    for bad in ["groceries", "list/", "list/xyz", "drawer/definitely-not"] {
        assert!(matches!(
            w.pantry.subscribe(&session, bad).unwrap_err(),
            Error::InvalidRequest(_)
        ));
    }
}

#[test]
fn revoked_member_cannot_resubscribe() {
    let w = world();
    let (_, list) = w.workspace_with_list();
    let container = ContainerId::List(list.id);
    w.pantry.add_member(&w.alice, container, w.bob.user).unwrap();

    let session = w.pantry.connect("bob-token").unwrap();
    let topic = format!("list/{}", list.id);
    assert!(w.pantry.subscribe(&session, &topic).is_ok());

    w.pantry
        .remove_member(&w.alice, container, w.bob.user)
        .unwrap();

    // The next handshake re-runs the check against current membership.
    assert!(matches!(
        w.pantry.subscribe(&session, &topic).unwrap_err(),
        Error::AccessDenied { .. }
    ));
}
