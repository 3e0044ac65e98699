//! Version validation and the guarded update path

use chrono::{DateTime, Utc};
use pantry_core::{Error, Result, Version, Versioned};
use pantry_storage::EntityStore;
use std::hash::Hash;
use tracing::trace;
use uuid::Uuid;

/// Validates client-supplied version tokens against stored versions
///
/// The guard itself is pure; atomicity comes from running it inside the
/// entity's storage critical section (see [`guarded_update`]).
#[derive(Debug, Clone, Copy)]
pub struct VersionGuard;

impl VersionGuard {
    /// Accept or reject a mutation, computing the next version on success
    ///
    /// - `client` absent: unconditional write, validation skipped. The
    ///   caller may overwrite a concurrent change; this is the documented
    ///   contract for version-unaware clients.
    /// - `client` equal to `current`: mutation may apply; the entity moves
    ///   to `current + 1`.
    /// - anything else: stale, the mutation must not be applied.
    pub fn check(client: Option<Version>, current: Version) -> Result<Version> {
        match client {
            None => Ok(current.next()),
            Some(supplied) if supplied == current => Ok(current.next()),
            Some(supplied) => Err(Error::StaleVersion { supplied, current }),
        }
    }
}

/// Validate, mutate, and bump as one indivisible step
///
/// Runs inside the entity's per-row critical section: the version compare,
/// the field mutation, and the version increment cannot interleave with a
/// concurrent writer on the same entity. Different entities never contend.
///
/// `mutate` returns whether any persisted field actually changed; when it
/// returns false the version and the updated-at stamp stay untouched.
/// `mutate` must validate before mutating; on error the row is left as it
/// was.
///
/// Returns the row as committed (with the new version on change).
pub fn guarded_update<K, T>(
    store: &EntityStore<K, T>,
    id: &K,
    client: Option<Version>,
    at: DateTime<Utc>,
    mutate: impl FnOnce(&mut T) -> Result<bool>,
) -> Result<T>
where
    K: Eq + Hash + Copy + Into<Uuid>,
    T: Clone + Versioned,
{
    store.update_with(id, |row| {
        let next = VersionGuard::check(client, row.version())?;
        let changed = mutate(row)?;
        if changed {
            *row.version_mut() = next;
            row.touch(at);
            let entity: Uuid = (*id).into();
            trace!(%entity, version = %next, "entity updated");
        }
        Ok(row.clone())
    })
}
