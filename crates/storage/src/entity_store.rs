//! Typed entity rows behind a sharded map
//!
//! # Design
//!
//! - DashMap: 16-way sharded by default, lock-free reads
//! - Per-entity updates run under the entry's shard lock, so a mutation
//!   closure observes a stable row and no second writer can interleave
//! - Rows are cloned out on read; callers never hold references into the map
//!
//! The per-entry critical section is the storage half of optimistic
//! concurrency: the version guard runs inside `update_with`, making the
//! compare and the increment a single indivisible step (the in-memory
//! equivalent of `UPDATE ... WHERE id = ? AND version = ?`).

use dashmap::DashMap;
use pantry_core::{EntityKind, Error, Result, Version, Versioned};
use std::hash::Hash;
use uuid::Uuid;

/// Sharded map of typed entity rows
///
/// `K` is one of the id newtypes; `T` is the entity row. The store knows its
/// entity kind so lookups can produce precise NotFound errors.
#[derive(Debug)]
pub struct EntityStore<K: Eq + Hash, T> {
    kind: EntityKind,
    rows: DashMap<K, T>,
}

impl<K, T> EntityStore<K, T>
where
    K: Eq + Hash + Copy + Into<Uuid>,
    T: Clone,
{
    /// Create an empty store for the given entity kind
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            rows: DashMap::new(),
        }
    }

    /// The entity kind this store holds
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Insert a freshly created row
    ///
    /// Ids are UUID v4; a collision would mean the caller reused an id.
    pub fn insert(&self, id: K, row: T) -> Result<()> {
        if self.rows.insert(id, row).is_some() {
            return Err(Error::storage(format!(
                "duplicate {} id {}",
                self.kind,
                id.into()
            )));
        }
        Ok(())
    }

    /// Clone out the current row, if present
    pub fn get(&self, id: &K) -> Option<T> {
        self.rows.get(id).map(|row| row.clone())
    }

    /// Clone out the current row, or NotFound
    pub fn require(&self, id: &K) -> Result<T> {
        self.get(id)
            .ok_or_else(|| Error::not_found(self.kind, (*id).into()))
    }

    /// Whether a row exists for this id
    pub fn contains(&self, id: &K) -> bool {
        self.rows.contains_key(id)
    }

    /// Mutate a row under its entry lock
    ///
    /// The closure runs while the entry's shard lock is held: no concurrent
    /// writer can observe or modify the row until it returns. Errors from
    /// the closure leave the row untouched only if the closure itself did
    /// not touch it, so closures must validate before mutating.
    pub fn update_with<R>(&self, id: &K, f: impl FnOnce(&mut T) -> Result<R>) -> Result<R> {
        match self.rows.get_mut(id) {
            Some(mut row) => f(row.value_mut()),
            None => Err(Error::not_found(self.kind, (*id).into())),
        }
    }

    /// Remove a row, returning it if it existed
    pub fn remove(&self, id: &K) -> Option<T> {
        self.rows.remove(id).map(|(_, row)| row)
    }

    /// Remove a row, or NotFound
    pub fn take(&self, id: &K) -> Result<T> {
        self.remove(id)
            .ok_or_else(|| Error::not_found(self.kind, (*id).into()))
    }

    /// Remove a row only if the client's version token still matches
    ///
    /// The version compare and the removal are atomic with respect to
    /// concurrent writers: a writer that bumps the version between our
    /// check and our removal makes the removal miss, and we re-examine.
    /// An absent client version removes unconditionally.
    pub fn take_guarded(&self, id: &K, client: Option<Version>) -> Result<T>
    where
        T: Versioned,
    {
        loop {
            let removed = self.rows.remove_if(id, |_, row| match client {
                None => true,
                Some(supplied) => supplied == row.version(),
            });
            if let Some((_, row)) = removed {
                return Ok(row);
            }
            match self.get(id) {
                None => return Err(Error::not_found(self.kind, (*id).into())),
                Some(row) => {
                    let current = row.version();
                    if let Some(supplied) = client {
                        if supplied != current {
                            return Err(Error::StaleVersion { supplied, current });
                        }
                    }
                    // The row moved back to the expected version between
                    // the failed removal and the re-read; try again.
                }
            }
        }
    }

    /// Clone out all rows matching a predicate
    ///
    /// Full scan; fine for the in-process store where sibling sets are
    /// small (lists in a workspace, items on a list).
    pub fn collect_where(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows
            .iter()
            .filter(|entry| pred(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Remove all rows matching a predicate, returning them
    ///
    /// Used by cascading deletes (items before lists, products before
    /// categories).
    pub fn remove_where(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        let victims: Vec<K> = self
            .rows
            .iter()
            .filter(|entry| pred(entry.value()))
            .map(|entry| *entry.key())
            .collect();
        victims
            .into_iter()
            .filter_map(|id| self.remove(&id))
            .collect()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
