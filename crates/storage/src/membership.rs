//! Durable mapping of (container, user) to role
//!
//! One DashMap entry per container holding a small FxHashMap of members.
//! Grant/revoke run under the container's entry lock, so concurrent
//! membership changes on the same container cannot interleave; different
//! containers never contend.

use dashmap::DashMap;
use pantry_core::{ContainerId, MembershipRead, Role, UserId};
use rustc_hash::FxHashMap;
use tracing::debug;

/// The membership store: (container, user) → role
#[derive(Debug, Default)]
pub struct MembershipStore {
    containers: DashMap<ContainerId, FxHashMap<UserId, Role>>,
}

impl MembershipStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant a role, returning the previous role if the user already had one
    ///
    /// Granting over an existing row replaces the role (idempotent for the
    /// same role).
    pub fn grant(&self, container: ContainerId, user: UserId, role: Role) -> Option<Role> {
        let previous = self
            .containers
            .entry(container)
            .or_default()
            .insert(user, role);
        debug!(%container, %user, %role, "membership granted");
        previous
    }

    /// Revoke a user's role, returning it if they had one
    pub fn revoke(&self, container: ContainerId, user: UserId) -> Option<Role> {
        let removed = self
            .containers
            .get_mut(&container)
            .and_then(|mut members| members.remove(&user));
        if removed.is_some() {
            debug!(%container, %user, "membership revoked");
        }
        removed
    }

    /// Drop every membership row for a container (container deletion)
    pub fn remove_container(&self, container: ContainerId) {
        self.containers.remove(&container);
    }

    /// Number of members in a container
    pub fn member_count(&self, container: ContainerId) -> usize {
        self.containers
            .get(&container)
            .map(|members| members.len())
            .unwrap_or(0)
    }

    /// All containers in which the user holds any direct role
    ///
    /// Full scan; membership maps are small and the scan avoids a second
    /// user-keyed index that would need to be kept transactionally in sync.
    pub fn containers_of(&self, user: UserId) -> Vec<(ContainerId, Role)> {
        self.containers
            .iter()
            .filter_map(|entry| {
                entry
                    .value()
                    .get(&user)
                    .map(|role| (*entry.key(), *role))
            })
            .collect()
    }

    /// The user's direct role in the container, if any
    pub fn role_of(&self, container: ContainerId, user: UserId) -> Option<Role> {
        self.containers
            .get(&container)
            .and_then(|members| members.get(&user).copied())
    }

    /// All direct members of a container with their roles
    pub fn members_of(&self, container: ContainerId) -> Vec<(UserId, Role)> {
        self.containers
            .get(&container)
            .map(|members| members.iter().map(|(user, role)| (*user, *role)).collect())
            .unwrap_or_default()
    }
}

impl MembershipRead for MembershipStore {
    fn role_of(&self, container: ContainerId, user: UserId) -> Option<Role> {
        MembershipStore::role_of(self, container, user)
    }

    fn members_of(&self, container: ContainerId) -> Vec<(UserId, Role)> {
        MembershipStore::members_of(self, container)
    }
}
