//! Trait seams between layers and to external collaborators
//!
//! The access resolver works against read-only views ([`MembershipRead`],
//! [`ContainerDirectory`]) so it can be exercised with fixtures and so the
//! storage implementation can change without breaking upper layers.
//! [`Authenticator`] and [`IdentityDirectory`] are the two external
//! collaborators: credential validation and identifier lookup live outside
//! this engine.

use crate::error::Result;
use crate::types::{ContainerId, Role, UserId, WorkspaceId};

/// An authenticated identity: user id plus display name
///
/// Produced once per session by the [`Authenticator`] and reused for every
/// request within that session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// The user's id
    pub user: UserId,
    /// Display name shown in event attribution
    pub display_name: String,
}

impl Identity {
    /// Build an identity
    pub fn new(user: UserId, display_name: impl Into<String>) -> Self {
        Self {
            user,
            display_name: display_name.into(),
        }
    }
}

/// Read-only view of the membership store
///
/// Thread safety: implementations must be safe to call concurrently.
pub trait MembershipRead: Send + Sync {
    /// The user's direct role in the container, if any
    fn role_of(&self, container: ContainerId, user: UserId) -> Option<Role>;

    /// All direct members of a container with their roles
    fn members_of(&self, container: ContainerId) -> Vec<(UserId, Role)>;
}

impl<T: MembershipRead + ?Sized> MembershipRead for std::sync::Arc<T> {
    fn role_of(&self, container: ContainerId, user: UserId) -> Option<Role> {
        (**self).role_of(container, user)
    }

    fn members_of(&self, container: ContainerId) -> Vec<(UserId, Role)> {
        (**self).members_of(container)
    }
}

/// What the directory knows about a container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerMeta {
    /// The container itself
    pub container: ContainerId,
    /// Parent workspace for workspace-scoped kinds (lists, categories)
    pub workspace: Option<WorkspaceId>,
}

/// Resolves a container id to its metadata
///
/// Returns `Error::NotFound` for ids that do not exist; the resolver relies
/// on this to check existence before authorization.
pub trait ContainerDirectory: Send + Sync {
    /// Resolve a container id, or NotFound
    fn resolve(&self, container: ContainerId) -> Result<ContainerMeta>;
}

impl<T: ContainerDirectory + ?Sized> ContainerDirectory for std::sync::Arc<T> {
    fn resolve(&self, container: ContainerId) -> Result<ContainerMeta> {
        (**self).resolve(container)
    }
}

/// External collaborator: validates a bearer credential once per session
///
/// The engine never sees passwords, OTPs, or token internals; it hands the
/// opaque credential to this trait and gets an identity or
/// `Error::Unauthenticated` back.
pub trait Authenticator: Send + Sync {
    /// Validate a bearer credential and return the attached identity
    fn authenticate(&self, token: &str) -> Result<Identity>;
}

/// External collaborator: resolves an invite handle (email, phone) to a user
///
/// Returns `Error::NotFound` with [`crate::EntityKind::User`] when the
/// handle resolves to nobody.
pub trait IdentityDirectory: Send + Sync {
    /// Look up a user by external identifier
    fn resolve_handle(&self, handle: &str) -> Result<Identity>;
}
