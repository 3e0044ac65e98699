//! The access resolver

use pantry_core::{
    ContainerDirectory, ContainerId, ContainerKind, Error, MembershipRead, Result, Role, UserId,
};
use tracing::debug;

/// How a container kind resolves effective membership
///
/// Selected per container kind: workspaces carry only their own members;
/// lists and categories additionally inherit access from their parent
/// workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipStrategy {
    /// Only the container's own membership rows count
    Direct,
    /// A direct row wins; otherwise any role in the parent workspace
    /// grants editor-level access
    DirectOrParent,
}

impl MembershipStrategy {
    /// The strategy for a container kind
    pub const fn for_kind(kind: ContainerKind) -> Self {
        match kind {
            ContainerKind::Workspace => MembershipStrategy::Direct,
            ContainerKind::List | ContainerKind::Category => MembershipStrategy::DirectOrParent,
        }
    }
}

/// Resolves read/write/owner questions for (user, container) pairs
///
/// Pure with respect to its inputs: the only state consulted is the
/// membership view and the container directory, so the resolver can be
/// exercised against fixture stores without an engine.
#[derive(Debug, Clone)]
pub struct AccessResolver<M, D> {
    memberships: M,
    directory: D,
}

impl<M, D> AccessResolver<M, D>
where
    M: MembershipRead,
    D: ContainerDirectory,
{
    /// Build a resolver over a membership view and container directory
    pub fn new(memberships: M, directory: D) -> Self {
        Self {
            memberships,
            directory,
        }
    }

    /// The user's effective role in the container, after existence check
    ///
    /// A direct membership row always wins. For workspace-scoped kinds a
    /// parent-workspace role of any level grants Editor here: ownership
    /// never flows downward, so workspace owners cannot, for example,
    /// delete a list another member owns inside it without holding the
    /// list's own owner row.
    pub fn effective_role(
        &self,
        user: UserId,
        container: ContainerId,
    ) -> Result<Option<Role>> {
        let meta = self.directory.resolve(container)?;

        if let Some(role) = self.memberships.role_of(container, user) {
            return Ok(Some(role));
        }

        if MembershipStrategy::for_kind(container.kind()) == MembershipStrategy::DirectOrParent {
            if let Some(workspace) = meta.workspace {
                if self
                    .memberships
                    .role_of(ContainerId::Workspace(workspace), user)
                    .is_some()
                {
                    return Ok(Some(Role::Editor));
                }
            }
        }

        Ok(None)
    }

    /// Whether the user may read the container
    pub fn can_read(&self, user: UserId, container: ContainerId) -> Result<bool> {
        Ok(self.effective_role(user, container)?.is_some())
    }

    /// Whether the user may mutate content in the container
    ///
    /// Today any member role carries write access; the separate entry point
    /// exists so the role model can tighten without touching callers.
    pub fn can_write(&self, user: UserId, container: ContainerId) -> Result<bool> {
        Ok(self.effective_role(user, container)?.is_some())
    }

    /// Whether the user holds the owner role directly in this container
    pub fn is_owner(&self, user: UserId, container: ContainerId) -> Result<bool> {
        self.directory.resolve(container)?;
        Ok(self
            .memberships
            .role_of(container, user)
            .is_some_and(|role| role.is_owner()))
    }

    /// Existence check then read access, or a typed error
    pub fn require_readable(&self, user: UserId, container: ContainerId) -> Result<()> {
        if self.can_read(user, container)? {
            Ok(())
        } else {
            debug!(%user, %container, "read denied");
            Err(Error::AccessDenied { user, container })
        }
    }

    /// Existence check then write access, or a typed error
    pub fn require_writable(&self, user: UserId, container: ContainerId) -> Result<()> {
        if self.can_write(user, container)? {
            Ok(())
        } else {
            debug!(%user, %container, "write denied");
            Err(Error::AccessDenied { user, container })
        }
    }

    /// Existence check then owner role, or a typed error
    ///
    /// Gates destructive operations: container deletion and managing other
    /// members' roles.
    pub fn require_owner(&self, user: UserId, container: ContainerId) -> Result<()> {
        if self.is_owner(user, container)? {
            Ok(())
        } else {
            debug!(%user, %container, "owner role required");
            Err(Error::AccessDenied { user, container })
        }
    }
}
