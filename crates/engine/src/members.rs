//! Membership operations
//!
//! The rules, in the order they are checked:
//! - the container must exist (NotFound before anything else),
//! - anyone may remove themself, except the owner,
//! - only the owner may add or remove other members,
//! - the owner can never be removed, by anyone, themself included —
//!   delete the container instead. A container therefore always keeps at
//!   least one member.

use crate::hub::Hub;
use chrono::Utc;
use pantry_core::{
    Actor, ContainerId, DomainEvent, EntityKind, EntityRef, Error, EventKind, Identity, Result,
    Role, UserId,
};
use tracing::info;

/// One membership row, as listed to clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// The member's user id
    pub user: UserId,
    /// The member's role
    pub role: Role,
}

impl Hub {
    /// List a container's direct members
    pub fn members(&self, actor: &Identity, container: ContainerId) -> Result<Vec<Member>> {
        self.resolver().require_readable(actor.user, container)?;
        let mut rows: Vec<Member> = self
            .stores()
            .memberships
            .members_of(container)
            .into_iter()
            .map(|(user, role)| Member { user, role })
            .collect();
        rows.sort_by_key(|member| member.user);
        Ok(rows)
    }

    /// Invite a user by external identifier (email, phone)
    ///
    /// Owner only. The handle is resolved through the identity directory;
    /// the new member joins as editor. On lists, the cascade-sharing rule
    /// runs as part of the same operation.
    pub fn invite_member(
        &self,
        actor: &Identity,
        container: ContainerId,
        handle: &str,
    ) -> Result<Member> {
        self.resolver().require_owner(actor.user, container)?;
        let invitee = self.identities().resolve_handle(handle)?;
        self.admit(actor, container, invitee.user, &invitee.display_name)
    }

    /// Add a member by user id
    ///
    /// Owner only; same path as invite, minus the handle resolution.
    pub fn grant_member(
        &self,
        actor: &Identity,
        container: ContainerId,
        user: UserId,
    ) -> Result<Member> {
        self.resolver().require_owner(actor.user, container)?;
        self.admit(actor, container, user, &user.to_string())
    }

    fn admit(
        &self,
        actor: &Identity,
        container: ContainerId,
        user: UserId,
        user_label: &str,
    ) -> Result<Member> {
        if self.stores().memberships.role_of(container, user).is_some() {
            return Err(Error::invalid("already a member of this container"));
        }
        self.commit_grant(actor, container, user, user_label, Role::Editor, Utc::now())?;
        Ok(Member {
            user,
            role: Role::Editor,
        })
    }

    /// Remove a member from a container
    ///
    /// Self-removal is open to every non-owner member; removing someone
    /// else requires the owner role; removing the owner is rejected for
    /// everyone.
    pub fn remove_member(
        &self,
        actor: &Identity,
        container: ContainerId,
        target: UserId,
    ) -> Result<()> {
        // Existence, then the actor's own access: membership details are
        // not disclosed to users who cannot read the container.
        self.resolver().require_readable(actor.user, container)?;

        let Some(target_role) = self.stores().memberships.role_of(container, target) else {
            return Err(Error::not_found(EntityKind::Member, target));
        };
        if target_role.is_owner() {
            return Err(Error::invalid(
                "the owner cannot be removed; delete the container or transfer it first",
            ));
        }
        if target != actor.user {
            self.resolver().require_owner(actor.user, container)?;
        }

        self.stores().memberships.revoke(container, target);
        info!(%container, user = %target, "member removed");
        let at = Utc::now();
        self.publish_change(
            EventKind::Deleted,
            EntityRef::new(target, target.to_string()),
            &[container],
            actor,
            at,
        );
        self.dispatch(&DomainEvent::MembershipRevoked {
            container,
            user: target,
            revoked_by: Actor::from(actor),
        })
    }

    /// Leave a container (self-removal)
    pub fn leave(&self, actor: &Identity, container: ContainerId) -> Result<()> {
        self.remove_member(actor, container, actor.user)
    }
}
