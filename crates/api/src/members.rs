//! Membership endpoints

use crate::pantry::Pantry;
use pantry_core::{ContainerId, Identity, Result, UserId};
use pantry_engine::Member;
use serde::{Deserialize, Serialize};

/// Invite a member by external identifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteRequest {
    /// Email address or phone number, resolved by the identity directory
    pub handle: String,
}

impl Pantry {
    /// List a container's direct members
    pub fn members(&self, actor: &Identity, container: ContainerId) -> Result<Vec<Member>> {
        self.hub().members(actor, container)
    }

    /// Invite a user by email or phone (owner only)
    ///
    /// On lists this also runs the cascade-sharing rule: categories used
    /// by the list and owned by the list's owner open up to the invitee.
    pub fn invite(
        &self,
        actor: &Identity,
        container: ContainerId,
        request: InviteRequest,
    ) -> Result<Member> {
        self.hub().invite_member(actor, container, &request.handle)
    }

    /// Add a member by user id (owner only)
    pub fn add_member(
        &self,
        actor: &Identity,
        container: ContainerId,
        user: UserId,
    ) -> Result<Member> {
        self.hub().grant_member(actor, container, user)
    }

    /// Remove a member
    ///
    /// Members may remove themselves; removing others is owner-only; the
    /// owner can never be removed.
    pub fn remove_member(
        &self,
        actor: &Identity,
        container: ContainerId,
        user: UserId,
    ) -> Result<()> {
        self.hub().remove_member(actor, container, user)
    }

    /// Leave a container
    pub fn leave(&self, actor: &Identity, container: ContainerId) -> Result<()> {
        self.hub().leave(actor, container)
    }
}
