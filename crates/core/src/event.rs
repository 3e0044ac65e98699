//! Event payloads
//!
//! Two distinct event families:
//!
//! - [`ChangeEvent`]: what the broadcaster fans out to subscribed sessions.
//!   Carries enough for a client to update its view or show an attribution
//!   toast without an extra round trip.
//! - [`DomainEvent`]: in-process notifications dispatched synchronously on
//!   the engine's domain bus. Side-effecting rules (cascade sharing) register
//!   as handlers instead of living inline in the mutation path.

use crate::traits::Identity;
use crate::types::{ContainerId, Role, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What happened to the affected entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// Entity was created
    Created,
    /// Entity fields changed
    Updated,
    /// Entity was deleted
    Deleted,
}

/// Affected entity: id plus a human-readable label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    /// The entity's id
    pub id: Uuid,
    /// Display label at the time of the change
    pub label: String,
}

impl EntityRef {
    /// Build a reference from any id newtype and a label
    pub fn new(id: impl Into<Uuid>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// The acting user, as shown in attribution toasts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Acting user's id
    pub user: UserId,
    /// Acting user's display name
    pub display_name: String,
}

impl From<&Identity> for Actor {
    fn from(identity: &Identity) -> Self {
        Self {
            user: identity.user,
            display_name: identity.display_name.clone(),
        }
    }
}

/// Fan-out payload delivered to subscribed sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// What happened
    pub kind: EventKind,
    /// The affected entity
    pub entity: EntityRef,
    /// The container whose topic carried this event
    pub container: ContainerId,
    /// Who did it
    pub actor: Actor,
    /// When it was committed
    pub at: DateTime<Utc>,
}

/// In-process domain notification
///
/// Dispatched synchronously, in commit order, after the triggering mutation
/// has been committed and its change event published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainEvent {
    /// A user gained membership in a container
    MembershipGranted {
        /// The container the role was granted in
        container: ContainerId,
        /// The user who gained the role
        user: UserId,
        /// Display label for the new member, for event attribution
        user_label: String,
        /// The granted role
        role: Role,
        /// Who performed the grant
        granted_by: Actor,
    },
    /// A user lost membership in a container
    MembershipRevoked {
        /// The container the role was revoked in
        container: ContainerId,
        /// The user who lost the role
        user: UserId,
        /// Who performed the removal (the member themself on leave)
        revoked_by: Actor,
    },
}
