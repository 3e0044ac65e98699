//! Error taxonomy shared by every layer
//!
//! All checks return typed outcomes; errors are never used for unrelated
//! control flow. The variants map one-to-one onto transport-level outcomes
//! (404 / 403 / 401 / 409 / 400 / 500) without string inspection, and
//! NotFound is always checked before AccessDenied so callers can tell a
//! missing id from an unauthorized one.

use crate::types::{ContainerId, UserId};
use crate::version::Version;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Result type alias for pantry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Entity kinds named in NotFound errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A workspace container
    Workspace,
    /// A list container
    List,
    /// A category container
    Category,
    /// A product row
    Product,
    /// A list item row
    Item,
    /// A user identity
    User,
    /// A membership row
    Member,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityKind::Workspace => "workspace",
            EntityKind::List => "list",
            EntityKind::Category => "category",
            EntityKind::Product => "product",
            EntityKind::Item => "item",
            EntityKind::User => "user",
            EntityKind::Member => "member",
        };
        f.write_str(s)
    }
}

/// Error taxonomy for the collaboration engine
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// Referenced entity id does not exist
    #[error("{kind} {id} not found")]
    NotFound {
        /// What kind of entity was looked up
        kind: EntityKind,
        /// The id that resolved to nothing
        id: Uuid,
    },

    /// Entity exists but the acting user lacks the required role
    #[error("user {user} has no sufficient role in {container}")]
    AccessDenied {
        /// The acting user
        user: UserId,
        /// The container the check ran against
        container: ContainerId,
    },

    /// No valid identity attached to the request or session at all
    #[error("no authenticated identity attached to the session")]
    Unauthenticated,

    /// Supplied version token does not match the current stored version
    ///
    /// Recoverable by the client via re-fetch and retry; never auto-retried
    /// by the engine.
    #[error("stale version: client supplied {supplied}, current is {current}")]
    StaleVersion {
        /// Version the client supplied with the write
        supplied: Version,
        /// Version actually stored at validation time
        current: Version,
    },

    /// Structurally malformed input (missing item target, duplicate name, ...)
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Storage layer failure
    #[error("storage error: {0}")]
    Storage(String),
}

impl Error {
    /// Build a NotFound for any id newtype
    pub fn not_found(kind: EntityKind, id: impl Into<Uuid>) -> Self {
        Error::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Build an AccessDenied
    pub fn denied(user: UserId, container: impl Into<ContainerId>) -> Self {
        Error::AccessDenied {
            user,
            container: container.into(),
        }
    }

    /// Build an InvalidRequest
    pub fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidRequest(msg.into())
    }

    /// Build a Storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Error::Storage(msg.into())
    }

    /// Whether this is the recoverable stale-version outcome
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::StaleVersion { .. })
    }
}
