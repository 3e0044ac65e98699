//! Identifier and membership vocabulary types
//!
//! Every entity is addressed by a UUID-v4 newtype. Containers (the entities
//! that carry their own membership) are additionally addressable through
//! [`ContainerId`], a kind-tagged id whose display form doubles as the
//! real-time topic name (`<kind>/<uuid>`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random id using UUID v4
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID
            pub const fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            /// Parse from the standard UUID string form
            ///
            /// Returns None if the string is not a valid UUID.
            pub fn from_string(s: &str) -> Option<Self> {
                Uuid::parse_str(s).ok().map(Self)
            }

            /// Get the raw UUID
            pub const fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

entity_id!(
    /// Unique identifier for a user
    ///
    /// Users are owned by the external identity subsystem and referenced
    /// by id everywhere in this engine.
    UserId
);

entity_id!(
    /// Unique identifier for a workspace
    WorkspaceId
);

entity_id!(
    /// Unique identifier for a shopping list
    ListId
);

entity_id!(
    /// Unique identifier for a product category
    CategoryId
);

entity_id!(
    /// Unique identifier for a product
    ProductId
);

entity_id!(
    /// Unique identifier for a list item
    ItemId
);

/// Membership role within a container
///
/// There is no hierarchy beyond these two: editors mutate content but may
/// not delete the container or manage other members' roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Full control: delete the container, manage membership
    Owner,
    /// Read and mutate content
    Editor,
}

impl Role {
    /// Whether this role gates destructive and membership-managing operations
    #[inline]
    pub const fn is_owner(&self) -> bool {
        matches!(self, Role::Owner)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Owner => write!(f, "owner"),
            Role::Editor => write!(f, "editor"),
        }
    }
}

/// Kinds of container: entities that carry their own membership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerKind {
    /// Top-level sharing boundary grouping lists and categories
    Workspace,
    /// A shopping list
    List,
    /// A labeled grouping of products
    Category,
}

impl ContainerKind {
    /// Stable lowercase name, used in topic names
    pub const fn as_str(&self) -> &'static str {
        match self {
            ContainerKind::Workspace => "workspace",
            ContainerKind::List => "list",
            ContainerKind::Category => "category",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContainerKind {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "workspace" => Ok(ContainerKind::Workspace),
            "list" => Ok(ContainerKind::List),
            "category" => Ok(ContainerKind::Category),
            _ => Err(()),
        }
    }
}

/// Kind-tagged container id
///
/// The display form is `<kind>/<uuid>`, which is also the topic name a
/// session subscribes to for that container's change events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerId {
    /// A workspace container
    Workspace(WorkspaceId),
    /// A list container
    List(ListId),
    /// A category container
    Category(CategoryId),
}

impl ContainerId {
    /// The container's kind
    pub const fn kind(&self) -> ContainerKind {
        match self {
            ContainerId::Workspace(_) => ContainerKind::Workspace,
            ContainerId::List(_) => ContainerKind::List,
            ContainerId::Category(_) => ContainerKind::Category,
        }
    }

    /// The untagged UUID
    pub const fn as_uuid(&self) -> Uuid {
        match self {
            ContainerId::Workspace(id) => id.as_uuid(),
            ContainerId::List(id) => id.as_uuid(),
            ContainerId::Category(id) => id.as_uuid(),
        }
    }

    /// Rebuild a container id from a kind and an untagged UUID
    pub const fn from_parts(kind: ContainerKind, id: Uuid) -> Self {
        match kind {
            ContainerKind::Workspace => ContainerId::Workspace(WorkspaceId::from_uuid(id)),
            ContainerKind::List => ContainerId::List(ListId::from_uuid(id)),
            ContainerKind::Category => ContainerId::Category(CategoryId::from_uuid(id)),
        }
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind(), self.as_uuid())
    }
}

impl From<WorkspaceId> for ContainerId {
    fn from(id: WorkspaceId) -> Self {
        ContainerId::Workspace(id)
    }
}

impl From<ListId> for ContainerId {
    fn from(id: ListId) -> Self {
        ContainerId::List(id)
    }
}

impl From<CategoryId> for ContainerId {
    fn from(id: CategoryId) -> Self {
        ContainerId::Category(id)
    }
}
