//! Shared mutable entities
//!
//! Every entity here carries a [`Version`] and participates in optimistic
//! concurrency through the [`Versioned`] trait. Containers (workspace, list,
//! category) additionally carry their own membership, stored separately.

use crate::types::{CategoryId, ItemId, ListId, ProductId, WorkspaceId};
use crate::version::{Version, Versioned};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! versioned_entity {
    ($name:ident) => {
        impl Versioned for $name {
            fn version(&self) -> Version {
                self.version
            }

            fn version_mut(&mut self) -> &mut Version {
                &mut self.version
            }

            fn touch(&mut self, at: DateTime<Utc>) {
                self.updated_at = at;
            }
        }
    };
}

/// Top-level sharing boundary grouping lists and categories
///
/// Created with exactly one member whose role is owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    /// Unique id
    pub id: WorkspaceId,
    /// Display name
    pub name: String,
    /// Optional icon identifier
    pub icon: Option<String>,
    /// Optimistic-concurrency counter
    pub version: Version,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last successful mutation time
    pub updated_at: DateTime<Utc>,
}

impl Workspace {
    /// Create a fresh workspace at version zero
    pub fn new(name: impl Into<String>, icon: Option<String>, at: DateTime<Utc>) -> Self {
        Self {
            id: WorkspaceId::new(),
            name: name.into(),
            icon,
            version: Version::ZERO,
            created_at: at,
            updated_at: at,
        }
    }
}

versioned_entity!(Workspace);

/// A shopping list inside a workspace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    /// Unique id
    pub id: ListId,
    /// Parent workspace
    pub workspace: WorkspaceId,
    /// Display name
    pub name: String,
    /// Optional icon identifier
    pub icon: Option<String>,
    /// Optional cover image reference
    pub image: Option<String>,
    /// Position among sibling lists
    pub sort_order: i64,
    /// Optimistic-concurrency counter
    pub version: Version,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last successful mutation time
    pub updated_at: DateTime<Utc>,
}

impl List {
    /// Create a fresh list at version zero
    pub fn new(
        workspace: WorkspaceId,
        name: impl Into<String>,
        sort_order: i64,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ListId::new(),
            workspace,
            name: name.into(),
            icon: None,
            image: None,
            sort_order,
            version: Version::ZERO,
            created_at: at,
            updated_at: at,
        }
    }
}

versioned_entity!(List);

/// A labeled grouping of products
///
/// Name is unique within its workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique id
    pub id: CategoryId,
    /// Parent workspace
    pub workspace: WorkspaceId,
    /// Display name, unique per workspace
    pub name: String,
    /// Optional icon identifier
    pub icon: Option<String>,
    /// Optional cover image reference
    pub image: Option<String>,
    /// Position among sibling categories
    pub sort_order: i64,
    /// Optimistic-concurrency counter
    pub version: Version,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last successful mutation time
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a fresh category at version zero
    pub fn new(
        workspace: WorkspaceId,
        name: impl Into<String>,
        sort_order: i64,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CategoryId::new(),
            workspace,
            name: name.into(),
            icon: None,
            image: None,
            sort_order,
            version: Version::ZERO,
            created_at: at,
            updated_at: at,
        }
    }
}

versioned_entity!(Category);

/// A product belonging to exactly one category
///
/// Name is unique within its category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique id
    pub id: ProductId,
    /// Owning category
    pub category: CategoryId,
    /// Display name, unique per category
    pub name: String,
    /// Unit suggested when the product is added to a list
    pub default_unit: Option<String>,
    /// Icon override
    pub icon: Option<String>,
    /// Free-form note
    pub note: Option<String>,
    /// Optimistic-concurrency counter
    pub version: Version,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last successful mutation time
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Create a fresh product at version zero
    pub fn new(category: CategoryId, name: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            id: ProductId::new(),
            category,
            name: name.into(),
            default_unit: None,
            icon: None,
            note: None,
            version: Version::ZERO,
            created_at: at,
            updated_at: at,
        }
    }
}

versioned_entity!(Product);

/// What a list item points at
///
/// Exactly one of the two: a catalog product by id, or a free-form name for
/// things outside the catalog. The enum makes "both absent" unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemTarget {
    /// Reference into the product catalog
    Product(ProductId),
    /// Free-form item outside the catalog
    Named(String),
}

impl ItemTarget {
    /// Product id, if this item references the catalog
    pub fn product(&self) -> Option<ProductId> {
        match self {
            ItemTarget::Product(id) => Some(*id),
            ItemTarget::Named(_) => None,
        }
    }
}

/// A row on a shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    /// Unique id
    pub id: ItemId,
    /// Owning list
    pub list: ListId,
    /// Product reference or custom name
    pub target: ItemTarget,
    /// Amount to buy
    pub quantity: Option<f64>,
    /// Unit for the quantity
    pub unit: Option<String>,
    /// Free-form note
    pub note: Option<String>,
    /// Whether the item has been checked off
    pub crossed_off: bool,
    /// Position among sibling items
    pub sort_order: i64,
    /// Optimistic-concurrency counter
    pub version: Version,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last successful mutation time
    pub updated_at: DateTime<Utc>,
}

impl ListItem {
    /// Create a fresh item at version zero
    pub fn new(list: ListId, target: ItemTarget, sort_order: i64, at: DateTime<Utc>) -> Self {
        Self {
            id: ItemId::new(),
            list,
            target,
            quantity: None,
            unit: None,
            note: None,
            crossed_off: false,
            sort_order,
            version: Version::ZERO,
            created_at: at,
            updated_at: at,
        }
    }
}

versioned_entity!(ListItem);
