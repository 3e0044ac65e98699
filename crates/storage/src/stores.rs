//! The full storage set and the container directory over it

use crate::entity_store::EntityStore;
use crate::membership::MembershipStore;
use pantry_core::{
    Category, CategoryId, ContainerDirectory, ContainerId, ContainerMeta, EntityKind, Error,
    ItemId, List, ListId, ListItem, MembershipRead, Product, ProductId, Result, Role, UserId,
    Workspace, WorkspaceId,
};
use std::sync::Arc;

/// Every store the engine mutates
///
/// The membership store and the entity stores are the only shared mutable
/// state in the system; every other component is stateless given these.
#[derive(Debug)]
pub struct Stores {
    /// Workspace rows
    pub workspaces: EntityStore<WorkspaceId, Workspace>,
    /// List rows
    pub lists: EntityStore<ListId, List>,
    /// Category rows
    pub categories: EntityStore<CategoryId, Category>,
    /// Product rows
    pub products: EntityStore<ProductId, Product>,
    /// List item rows
    pub items: EntityStore<ItemId, ListItem>,
    /// Membership rows
    pub memberships: MembershipStore,
}

impl Stores {
    /// Create an empty storage set
    pub fn new() -> Self {
        Self {
            workspaces: EntityStore::new(EntityKind::Workspace),
            lists: EntityStore::new(EntityKind::List),
            categories: EntityStore::new(EntityKind::Category),
            products: EntityStore::new(EntityKind::Product),
            items: EntityStore::new(EntityKind::Item),
            memberships: MembershipStore::new(),
        }
    }
}

impl Default for Stores {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only membership view over the storage set
///
/// The access resolver consumes this instead of the store itself so the
/// resolver's inputs stay read-only by construction.
#[derive(Debug, Clone)]
pub struct MembershipView {
    stores: Arc<Stores>,
}

impl MembershipView {
    /// Build a membership view over the given stores
    pub fn new(stores: Arc<Stores>) -> Self {
        Self { stores }
    }
}

impl MembershipRead for MembershipView {
    fn role_of(&self, container: ContainerId, user: UserId) -> Option<Role> {
        self.stores.memberships.role_of(container, user)
    }

    fn members_of(&self, container: ContainerId) -> Vec<(UserId, Role)> {
        self.stores.memberships.members_of(container)
    }
}

/// Container directory over the storage set
///
/// Resolves a container id to its kind and parent workspace; the access
/// resolver uses this for the existence check that precedes authorization.
#[derive(Debug, Clone)]
pub struct Catalog {
    stores: Arc<Stores>,
}

impl Catalog {
    /// Build a directory view over the given stores
    pub fn new(stores: Arc<Stores>) -> Self {
        Self { stores }
    }
}

impl ContainerDirectory for Catalog {
    fn resolve(&self, container: ContainerId) -> Result<ContainerMeta> {
        match container {
            ContainerId::Workspace(id) => {
                if self.stores.workspaces.contains(&id) {
                    Ok(ContainerMeta {
                        container,
                        workspace: None,
                    })
                } else {
                    Err(Error::not_found(EntityKind::Workspace, id))
                }
            }
            ContainerId::List(id) => {
                let list = self.stores.lists.require(&id)?;
                Ok(ContainerMeta {
                    container,
                    workspace: Some(list.workspace),
                })
            }
            ContainerId::Category(id) => {
                let category = self.stores.categories.require(&id)?;
                Ok(ContainerMeta {
                    container,
                    workspace: Some(category.workspace),
                })
            }
        }
    }
}
