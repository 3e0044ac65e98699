//! Category operations
//!
//! Categories carry the one name-uniqueness rule with container scope
//! (unique per workspace), which is why renames are owner-gated while
//! other field updates are not.

use crate::hub::{clean_name, next_sort, Hub};
use chrono::{DateTime, Utc};
use pantry_concurrency::{guarded_update, plan_reorder};
use pantry_core::{
    Category, CategoryId, ContainerId, EntityRef, Error, EventKind, Identity, Result, Role,
    Version, WorkspaceId,
};

/// Partial update for a category; absent fields stay as they are
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    /// New display name (owner only; must stay unique in the workspace)
    pub name: Option<String>,
    /// New icon identifier
    pub icon: Option<String>,
    /// New cover image reference
    pub image: Option<String>,
}

impl Hub {
    /// Create a category in a workspace; the creator becomes its owner
    pub fn create_category(
        &self,
        actor: &Identity,
        workspace: WorkspaceId,
        name: &str,
    ) -> Result<Category> {
        let parent = ContainerId::Workspace(workspace);
        self.resolver().require_writable(actor.user, parent)?;
        let name = clean_name(name)?;
        self.ensure_category_name_free(workspace, &name, None)?;

        let at = Utc::now();
        let sort = next_sort(
            self.stores()
                .categories
                .collect_where(|category| category.workspace == workspace)
                .into_iter()
                .map(|category| category.sort_order),
        );
        let category = Category::new(workspace, name, sort, at);
        self.stores()
            .categories
            .insert(category.id, category.clone())?;

        self.commit_grant(
            actor,
            ContainerId::Category(category.id),
            actor.user,
            &actor.display_name,
            Role::Owner,
            at,
        )?;
        self.publish_change(
            EventKind::Created,
            EntityRef::new(category.id, &category.name),
            &[parent],
            actor,
            at,
        );
        Ok(category)
    }

    /// Fetch a category the actor can read
    pub fn get_category(&self, actor: &Identity, id: CategoryId) -> Result<Category> {
        self.resolver()
            .require_readable(actor.user, ContainerId::Category(id))?;
        self.stores().categories.require(&id)
    }

    /// Categories in a workspace, in sibling order
    pub fn categories_in(
        &self,
        actor: &Identity,
        workspace: WorkspaceId,
    ) -> Result<Vec<Category>> {
        self.resolver()
            .require_readable(actor.user, ContainerId::Workspace(workspace))?;
        let mut rows = self
            .stores()
            .categories
            .collect_where(|category| category.workspace == workspace);
        rows.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.name.cmp(&b.name)));
        Ok(rows)
    }

    /// Categories the actor was granted directly (cascade shares included)
    pub fn categories_shared_with(&self, actor: &Identity) -> Result<Vec<Category>> {
        let mut rows: Vec<Category> = self
            .stores()
            .memberships
            .containers_of(actor.user)
            .into_iter()
            .filter_map(|(container, _)| match container {
                ContainerId::Category(id) => self.stores().categories.get(&id),
                _ => None,
            })
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    /// Update category fields under the version guard
    ///
    /// Renaming affects workspace-level uniqueness and is therefore gated
    /// on the owner role; everything else needs write access only.
    pub fn update_category(
        &self,
        actor: &Identity,
        id: CategoryId,
        patch: CategoryPatch,
        client_version: Option<Version>,
    ) -> Result<Category> {
        let container = ContainerId::Category(id);
        let current = self.stores().categories.require(&id)?;
        let name = patch.name.as_deref().map(clean_name).transpose()?;

        let renaming = name.as_ref().is_some_and(|name| *name != current.name);
        if renaming {
            self.resolver().require_owner(actor.user, container)?;
            self.ensure_category_name_free(
                current.workspace,
                name.as_deref().unwrap_or_default(),
                Some(id),
            )?;
        } else {
            self.resolver().require_writable(actor.user, container)?;
        }

        let at = Utc::now();
        let updated = guarded_update(
            &self.stores().categories,
            &id,
            client_version,
            at,
            |category| {
                let mut changed = false;
                if let Some(name) = name {
                    if name != category.name {
                        category.name = name;
                        changed = true;
                    }
                }
                if let Some(icon) = patch.icon {
                    if category.icon.as_deref() != Some(icon.as_str()) {
                        category.icon = Some(icon);
                        changed = true;
                    }
                }
                if let Some(image) = patch.image {
                    if category.image.as_deref() != Some(image.as_str()) {
                        category.image = Some(image);
                        changed = true;
                    }
                }
                Ok(changed)
            },
        )?;

        if updated.updated_at == at {
            let workspace = ContainerId::Workspace(updated.workspace);
            self.publish_change(
                EventKind::Updated,
                EntityRef::new(id, &updated.name),
                &[container, workspace],
                actor,
                at,
            );
        }
        Ok(updated)
    }

    /// Reorder a workspace's categories to the given full order
    pub fn reorder_categories(
        &self,
        actor: &Identity,
        workspace: WorkspaceId,
        desired: &[CategoryId],
    ) -> Result<()> {
        let parent = ContainerId::Workspace(workspace);
        self.resolver().require_writable(actor.user, parent)?;

        let siblings = self.categories_in(actor, workspace)?;
        let current: Vec<(CategoryId, i64)> = siblings
            .iter()
            .map(|category| (category.id, category.sort_order))
            .collect();
        let at = Utc::now();
        for (id, sort) in plan_reorder(&current, desired)? {
            let moved = guarded_update(&self.stores().categories, &id, None, at, |category| {
                category.sort_order = sort;
                Ok(true)
            })?;
            self.publish_change(
                EventKind::Updated,
                EntityRef::new(id, &moved.name),
                &[parent],
                actor,
                at,
            );
        }
        Ok(())
    }

    /// Delete a category, its products, and every item referencing them
    ///
    /// Category owner only.
    pub fn delete_category(
        &self,
        actor: &Identity,
        id: CategoryId,
        client_version: Option<Version>,
    ) -> Result<()> {
        let container = ContainerId::Category(id);
        self.resolver().require_owner(actor.user, container)?;

        let category = self.stores().categories.take_guarded(&id, client_version)?;
        let at = Utc::now();
        self.remove_category_cascade(
            &category,
            actor,
            at,
            &[container, ContainerId::Workspace(category.workspace)],
        );
        Ok(())
    }

    /// Drop a category's products (and their items) and announce deletion
    ///
    /// The category row itself must already be out of the store.
    pub(crate) fn remove_category_cascade(
        &self,
        category: &Category,
        actor: &Identity,
        at: DateTime<Utc>,
        topics: &[ContainerId],
    ) {
        let products = self
            .stores()
            .products
            .remove_where(|product| product.category == category.id);
        for product in &products {
            self.remove_items_referencing(product, actor, at);
        }
        self.stores()
            .memberships
            .remove_container(ContainerId::Category(category.id));
        self.publish_change(
            EventKind::Deleted,
            EntityRef::new(category.id, &category.name),
            topics,
            actor,
            at,
        );
    }

    /// Uniqueness rule: one name per workspace, case-insensitive
    fn ensure_category_name_free(
        &self,
        workspace: WorkspaceId,
        name: &str,
        besides: Option<CategoryId>,
    ) -> Result<()> {
        let wanted = name.to_lowercase();
        let clash = self.stores().categories.collect_where(|category| {
            category.workspace == workspace
                && Some(category.id) != besides
                && category.name.to_lowercase() == wanted
        });
        if clash.is_empty() {
            Ok(())
        } else {
            Err(Error::invalid(format!(
                "a category named `{name}` already exists in this workspace"
            )))
        }
    }
}
