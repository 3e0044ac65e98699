//! List operations

use crate::hub::{clean_name, next_sort, Hub};
use chrono::{DateTime, Utc};
use pantry_concurrency::{guarded_update, plan_reorder};
use pantry_core::{
    ContainerId, EntityRef, EventKind, Identity, List, ListId, Result, Role, Version, WorkspaceId,
};

/// Partial update for a list; absent fields stay as they are
#[derive(Debug, Clone, Default)]
pub struct ListPatch {
    /// New display name
    pub name: Option<String>,
    /// New icon identifier
    pub icon: Option<String>,
    /// New cover image reference
    pub image: Option<String>,
}

impl Hub {
    /// Create a list in a workspace; the creator becomes the list's owner
    ///
    /// Any workspace member may create lists. The creator's ownership is a
    /// direct membership row on the list itself, so workspace co-members
    /// get editor access through the parent while deletion stays with the
    /// creator.
    pub fn create_list(
        &self,
        actor: &Identity,
        workspace: WorkspaceId,
        name: &str,
    ) -> Result<List> {
        let parent = ContainerId::Workspace(workspace);
        self.resolver().require_writable(actor.user, parent)?;
        let name = clean_name(name)?;

        let at = Utc::now();
        let sort = next_sort(
            self.stores()
                .lists
                .collect_where(|list| list.workspace == workspace)
                .into_iter()
                .map(|list| list.sort_order),
        );
        let list = List::new(workspace, name, sort, at);
        self.stores().lists.insert(list.id, list.clone())?;

        self.commit_grant(
            actor,
            ContainerId::List(list.id),
            actor.user,
            &actor.display_name,
            Role::Owner,
            at,
        )?;
        self.publish_change(
            EventKind::Created,
            EntityRef::new(list.id, &list.name),
            &[parent],
            actor,
            at,
        );
        Ok(list)
    }

    /// Fetch a list the actor can read
    pub fn get_list(&self, actor: &Identity, id: ListId) -> Result<List> {
        self.resolver()
            .require_readable(actor.user, ContainerId::List(id))?;
        self.stores().lists.require(&id)
    }

    /// Lists in a workspace, in sibling order
    pub fn lists_in(&self, actor: &Identity, workspace: WorkspaceId) -> Result<Vec<List>> {
        self.resolver()
            .require_readable(actor.user, ContainerId::Workspace(workspace))?;
        let mut rows = self
            .stores()
            .lists
            .collect_where(|list| list.workspace == workspace);
        rows.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.name.cmp(&b.name)));
        Ok(rows)
    }

    /// Lists the actor was invited to directly, across all workspaces
    ///
    /// Covers guests who hold a list membership without being a member of
    /// the surrounding workspace.
    pub fn lists_shared_with(&self, actor: &Identity) -> Result<Vec<List>> {
        let mut rows: Vec<List> = self
            .stores()
            .memberships
            .containers_of(actor.user)
            .into_iter()
            .filter_map(|(container, _)| match container {
                ContainerId::List(id) => self.stores().lists.get(&id),
                _ => None,
            })
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    /// Update list fields under the version guard
    pub fn update_list(
        &self,
        actor: &Identity,
        id: ListId,
        patch: ListPatch,
        client_version: Option<Version>,
    ) -> Result<List> {
        let container = ContainerId::List(id);
        self.resolver().require_writable(actor.user, container)?;
        let name = patch.name.as_deref().map(clean_name).transpose()?;

        let at = Utc::now();
        let updated = guarded_update(&self.stores().lists, &id, client_version, at, |list| {
            let mut changed = false;
            if let Some(name) = name {
                if name != list.name {
                    list.name = name;
                    changed = true;
                }
            }
            if let Some(icon) = patch.icon {
                if list.icon.as_deref() != Some(icon.as_str()) {
                    list.icon = Some(icon);
                    changed = true;
                }
            }
            if let Some(image) = patch.image {
                if list.image.as_deref() != Some(image.as_str()) {
                    list.image = Some(image);
                    changed = true;
                }
            }
            Ok(changed)
        })?;

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

    /// Reorder a workspace's lists to the given full order
    ///
    /// Only rows whose sort value actually changes are touched; handing
    /// back the current order is a no-op and bumps nothing.
    pub fn reorder_lists(
        &self,
        actor: &Identity,
        workspace: WorkspaceId,
        desired: &[ListId],
    ) -> Result<()> {
        let parent = ContainerId::Workspace(workspace);
        self.resolver().require_writable(actor.user, parent)?;

        let siblings = self.lists_in(actor, workspace)?;
        let current: Vec<(ListId, i64)> = siblings
            .iter()
            .map(|list| (list.id, list.sort_order))
            .collect();
        let at = Utc::now();
        for (id, sort) in plan_reorder(&current, desired)? {
            let moved = guarded_update(&self.stores().lists, &id, None, at, |list| {
                list.sort_order = sort;
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

    /// Delete a list and its items; list owner only
    pub fn delete_list(
        &self,
        actor: &Identity,
        id: ListId,
        client_version: Option<Version>,
    ) -> Result<()> {
        let container = ContainerId::List(id);
        self.resolver().require_owner(actor.user, container)?;

        let list = self.stores().lists.take_guarded(&id, client_version)?;
        let at = Utc::now();
        self.remove_list_cascade(
            &list,
            actor,
            at,
            &[container, ContainerId::Workspace(list.workspace)],
        );
        Ok(())
    }

    /// Drop a list's children and announce its deletion
    ///
    /// The list row itself must already be out of the store.
    pub(crate) fn remove_list_cascade(
        &self,
        list: &List,
        actor: &Identity,
        at: DateTime<Utc>,
        topics: &[ContainerId],
    ) {
        self.stores().items.remove_where(|item| item.list == list.id);
        self.stores()
            .memberships
            .remove_container(ContainerId::List(list.id));
        self.publish_change(
            EventKind::Deleted,
            EntityRef::new(list.id, &list.name),
            topics,
            actor,
            at,
        );
    }
}
