//! Workspace operations

use crate::hub::{clean_name, Hub};
use chrono::Utc;
use pantry_core::{
    ContainerId, EntityRef, EventKind, Identity, Result, Role, Version, Workspace, WorkspaceId,
};
use pantry_concurrency::guarded_update;

/// Partial update for a workspace; absent fields stay as they are
#[derive(Debug, Clone, Default)]
pub struct WorkspacePatch {
    /// New display name
    pub name: Option<String>,
    /// New icon identifier
    pub icon: Option<String>,
}

impl Hub {
    /// Create a workspace; the creator becomes its owner
    pub fn create_workspace(
        &self,
        actor: &Identity,
        name: &str,
        icon: Option<String>,
    ) -> Result<Workspace> {
        let name = clean_name(name)?;
        let at = Utc::now();
        let workspace = Workspace::new(name, icon, at);
        self.stores()
            .workspaces
            .insert(workspace.id, workspace.clone())?;

        let container = ContainerId::Workspace(workspace.id);
        self.commit_grant(
            actor,
            container,
            actor.user,
            &actor.display_name,
            Role::Owner,
            at,
        )?;
        self.publish_change(
            EventKind::Created,
            EntityRef::new(workspace.id, &workspace.name),
            &[container],
            actor,
            at,
        );
        Ok(workspace)
    }

    /// Fetch a workspace the actor can read
    pub fn get_workspace(&self, actor: &Identity, id: WorkspaceId) -> Result<Workspace> {
        self.resolver()
            .require_readable(actor.user, ContainerId::Workspace(id))?;
        self.stores().workspaces.require(&id)
    }

    /// All workspaces the actor belongs to, sorted by name
    pub fn workspaces_for(&self, actor: &Identity) -> Result<Vec<Workspace>> {
        let mut rows: Vec<Workspace> = self
            .stores()
            .memberships
            .containers_of(actor.user)
            .into_iter()
            .filter_map(|(container, _)| match container {
                ContainerId::Workspace(id) => self.stores().workspaces.get(&id),
                _ => None,
            })
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    /// Update workspace fields under the version guard
    pub fn update_workspace(
        &self,
        actor: &Identity,
        id: WorkspaceId,
        patch: WorkspacePatch,
        client_version: Option<Version>,
    ) -> Result<Workspace> {
        let container = ContainerId::Workspace(id);
        self.resolver().require_writable(actor.user, container)?;
        let name = patch.name.as_deref().map(clean_name).transpose()?;

        let at = Utc::now();
        let updated = guarded_update(
            &self.stores().workspaces,
            &id,
            client_version,
            at,
            |workspace| {
                let mut changed = false;
                if let Some(name) = name {
                    if name != workspace.name {
                        workspace.name = name;
                        changed = true;
                    }
                }
                if let Some(icon) = patch.icon {
                    if workspace.icon.as_deref() != Some(icon.as_str()) {
                        workspace.icon = Some(icon);
                        changed = true;
                    }
                }
                Ok(changed)
            },
        )?;

        if updated.updated_at == at {
            self.publish_change(
                EventKind::Updated,
                EntityRef::new(id, &updated.name),
                &[container],
                actor,
                at,
            );
        }
        Ok(updated)
    }

    /// Delete a workspace and everything inside it
    ///
    /// Owner only. Children go first: items, then lists, then products,
    /// then categories, then memberships, then the workspace row.
    pub fn delete_workspace(
        &self,
        actor: &Identity,
        id: WorkspaceId,
        client_version: Option<Version>,
    ) -> Result<()> {
        let container = ContainerId::Workspace(id);
        self.resolver().require_owner(actor.user, container)?;
        if let Some(supplied) = client_version {
            let current = self.stores().workspaces.require(&id)?.version;
            if supplied != current {
                return Err(pantry_core::Error::StaleVersion { supplied, current });
            }
        }

        let at = Utc::now();
        let lists = self.stores().lists.remove_where(|list| list.workspace == id);
        for list in &lists {
            self.remove_list_cascade(list, actor, at, &[ContainerId::List(list.id), container]);
        }
        let categories = self
            .stores()
            .categories
            .remove_where(|category| category.workspace == id);
        for category in &categories {
            self.remove_category_cascade(
                category,
                actor,
                at,
                &[ContainerId::Category(category.id), container],
            );
        }

        let workspace = self.stores().workspaces.take(&id)?;
        self.stores().memberships.remove_container(container);
        self.publish_change(
            EventKind::Deleted,
            EntityRef::new(id, &workspace.name),
            &[container],
            actor,
            at,
        );
        Ok(())
    }
}
