//! Workspace endpoints

use crate::pantry::Pantry;
use pantry_core::{Identity, Result, Version, Workspace, WorkspaceId};
use pantry_engine::WorkspacePatch;
use serde::{Deserialize, Serialize};

/// Create a workspace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWorkspaceRequest {
    /// Display name
    pub name: String,
    /// Optional icon identifier
    #[serde(default)]
    pub icon: Option<String>,
}

/// Update a workspace; absent fields stay as they are
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateWorkspaceRequest {
    /// New display name
    #[serde(default)]
    pub name: Option<String>,
    /// New icon identifier
    #[serde(default)]
    pub icon: Option<String>,
    /// Version the client last saw; absent means unconditional
    #[serde(default)]
    pub version: Option<Version>,
}

impl Pantry {
    /// Create a workspace owned by the actor
    pub fn create_workspace(
        &self,
        actor: &Identity,
        request: CreateWorkspaceRequest,
    ) -> Result<Workspace> {
        self.hub()
            .create_workspace(actor, &request.name, request.icon)
    }

    /// Fetch one workspace
    pub fn workspace(&self, actor: &Identity, id: WorkspaceId) -> Result<Workspace> {
        self.hub().get_workspace(actor, id)
    }

    /// Workspaces the actor belongs to
    pub fn workspaces(&self, actor: &Identity) -> Result<Vec<Workspace>> {
        self.hub().workspaces_for(actor)
    }

    /// Update a workspace
    pub fn update_workspace(
        &self,
        actor: &Identity,
        id: WorkspaceId,
        request: UpdateWorkspaceRequest,
    ) -> Result<Workspace> {
        self.hub().update_workspace(
            actor,
            id,
            WorkspacePatch {
                name: request.name,
                icon: request.icon,
            },
            request.version,
        )
    }

    /// Delete a workspace and everything inside it (owner only)
    pub fn delete_workspace(
        &self,
        actor: &Identity,
        id: WorkspaceId,
        version: Option<Version>,
    ) -> Result<()> {
        self.hub().delete_workspace(actor, id, version)
    }
}
