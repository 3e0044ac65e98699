//! List endpoints

use crate::pantry::Pantry;
use pantry_core::{Identity, List, ListId, Result, Version, WorkspaceId};
use pantry_engine::ListPatch;
use serde::{Deserialize, Serialize};

/// Create a list in a workspace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateListRequest {
    /// The workspace the list belongs to
    pub workspace: WorkspaceId,
    /// Display name
    pub name: String,
}

/// Update a list; absent fields stay as they are
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateListRequest {
    /// New display name
    #[serde(default)]
    pub name: Option<String>,
    /// New icon identifier
    #[serde(default)]
    pub icon: Option<String>,
    /// New cover image reference
    #[serde(default)]
    pub image: Option<String>,
    /// Version the client last saw; absent means unconditional
    #[serde(default)]
    pub version: Option<Version>,
}

impl Pantry {
    /// Create a list; the actor becomes its owner
    pub fn create_list(&self, actor: &Identity, request: CreateListRequest) -> Result<List> {
        self.hub()
            .create_list(actor, request.workspace, &request.name)
    }

    /// Fetch one list
    pub fn list(&self, actor: &Identity, id: ListId) -> Result<List> {
        self.hub().get_list(actor, id)
    }

    /// Lists in a workspace, in sibling order
    pub fn lists(&self, actor: &Identity, workspace: WorkspaceId) -> Result<Vec<List>> {
        self.hub().lists_in(actor, workspace)
    }

    /// Lists shared with the actor directly
    pub fn shared_lists(&self, actor: &Identity) -> Result<Vec<List>> {
        self.hub().lists_shared_with(actor)
    }

    /// Update a list
    pub fn update_list(
        &self,
        actor: &Identity,
        id: ListId,
        request: UpdateListRequest,
    ) -> Result<List> {
        self.hub().update_list(
            actor,
            id,
            ListPatch {
                name: request.name,
                icon: request.icon,
                image: request.image,
            },
            request.version,
        )
    }

    /// Reorder a workspace's lists to the given full order
    pub fn reorder_lists(
        &self,
        actor: &Identity,
        workspace: WorkspaceId,
        order: &[ListId],
    ) -> Result<()> {
        self.hub().reorder_lists(actor, workspace, order)
    }

    /// Delete a list and its items (list owner only)
    pub fn delete_list(
        &self,
        actor: &Identity,
        id: ListId,
        version: Option<Version>,
    ) -> Result<()> {
        self.hub().delete_list(actor, id, version)
    }
}
