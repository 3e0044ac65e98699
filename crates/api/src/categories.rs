//! Category endpoints

use crate::pantry::Pantry;
use pantry_core::{Category, CategoryId, Identity, Result, Version, WorkspaceId};
use pantry_engine::CategoryPatch;
use serde::{Deserialize, Serialize};

/// Create a category in a workspace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    /// The workspace the category belongs to
    pub workspace: WorkspaceId,
    /// Display name, unique within the workspace
    pub name: String,
}

/// Update a category; absent fields stay as they are
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCategoryRequest {
    /// New display name (owner only)
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
    /// Create a category; the actor becomes its owner
    pub fn create_category(
        &self,
        actor: &Identity,
        request: CreateCategoryRequest,
    ) -> Result<Category> {
        self.hub()
            .create_category(actor, request.workspace, &request.name)
    }

    /// Fetch one category
    pub fn category(&self, actor: &Identity, id: CategoryId) -> Result<Category> {
        self.hub().get_category(actor, id)
    }

    /// Categories in a workspace, in sibling order
    pub fn categories(&self, actor: &Identity, workspace: WorkspaceId) -> Result<Vec<Category>> {
        self.hub().categories_in(actor, workspace)
    }

    /// Categories shared with the actor directly (cascade shares included)
    pub fn shared_categories(&self, actor: &Identity) -> Result<Vec<Category>> {
        self.hub().categories_shared_with(actor)
    }

    /// Update a category
    pub fn update_category(
        &self,
        actor: &Identity,
        id: CategoryId,
        request: UpdateCategoryRequest,
    ) -> Result<Category> {
        self.hub().update_category(
            actor,
            id,
            CategoryPatch {
                name: request.name,
                icon: request.icon,
                image: request.image,
            },
            request.version,
        )
    }

    /// Reorder a workspace's categories to the given full order
    pub fn reorder_categories(
        &self,
        actor: &Identity,
        workspace: WorkspaceId,
        order: &[CategoryId],
    ) -> Result<()> {
        self.hub().reorder_categories(actor, workspace, order)
    }

    /// Delete a category, its products, and items referencing them
    /// (category owner only)
    pub fn delete_category(
        &self,
        actor: &Identity,
        id: CategoryId,
        version: Option<Version>,
    ) -> Result<()> {
        self.hub().delete_category(actor, id, version)
    }
}
