//! Product endpoints

use crate::pantry::Pantry;
use pantry_core::{CategoryId, Identity, Product, ProductId, Result, Version};
use pantry_engine::ProductPatch;
use serde::{Deserialize, Serialize};

/// Create a product in a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductRequest {
    /// The category the product belongs to
    pub category: CategoryId,
    /// Display name, unique within the category
    pub name: String,
    /// Unit suggested when the product lands on a list
    #[serde(default)]
    pub default_unit: Option<String>,
}

/// Update a product; absent fields stay as they are
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProductRequest {
    /// New display name
    #[serde(default)]
    pub name: Option<String>,
    /// New default unit
    #[serde(default)]
    pub default_unit: Option<String>,
    /// New icon override
    #[serde(default)]
    pub icon: Option<String>,
    /// New note
    #[serde(default)]
    pub note: Option<String>,
    /// Version the client last saw; absent means unconditional
    #[serde(default)]
    pub version: Option<Version>,
}

impl Pantry {
    /// Create a product
    pub fn create_product(
        &self,
        actor: &Identity,
        request: CreateProductRequest,
    ) -> Result<Product> {
        self.hub().create_product(
            actor,
            request.category,
            &request.name,
            request.default_unit,
        )
    }

    /// Fetch one product
    pub fn product(&self, actor: &Identity, id: ProductId) -> Result<Product> {
        self.hub().get_product(actor, id)
    }

    /// Products in a category, sorted by name
    pub fn products(&self, actor: &Identity, category: CategoryId) -> Result<Vec<Product>> {
        self.hub().products_in(actor, category)
    }

    /// Update a product
    pub fn update_product(
        &self,
        actor: &Identity,
        id: ProductId,
        request: UpdateProductRequest,
    ) -> Result<Product> {
        self.hub().update_product(
            actor,
            id,
            ProductPatch {
                name: request.name,
                default_unit: request.default_unit,
                icon: request.icon,
                note: request.note,
            },
            request.version,
        )
    }

    /// Delete a product and every item referencing it
    pub fn delete_product(
        &self,
        actor: &Identity,
        id: ProductId,
        version: Option<Version>,
    ) -> Result<()> {
        self.hub().delete_product(actor, id, version)
    }
}
