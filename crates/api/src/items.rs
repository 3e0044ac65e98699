//! List item endpoints

use crate::pantry::Pantry;
use pantry_core::{Identity, ItemId, ListId, ListItem, ProductId, Result, Version};
use pantry_engine::{ItemPatch, NewItem};
use serde::{Deserialize, Serialize};

/// Add an item to a list
///
/// Exactly one of `product` / `custom_name` must be supplied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddItemRequest {
    /// Catalog product to reference
    #[serde(default)]
    pub product: Option<ProductId>,
    /// Free-form name for items outside the catalog
    #[serde(default)]
    pub custom_name: Option<String>,
    /// Amount to buy
    #[serde(default)]
    pub quantity: Option<f64>,
    /// Unit for the quantity; defaults to the product's default unit
    #[serde(default)]
    pub unit: Option<String>,
    /// Free-form note
    #[serde(default)]
    pub note: Option<String>,
}

/// Update an item; absent fields stay as they are
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateItemRequest {
    /// Rename a free-form item
    #[serde(default)]
    pub custom_name: Option<String>,
    /// New quantity
    #[serde(default)]
    pub quantity: Option<f64>,
    /// New unit
    #[serde(default)]
    pub unit: Option<String>,
    /// New note
    #[serde(default)]
    pub note: Option<String>,
    /// Version the client last saw; absent means unconditional
    #[serde(default)]
    pub version: Option<Version>,
}

/// Cross an item off, or bring it back
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossOffRequest {
    /// The new crossed-off state
    pub crossed_off: bool,
    /// Version the client last saw; absent means unconditional
    #[serde(default)]
    pub version: Option<Version>,
}

impl Pantry {
    /// Add an item to a list
    pub fn add_item(
        &self,
        actor: &Identity,
        list: ListId,
        request: AddItemRequest,
    ) -> Result<ListItem> {
        self.hub().add_item(
            actor,
            list,
            NewItem {
                product: request.product,
                custom_name: request.custom_name,
                quantity: request.quantity,
                unit: request.unit,
                note: request.note,
            },
        )
    }

    /// Fetch one item
    pub fn item(&self, actor: &Identity, id: ItemId) -> Result<ListItem> {
        self.hub().get_item(actor, id)
    }

    /// Items on a list, in sibling order
    pub fn items(&self, actor: &Identity, list: ListId) -> Result<Vec<ListItem>> {
        self.hub().items_in(actor, list)
    }

    /// Update an item
    pub fn update_item(
        &self,
        actor: &Identity,
        id: ItemId,
        request: UpdateItemRequest,
    ) -> Result<ListItem> {
        self.hub().update_item(
            actor,
            id,
            ItemPatch {
                custom_name: request.custom_name,
                quantity: request.quantity,
                unit: request.unit,
                note: request.note,
            },
            request.version,
        )
    }

    /// Cross an item off, or bring it back
    pub fn cross_off(
        &self,
        actor: &Identity,
        id: ItemId,
        request: CrossOffRequest,
    ) -> Result<ListItem> {
        self.hub()
            .set_crossed_off(actor, id, request.crossed_off, request.version)
    }

    /// Reorder a list's items to the given full order
    pub fn reorder_items(&self, actor: &Identity, list: ListId, order: &[ItemId]) -> Result<()> {
        self.hub().reorder_items(actor, list, order)
    }

    /// Remove an item
    pub fn delete_item(
        &self,
        actor: &Identity,
        id: ItemId,
        version: Option<Version>,
    ) -> Result<()> {
        self.hub().delete_item(actor, id, version)
    }

    /// Remove every crossed-off item from a list; returns how many went
    pub fn clear_crossed_off(&self, actor: &Identity, list: ListId) -> Result<usize> {
        self.hub().clear_crossed_off(actor, list)
    }
}
