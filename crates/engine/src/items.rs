//! List item operations

use crate::hub::{clean_name, next_sort, Hub};
use chrono::{DateTime, Utc};
use pantry_concurrency::{guarded_update, plan_reorder};
use pantry_core::{
    ContainerId, EntityRef, Error, EventKind, Identity, ItemId, ItemTarget, ListId, ListItem,
    Product, ProductId, Result, Version,
};

/// What to put on a list
///
/// Exactly one of `product` / `custom_name` must be supplied.
#[derive(Debug, Clone, Default)]
pub struct NewItem {
    /// Catalog product to reference
    pub product: Option<ProductId>,
    /// Free-form name for items outside the catalog
    pub custom_name: Option<String>,
    /// Amount to buy
    pub quantity: Option<f64>,
    /// Unit for the quantity; defaults to the product's default unit
    pub unit: Option<String>,
    /// Free-form note
    pub note: Option<String>,
}

/// Partial update for an item; absent fields stay as they are
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    /// Rename a free-form item (rejected for product-referencing items)
    pub custom_name: Option<String>,
    /// New quantity
    pub quantity: Option<f64>,
    /// New unit
    pub unit: Option<String>,
    /// New note
    pub note: Option<String>,
}

impl Hub {
    /// Add an item to a list
    pub fn add_item(&self, actor: &Identity, list: ListId, new: NewItem) -> Result<ListItem> {
        let container = ContainerId::List(list);
        self.resolver().require_writable(actor.user, container)?;

        let (target, default_unit, label) = match (new.product, new.custom_name) {
            (Some(product_id), None) => {
                let product = self.stores().products.require(&product_id)?;
                // Referencing a product means being able to see its catalog.
                self.resolver()
                    .require_readable(actor.user, ContainerId::Category(product.category))?;
                let label = product.name.clone();
                (
                    ItemTarget::Product(product_id),
                    product.default_unit,
                    label,
                )
            }
            (None, Some(name)) => {
                let name = clean_name(&name)?;
                (ItemTarget::Named(name.clone()), None, name)
            }
            (None, None) => {
                return Err(Error::invalid(
                    "an item needs a product reference or a custom name",
                ))
            }
            (Some(_), Some(_)) => {
                return Err(Error::invalid(
                    "an item takes a product reference or a custom name, not both",
                ))
            }
        };

        let at = Utc::now();
        let sort = next_sort(
            self.stores()
                .items
                .collect_where(|item| item.list == list)
                .into_iter()
                .map(|item| item.sort_order),
        );
        let mut item = ListItem::new(list, target, sort, at);
        item.quantity = new.quantity;
        item.unit = new.unit.or(default_unit);
        item.note = new.note;
        self.stores().items.insert(item.id, item.clone())?;

        self.publish_change(
            EventKind::Created,
            EntityRef::new(item.id, label),
            &[container],
            actor,
            at,
        );
        Ok(item)
    }

    /// Fetch an item the actor can read
    pub fn get_item(&self, actor: &Identity, id: ItemId) -> Result<ListItem> {
        let item = self.stores().items.require(&id)?;
        self.resolver()
            .require_readable(actor.user, ContainerId::List(item.list))?;
        Ok(item)
    }

    /// Items on a list, in sibling order
    pub fn items_in(&self, actor: &Identity, list: ListId) -> Result<Vec<ListItem>> {
        self.resolver()
            .require_readable(actor.user, ContainerId::List(list))?;
        let mut rows = self.stores().items.collect_where(|item| item.list == list);
        rows.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(rows)
    }

    /// Update item fields under the version guard
    pub fn update_item(
        &self,
        actor: &Identity,
        id: ItemId,
        patch: ItemPatch,
        client_version: Option<Version>,
    ) -> Result<ListItem> {
        let current = self.stores().items.require(&id)?;
        let container = ContainerId::List(current.list);
        self.resolver().require_writable(actor.user, container)?;

        let custom_name = patch.custom_name.as_deref().map(clean_name).transpose()?;
        if custom_name.is_some() && matches!(current.target, ItemTarget::Product(_)) {
            return Err(Error::invalid(
                "a product-referencing item cannot be renamed; edit the product",
            ));
        }

        let at = Utc::now();
        let updated = guarded_update(&self.stores().items, &id, client_version, at, |item| {
            let mut changed = false;
            if let Some(name) = custom_name {
                if item.target != ItemTarget::Named(name.clone()) {
                    item.target = ItemTarget::Named(name);
                    changed = true;
                }
            }
            if let Some(quantity) = patch.quantity {
                if item.quantity != Some(quantity) {
                    item.quantity = Some(quantity);
                    changed = true;
                }
            }
            if let Some(unit) = patch.unit {
                if item.unit.as_deref() != Some(unit.as_str()) {
                    item.unit = Some(unit);
                    changed = true;
                }
            }
            if let Some(note) = patch.note {
                if item.note.as_deref() != Some(note.as_str()) {
                    item.note = Some(note);
                    changed = true;
                }
            }
            Ok(changed)
        })?;

        if updated.updated_at == at {
            self.publish_change(
                EventKind::Updated,
                EntityRef::new(id, self.item_label(&updated)),
                &[container],
                actor,
                at,
            );
        }
        Ok(updated)
    }

    /// Cross an item off, or bring it back
    pub fn set_crossed_off(
        &self,
        actor: &Identity,
        id: ItemId,
        crossed_off: bool,
        client_version: Option<Version>,
    ) -> Result<ListItem> {
        let current = self.stores().items.require(&id)?;
        let container = ContainerId::List(current.list);
        self.resolver().require_writable(actor.user, container)?;

        let at = Utc::now();
        let updated = guarded_update(&self.stores().items, &id, client_version, at, |item| {
            if item.crossed_off == crossed_off {
                return Ok(false);
            }
            item.crossed_off = crossed_off;
            Ok(true)
        })?;

        if updated.updated_at == at {
            self.publish_change(
                EventKind::Updated,
                EntityRef::new(id, self.item_label(&updated)),
                &[container],
                actor,
                at,
            );
        }
        Ok(updated)
    }

    /// Reorder a list's items to the given full order
    pub fn reorder_items(
        &self,
        actor: &Identity,
        list: ListId,
        desired: &[ItemId],
    ) -> Result<()> {
        let container = ContainerId::List(list);
        self.resolver().require_writable(actor.user, container)?;

        let siblings = self.items_in(actor, list)?;
        let current: Vec<(ItemId, i64)> = siblings
            .iter()
            .map(|item| (item.id, item.sort_order))
            .collect();
        let at = Utc::now();
        for (id, sort) in plan_reorder(&current, desired)? {
            let moved = guarded_update(&self.stores().items, &id, None, at, |item| {
                item.sort_order = sort;
                Ok(true)
            })?;
            self.publish_change(
                EventKind::Updated,
                EntityRef::new(id, self.item_label(&moved)),
                &[container],
                actor,
                at,
            );
        }
        Ok(())
    }

    /// Remove an item from its list
    pub fn delete_item(
        &self,
        actor: &Identity,
        id: ItemId,
        client_version: Option<Version>,
    ) -> Result<()> {
        let current = self.stores().items.require(&id)?;
        let container = ContainerId::List(current.list);
        self.resolver().require_writable(actor.user, container)?;

        let item = self.stores().items.take_guarded(&id, client_version)?;
        let at = Utc::now();
        self.publish_change(
            EventKind::Deleted,
            EntityRef::new(id, self.item_label(&item)),
            &[container],
            actor,
            at,
        );
        Ok(())
    }

    /// Remove every crossed-off item from a list at once
    pub fn clear_crossed_off(&self, actor: &Identity, list: ListId) -> Result<usize> {
        let container = ContainerId::List(list);
        self.resolver().require_writable(actor.user, container)?;

        let at = Utc::now();
        let removed = self
            .stores()
            .items
            .remove_where(|item| item.list == list && item.crossed_off);
        for item in &removed {
            self.publish_change(
                EventKind::Deleted,
                EntityRef::new(item.id, self.item_label(item)),
                &[container],
                actor,
                at,
            );
        }
        Ok(removed.len())
    }

    /// Drop items referencing a product that is going away
    ///
    /// Crosses list boundaries; each removal is announced on the owning
    /// list's topic so every list view stays consistent.
    pub(crate) fn remove_items_referencing(
        &self,
        product: &Product,
        actor: &Identity,
        at: DateTime<Utc>,
    ) {
        let removed = self
            .stores()
            .items
            .remove_where(|item| item.target.product() == Some(product.id));
        for item in &removed {
            self.publish_change(
                EventKind::Deleted,
                EntityRef::new(item.id, &product.name),
                &[ContainerId::List(item.list)],
                actor,
                at,
            );
        }
    }

    /// Display label for an item: the custom name, or the product's name
    fn item_label(&self, item: &ListItem) -> String {
        match &item.target {
            ItemTarget::Named(name) => name.clone(),
            ItemTarget::Product(product_id) => self
                .stores()
                .products
                .get(product_id)
                .map(|product| product.name)
                .unwrap_or_else(|| product_id.to_string()),
        }
    }
}
