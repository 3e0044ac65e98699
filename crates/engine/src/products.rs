//! Product operations

use crate::hub::{clean_name, Hub};
use chrono::Utc;
use pantry_concurrency::guarded_update;
use pantry_core::{
    CategoryId, ContainerId, EntityRef, Error, EventKind, Identity, Product, ProductId, Result,
    Version,
};

/// Partial update for a product; absent fields stay as they are
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    /// New display name (must stay unique in the category)
    pub name: Option<String>,
    /// New default unit
    pub default_unit: Option<String>,
    /// New icon override
    pub icon: Option<String>,
    /// New note
    pub note: Option<String>,
}

impl Hub {
    /// Create a product in a category
    pub fn create_product(
        &self,
        actor: &Identity,
        category: CategoryId,
        name: &str,
        default_unit: Option<String>,
    ) -> Result<Product> {
        let container = ContainerId::Category(category);
        self.resolver().require_writable(actor.user, container)?;
        let name = clean_name(name)?;
        self.ensure_product_name_free(category, &name, None)?;

        let at = Utc::now();
        let mut product = Product::new(category, name, at);
        product.default_unit = default_unit;
        self.stores().products.insert(product.id, product.clone())?;

        self.publish_change(
            EventKind::Created,
            EntityRef::new(product.id, &product.name),
            &[container],
            actor,
            at,
        );
        Ok(product)
    }

    /// Fetch a product the actor can read
    pub fn get_product(&self, actor: &Identity, id: ProductId) -> Result<Product> {
        let product = self.stores().products.require(&id)?;
        self.resolver()
            .require_readable(actor.user, ContainerId::Category(product.category))?;
        Ok(product)
    }

    /// Products in a category, sorted by name
    pub fn products_in(&self, actor: &Identity, category: CategoryId) -> Result<Vec<Product>> {
        self.resolver()
            .require_readable(actor.user, ContainerId::Category(category))?;
        let mut rows = self
            .stores()
            .products
            .collect_where(|product| product.category == category);
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    /// Update product fields under the version guard
    pub fn update_product(
        &self,
        actor: &Identity,
        id: ProductId,
        patch: ProductPatch,
        client_version: Option<Version>,
    ) -> Result<Product> {
        let current = self.stores().products.require(&id)?;
        let container = ContainerId::Category(current.category);
        self.resolver().require_writable(actor.user, container)?;

        let name = patch.name.as_deref().map(clean_name).transpose()?;
        if let Some(name) = &name {
            if *name != current.name {
                self.ensure_product_name_free(current.category, name, Some(id))?;
            }
        }

        let at = Utc::now();
        let updated = guarded_update(
            &self.stores().products,
            &id,
            client_version,
            at,
            |product| {
                let mut changed = false;
                if let Some(name) = name {
                    if name != product.name {
                        product.name = name;
                        changed = true;
                    }
                }
                if let Some(unit) = patch.default_unit {
                    if product.default_unit.as_deref() != Some(unit.as_str()) {
                        product.default_unit = Some(unit);
                        changed = true;
                    }
                }
                if let Some(icon) = patch.icon {
                    if product.icon.as_deref() != Some(icon.as_str()) {
                        product.icon = Some(icon);
                        changed = true;
                    }
                }
                if let Some(note) = patch.note {
                    if product.note.as_deref() != Some(note.as_str()) {
                        product.note = Some(note);
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

    /// Delete a product and every list item referencing it
    ///
    /// The item cleanup crosses list boundaries: a row pointing at a dead
    /// product is never left behind, whichever list it sits on.
    pub fn delete_product(
        &self,
        actor: &Identity,
        id: ProductId,
        client_version: Option<Version>,
    ) -> Result<()> {
        let current = self.stores().products.require(&id)?;
        let container = ContainerId::Category(current.category);
        self.resolver().require_writable(actor.user, container)?;

        let product = self.stores().products.take_guarded(&id, client_version)?;
        let at = Utc::now();
        self.remove_items_referencing(&product, actor, at);
        self.publish_change(
            EventKind::Deleted,
            EntityRef::new(id, &product.name),
            &[container],
            actor,
            at,
        );
        Ok(())
    }

    /// Uniqueness rule: one name per category, case-insensitive
    fn ensure_product_name_free(
        &self,
        category: CategoryId,
        name: &str,
        besides: Option<ProductId>,
    ) -> Result<()> {
        let wanted = name.to_lowercase();
        let clash = self.stores().products.collect_where(|product| {
            product.category == category
                && Some(product.id) != besides
                && product.name.to_lowercase() == wanted
        });
        if clash.is_empty() {
            Ok(())
        } else {
            Err(Error::invalid(format!(
                "a product named `{name}` already exists in this category"
            )))
        }
    }
}
