//! Cascade sharing: auto-share categories when a list is shared
//!
//! Inviting someone to a list is only useful if they can also see the
//! catalog entries the list's items point at. When a user gains list
//! membership, this rule grants them editor membership in every category
//! that is (a) referenced by a product currently on the list and (b) owned
//! by the same user who owns the list.
//!
//! The rule is deliberately narrow:
//! - categories owned by anyone else are left untouched; sharing never
//!   silently grants access to a third party's container;
//! - it is one-shot: items added to the list later do not re-trigger it,
//!   and losing list membership does not revoke what it granted.

use crate::bus::DomainHandler;
use crate::hub::Hub;
use pantry_core::{ContainerId, DomainEvent, Identity, Result};
use rustc_hash::FxHashSet;
use tracing::info;

/// The auto-share rule, registered on the domain bus by default
pub struct CascadeSharing;

impl DomainHandler for CascadeSharing {
    fn on_event(&self, hub: &Hub, event: &DomainEvent) -> Result<()> {
        // Only list grants cascade. Category grants (including the ones
        // this handler emits) fall through, which is what terminates the
        // re-dispatch.
        let DomainEvent::MembershipGranted {
            container: ContainerId::List(list_id),
            user,
            user_label,
            granted_by,
            ..
        } = event
        else {
            return Ok(());
        };

        let Some(list_owner) = hub.owner_of(ContainerId::List(*list_id)) else {
            return Ok(());
        };

        // Distinct categories referenced by products currently on the list.
        let product_ids: FxHashSet<_> = hub
            .stores()
            .items
            .collect_where(|item| item.list == *list_id)
            .into_iter()
            .filter_map(|item| item.target.product())
            .collect();
        let mut categories: FxHashSet<_> = FxHashSet::default();
        for product_id in product_ids {
            if let Some(product) = hub.stores().products.get(&product_id) {
                categories.insert(product.category);
            }
        }

        for category_id in categories {
            let container = ContainerId::Category(category_id);
            if hub.owner_of(container) != Some(list_owner) {
                continue;
            }
            if hub
                .stores()
                .memberships
                .role_of(container, *user)
                .is_some()
            {
                continue;
            }

            info!(%container, user = %user, "cascade share from list grant");
            let granter = Identity::new(granted_by.user, granted_by.display_name.clone());
            hub.commit_grant(
                &granter,
                container,
                *user,
                user_label,
                pantry_core::Role::Editor,
                chrono::Utc::now(),
            )?;
        }
        Ok(())
    }
}
