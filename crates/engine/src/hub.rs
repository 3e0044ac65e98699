//! The hub: storage, access resolution, broadcasting, and the domain bus

use crate::bus::DomainHandler;
use crate::cascade::CascadeSharing;
use chrono::{DateTime, Utc};
use pantry_access::AccessResolver;
use pantry_broadcast::{Broadcaster, Session, Subscription, Topic, TopicAuthorizer};
use pantry_core::{
    Actor, Authenticator, ChangeEvent, ContainerId, DomainEvent, EntityRef, EventKind, Identity,
    IdentityDirectory, Result, Role, UserId,
};
use pantry_storage::{Catalog, MembershipView, Stores};
use std::sync::Arc;
use tracing::info;

/// The access resolver as wired over the real stores
pub(crate) type Resolver = AccessResolver<MembershipView, Catalog>;

/// Subscribe-time authorization over the resolver
///
/// Kept as its own small type so the broadcaster's handshake stays
/// independent of the hub's lifetime.
struct ReadGate {
    resolver: Resolver,
}

impl TopicAuthorizer for ReadGate {
    fn authorize_read(&self, user: UserId, container: ContainerId) -> Result<()> {
        self.resolver.require_readable(user, container)
    }
}

/// The collaboration engine
///
/// One hub per process; every operation is `&self` and safe to call from
/// any number of request workers concurrently. No locks are held across
/// operations: per-entity conflicts are resolved optimistically by the
/// version guard.
pub struct Hub {
    stores: Arc<Stores>,
    resolver: Resolver,
    broadcaster: Broadcaster,
    handlers: Vec<Arc<dyn DomainHandler>>,
    authenticator: Arc<dyn Authenticator>,
    identities: Arc<dyn IdentityDirectory>,
}

impl Hub {
    /// Build a hub over fresh stores
    ///
    /// The cascade-sharing rule is registered on the domain bus by
    /// default; additional rules can be stacked with
    /// [`Hub::with_handlers`].
    pub fn new(
        authenticator: Arc<dyn Authenticator>,
        identities: Arc<dyn IdentityDirectory>,
    ) -> Self {
        Self::with_handlers(authenticator, identities, vec![Arc::new(CascadeSharing)])
    }

    /// Build a hub with an explicit set of domain-event handlers
    ///
    /// Handlers are fixed at construction: dispatch iterates a plain
    /// vector, so re-entrant dispatch from inside a handler (the cascade
    /// grants memberships, which dispatch again) needs no locking.
    pub fn with_handlers(
        authenticator: Arc<dyn Authenticator>,
        identities: Arc<dyn IdentityDirectory>,
        handlers: Vec<Arc<dyn DomainHandler>>,
    ) -> Self {
        let stores = Arc::new(Stores::new());
        let resolver = AccessResolver::new(
            MembershipView::new(Arc::clone(&stores)),
            Catalog::new(Arc::clone(&stores)),
        );
        let broadcaster = Broadcaster::new(Arc::new(ReadGate {
            resolver: resolver.clone(),
        }));
        Self {
            stores,
            resolver,
            broadcaster,
            handlers,
            authenticator,
            identities,
        }
    }

    /// The storage set
    pub(crate) fn stores(&self) -> &Stores {
        &self.stores
    }

    /// The access resolver
    pub(crate) fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// The identity directory collaborator
    pub(crate) fn identities(&self) -> &dyn IdentityDirectory {
        &*self.identities
    }

    /// Validate a bearer credential and return the attached identity
    ///
    /// Write endpoints call this once per request; stream transports call
    /// it once per connection via [`Hub::connect`].
    pub fn authenticate(&self, token: &str) -> Result<Identity> {
        self.authenticator.authenticate(token)
    }

    /// Establish an event-stream session
    pub fn connect(&self, token: &str) -> Result<Session> {
        Session::connect(&*self.authenticator, token)
    }

    /// Subscribe a session to a topic named `<container-kind>/<id>`
    ///
    /// The session's identity is re-checked for read access on the named
    /// container before admission; rejection leaks no partial state.
    pub fn subscribe(&self, session: &Session, topic: &str) -> Result<Subscription> {
        let topic = Topic::parse(topic)?;
        self.broadcaster.subscribe(session, topic)
    }

    /// Sessions currently subscribed to a container's topic
    pub fn subscriber_count(&self, container: ContainerId) -> usize {
        self.broadcaster.subscriber_count(container)
    }

    /// Fan one change out to each affected container topic
    pub(crate) fn publish_change(
        &self,
        kind: EventKind,
        entity: EntityRef,
        containers: &[ContainerId],
        actor: &Identity,
        at: DateTime<Utc>,
    ) {
        for &container in containers {
            self.broadcaster.publish(
                container,
                ChangeEvent {
                    kind,
                    entity: entity.clone(),
                    container,
                    actor: Actor::from(actor),
                    at,
                },
            );
        }
    }

    /// Dispatch a domain event to every registered handler, in order
    pub(crate) fn dispatch(&self, event: &DomainEvent) -> Result<()> {
        for handler in &self.handlers {
            handler.on_event(self, event)?;
        }
        Ok(())
    }

    /// Grant a role, publish the member event, and run the domain bus
    ///
    /// The single entry point for every membership grant: invites,
    /// direct grants, creator-ownership, and cascade grants all go
    /// through here so the bus sees each of them.
    pub(crate) fn commit_grant(
        &self,
        actor: &Identity,
        container: ContainerId,
        user: UserId,
        user_label: &str,
        role: Role,
        at: DateTime<Utc>,
    ) -> Result<()> {
        self.stores.memberships.grant(container, user, role);
        info!(%container, %user, %role, "member added");
        self.publish_change(
            EventKind::Created,
            EntityRef::new(user, user_label),
            &[container],
            actor,
            at,
        );
        self.dispatch(&DomainEvent::MembershipGranted {
            container,
            user,
            user_label: user_label.to_string(),
            role,
            granted_by: Actor::from(actor),
        })
    }

    /// The container's owner, if it has one
    pub(crate) fn owner_of(&self, container: ContainerId) -> Option<UserId> {
        self.stores
            .memberships
            .members_of(container)
            .into_iter()
            .find_map(|(user, role)| role.is_owner().then_some(user))
    }
}

/// Trim a client-supplied name, rejecting empty results
pub(crate) fn clean_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(pantry_core::Error::invalid("name must not be blank"));
    }
    Ok(trimmed.to_string())
}

/// Sort value for a newly created sibling: after everything that exists
pub(crate) fn next_sort(existing: impl Iterator<Item = i64>) -> i64 {
    existing.max().map_or(0, |max| max + 1)
}
