//! The facade entry point

use pantry_broadcast::{Session, Subscription};
use pantry_core::{Authenticator, Identity, IdentityDirectory, Result};
use pantry_engine::Hub;
use std::sync::Arc;

/// The collaboration engine, ready for a host transport
///
/// Cheap to clone; clones share the same stores and topics.
///
/// # Example
///
/// ```ignore
/// use pantry_api::{Pantry, CreateWorkspaceRequest};
///
/// let pantry = Pantry::builder()
///     .authenticator(auth)
///     .identities(directory)
///     .build();
///
/// let alice = pantry.authenticate("bearer-token")?;
/// let home = pantry.create_workspace(&alice, CreateWorkspaceRequest {
///     name: "Home".into(),
///     icon: None,
/// })?;
/// ```
#[derive(Clone)]
pub struct Pantry {
    hub: Arc<Hub>,
}

impl Pantry {
    /// Start configuring a pantry
    pub fn builder() -> PantryBuilder {
        PantryBuilder::default()
    }

    pub(crate) fn from_hub(hub: Hub) -> Self {
        Self { hub: Arc::new(hub) }
    }

    pub(crate) fn hub(&self) -> &Hub {
        &self.hub
    }

    /// Validate a bearer credential for a single request
    pub fn authenticate(&self, token: &str) -> Result<Identity> {
        self.hub.authenticate(token)
    }

    /// Establish an event-stream session (authenticates once)
    pub fn connect(&self, token: &str) -> Result<Session> {
        self.hub.connect(token)
    }

    /// Subscribe a session to a topic named `<container-kind>/<id>`
    pub fn subscribe(&self, session: &Session, topic: &str) -> Result<Subscription> {
        self.hub.subscribe(session, topic)
    }
}

/// Configures and builds a [`Pantry`]
///
/// Both collaborators are required: the engine cannot authenticate
/// sessions or resolve invite handles on its own.
#[derive(Default)]
pub struct PantryBuilder {
    authenticator: Option<Arc<dyn Authenticator>>,
    identities: Option<Arc<dyn IdentityDirectory>>,
}

impl PantryBuilder {
    /// The credential validator (external identity subsystem)
    pub fn authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    /// The invite-handle resolver (external identity subsystem)
    pub fn identities(mut self, identities: Arc<dyn IdentityDirectory>) -> Self {
        self.identities = Some(identities);
        self
    }

    /// Build the pantry
    ///
    /// # Panics
    ///
    /// Panics if a collaborator is missing; this is a wiring error caught
    /// at startup, not a runtime condition.
    pub fn build(self) -> Pantry {
        let authenticator = self
            .authenticator
            .expect("PantryBuilder requires an authenticator");
        let identities = self
            .identities
            .expect("PantryBuilder requires an identity directory");
        Pantry::from_hub(Hub::new(authenticator, identities))
    }
}
