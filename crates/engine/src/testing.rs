//! Fixtures for unit and integration tests
//!
//! A hub needs an authenticator and an identity directory; tests get both
//! from [`FixedCredentials`], a static table mapping bearer tokens and
//! invite handles to identities.

use crate::bus::DomainHandler;
use crate::hub::Hub;
use pantry_core::{
    Authenticator, EntityKind, Error, Identity, IdentityDirectory, Result, UserId,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Static token/handle tables standing in for the identity subsystem
#[derive(Debug, Clone, Default)]
pub struct FixedCredentials {
    by_token: HashMap<String, Identity>,
    by_handle: HashMap<String, Identity>,
}

impl FixedCredentials {
    /// An empty table: every credential is rejected
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user reachable by `<name>-token` and `<name>@example.com`
    pub fn user(&mut self, name: &str) -> Identity {
        let identity = Identity::new(UserId::new(), name);
        self.by_token
            .insert(format!("{name}-token"), identity.clone());
        self.by_handle
            .insert(format!("{name}@example.com"), identity.clone());
        identity
    }
}

impl Authenticator for FixedCredentials {
    fn authenticate(&self, token: &str) -> Result<Identity> {
        self.by_token
            .get(token)
            .cloned()
            .ok_or(Error::Unauthenticated)
    }
}

impl IdentityDirectory for FixedCredentials {
    fn resolve_handle(&self, handle: &str) -> Result<Identity> {
        self.by_handle
            .get(handle)
            .cloned()
            .ok_or_else(|| Error::not_found(EntityKind::User, Uuid::nil()))
    }
}

/// A hub wired to the given credential table
pub fn hub_with(credentials: FixedCredentials) -> Hub {
    let shared = Arc::new(credentials);
    let authenticator: Arc<dyn Authenticator> = shared.clone();
    let identities: Arc<dyn IdentityDirectory> = shared;
    Hub::new(authenticator, identities)
}

/// A hub with an empty credential table
pub fn hub() -> Hub {
    hub_with(FixedCredentials::new())
}

/// A hub with an explicit handler set (domain-bus tests)
pub fn hub_with_handlers(handlers: Vec<Arc<dyn DomainHandler>>) -> Hub {
    let shared = Arc::new(FixedCredentials::new());
    let authenticator: Arc<dyn Authenticator> = shared.clone();
    let identities: Arc<dyn IdentityDirectory> = shared;
    Hub::with_handlers(authenticator, identities, handlers)
}
