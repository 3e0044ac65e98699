//! Connected sessions
//!
//! Authentication happens exactly once, at connection establishment: the
//! bearer credential is validated and the resulting identity attached to
//! the session. Every subsequent subscribe request reuses that identity
//! without re-authenticating.

use pantry_core::{Authenticator, Error, Identity, Result};
use std::fmt;
use tracing::debug;
use uuid::Uuid;

/// Opaque id for a connected session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One client connection to the event stream
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    identity: Option<Identity>,
}

impl Session {
    /// Establish a session by validating a bearer credential
    ///
    /// The credential is consumed here and never stored; only the resolved
    /// identity is kept.
    pub fn connect(authenticator: &dyn Authenticator, token: &str) -> Result<Self> {
        let identity = authenticator.authenticate(token)?;
        let session = Self {
            id: SessionId::new(),
            identity: Some(identity),
        };
        debug!(session = %session.id, "session connected");
        Ok(session)
    }

    /// A connection that presented no credential
    ///
    /// Allowed to exist (the transport may accept the socket before the
    /// handshake), but every subscribe on it is rejected as
    /// Unauthenticated.
    pub fn anonymous() -> Self {
        Self {
            id: SessionId::new(),
            identity: None,
        }
    }

    /// The session's id
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The attached identity, if the session authenticated
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// The attached identity, or Unauthenticated
    pub fn require_identity(&self) -> Result<&Identity> {
        self.identity.as_ref().ok_or(Error::Unauthenticated)
    }
}
