//! Topic names
//!
//! A topic is one container instance. The wire form is
//! `<container-kind>/<uuid>`, e.g. `list/7c9e6679-7425-40de-944b-e07fc1f90ae7`.

use pantry_core::{ContainerId, ContainerKind, Error, Result};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A named real-time channel corresponding to one container instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Topic(ContainerId);

impl Topic {
    /// The container this topic carries events for
    pub const fn container(&self) -> ContainerId {
        self.0
    }

    /// Parse a topic name of the form `<container-kind>/<uuid>`
    ///
    /// Malformed names are an InvalidRequest, not a NotFound: the
    /// distinction matters because NotFound is reserved for well-formed ids
    /// that resolve to nothing.
    pub fn parse(name: &str) -> Result<Self> {
        let (kind, id) = name
            .split_once('/')
            .ok_or_else(|| Error::invalid(format!("topic `{name}` is not <kind>/<id>")))?;
        let kind = ContainerKind::from_str(kind)
            .map_err(|()| Error::invalid(format!("unknown container kind `{kind}`")))?;
        let id = Uuid::parse_str(id)
            .map_err(|_| Error::invalid(format!("`{id}` is not a container id")))?;
        Ok(Topic(ContainerId::from_parts(kind, id)))
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ContainerId> for Topic {
    fn from(container: ContainerId) -> Self {
        Topic(container)
    }
}
