//! Per-entity version counter for optimistic concurrency
//!
//! Every shared mutable entity carries a [`Version`] starting at 0 and
//! incremented by exactly 1 on each successful field-changing mutation.
//! Clients echo the version back on writes; a mismatch means another
//! writer committed in between and the write is rejected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonic per-entity mutation counter
///
/// ## Invariants
///
/// - Starts at [`Version::ZERO`] when the entity is created
/// - Increments by exactly 1 per successful field-changing mutation
/// - Never incremented by mutations that change nothing (no-op reorders)
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    /// The version every entity is created with
    pub const ZERO: Version = Version(0);

    /// Wrap a raw counter value
    pub const fn new(v: u64) -> Self {
        Version(v)
    }

    /// The version after one more successful mutation
    #[inline]
    pub const fn next(&self) -> Self {
        Version(self.0 + 1)
    }

    /// Raw counter value
    #[inline]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Version {
    fn from(v: u64) -> Self {
        Version(v)
    }
}

/// Implemented by every entity that participates in optimistic concurrency
///
/// The storage layer goes through this trait to read and advance versions
/// inside the per-entity critical section, so the compare and the increment
/// are indivisible with respect to concurrent writers.
pub trait Versioned {
    /// Current stored version
    fn version(&self) -> Version;

    /// Mutable access for the storage layer's version bump
    fn version_mut(&mut self) -> &mut Version;

    /// Record the moment of the last successful mutation
    fn touch(&mut self, at: DateTime<Utc>);
}
