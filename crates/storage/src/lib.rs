//! Sharded in-memory storage for entities and memberships
//!
//! Replaces nothing and persists nothing: the engine's storage contract is
//! an in-process store providing atomic per-entity conditional updates.
//! Concurrency properties:
//!
//! - `EntityStore`: DashMap-sharded rows. Reads are lock-free; an update
//!   holds the entry's shard lock for the duration of the mutation closure,
//!   which is what makes compare-and-increment indivisible per entity.
//! - `MembershipStore`: DashMap of per-container role maps.
//! - Different entities never contend; two items on the same list can be
//!   edited concurrently without blocking each other.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entity_store;
pub mod membership;
pub mod stores;

pub use entity_store::EntityStore;
pub use membership::MembershipStore;
pub use stores::{Catalog, MembershipView, Stores};
