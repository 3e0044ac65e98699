//! Orchestration: the write pipeline, domain bus, and cascade rules
//!
//! Every mutation flows the same path:
//!
//! 1. the access resolver authorizes the acting user,
//! 2. the version guard validates and advances the entity's version inside
//!    its storage critical section (all-or-nothing per entity),
//! 3. a change event fans out to the affected containers' topics,
//! 4. membership mutations additionally dispatch a domain event on the
//!    in-process bus, where the cascade-sharing rule is registered.
//!
//! The hub holds the only shared mutable state (stores) and wires the
//! stateless pieces together.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod bus;
mod cascade;
mod categories;
mod hub;
mod items;
mod lists;
mod members;
mod products;
pub mod testing;
mod workspaces;

pub use bus::DomainHandler;
pub use cascade::CascadeSharing;
pub use categories::CategoryPatch;
pub use hub::Hub;
pub use items::{ItemPatch, NewItem};
pub use lists::ListPatch;
pub use members::Member;
pub use products::ProductPatch;
pub use workspaces::WorkspacePatch;
